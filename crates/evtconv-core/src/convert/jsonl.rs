use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::HitRow;

use super::sink::{HitSink, SinkError};

/// JSON-lines sink: one file of hit rows, one file of traces.
///
/// `trace_idx` references the 1-based line number in the trace file,
/// matching the legacy variable-length array layout.
pub struct JsonlSink {
    hits: BufWriter<File>,
    traces: BufWriter<File>,
    next_trace_idx: u64,
}

impl JsonlSink {
    pub fn create(hits_path: &Path, traces_path: &Path) -> Result<Self, SinkError> {
        Ok(Self {
            hits: BufWriter::new(File::create(hits_path)?),
            traces: BufWriter::new(File::create(traces_path)?),
            next_trace_idx: 0,
        })
    }
}

impl HitSink for JsonlSink {
    fn append_trace(&mut self, samples: &[i32]) -> Result<u64, SinkError> {
        let line = serde_json::to_string(samples)?;
        writeln!(self.traces, "{line}")?;
        self.next_trace_idx += 1;
        Ok(self.next_trace_idx)
    }

    fn append(&mut self, row: &HitRow) -> Result<(), SinkError> {
        let line = serde_json::to_string(row)?;
        writeln!(self.hits, "{line}")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.hits.flush()?;
        self.traces.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::JsonlSink;
    use crate::convert::sink::HitSink;
    use crate::{HitRow, NormalizedHit, QDC_LEN};
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(name: &str) -> PathBuf {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("evtconv_{name}_{unique}"))
    }

    #[test]
    fn writes_rows_and_traces_as_json_lines() {
        let hits_path = temp_path("hits.jsonl");
        let traces_path = temp_path("traces.jsonl");

        let hit = NormalizedHit {
            crate_id: 1,
            slot: 2,
            channel: 3,
            energy: 100,
            overflow: false,
            time_raw: 10.0,
            time: 10.5,
            qdc: [0; QDC_LEN],
            trace: vec![4, -4],
        };

        {
            let mut sink = JsonlSink::create(&hits_path, &traces_path).unwrap();
            let idx = sink.append_trace(&hit.trace).unwrap();
            assert_eq!(idx, 1);
            sink.append(&HitRow::from_hit(&hit, Some(idx))).unwrap();
            sink.flush().unwrap();
        }

        let hits_text = fs::read_to_string(&hits_path).unwrap();
        let traces_text = fs::read_to_string(&traces_path).unwrap();
        let _ = fs::remove_file(&hits_path);
        let _ = fs::remove_file(&traces_path);

        let row: HitRow = serde_json::from_str(hits_text.lines().next().unwrap()).unwrap();
        assert_eq!(row.channel, 3);
        assert_eq!(row.trace_idx, Some(1));
        let trace: Vec<i32> = serde_json::from_str(traces_text.lines().next().unwrap()).unwrap();
        assert_eq!(trace, vec![4, -4]);
    }
}
