use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::formats::faster::{FasterError, LabeledEvent};

/// Lazy labeled-event source over a JSON-lines file.
///
/// One event per line; blank lines are skipped but still counted so error
/// line numbers match the file. Events are parsed as they are pulled, so
/// memory stays bounded by the batch threshold regardless of capture size.
pub struct LabeledEventFile {
    lines: Lines<BufReader<File>>,
    line: u64,
}

impl LabeledEventFile {
    pub fn open(path: &Path) -> Result<Self, FasterError> {
        let file = File::open(path)?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
            line: 0,
        })
    }
}

impl Iterator for LabeledEventFile {
    type Item = Result<LabeledEvent, FasterError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(err) => return Some(Err(FasterError::Io(err))),
            };
            self.line += 1;
            if line.trim().is_empty() {
                continue;
            }
            let number = self.line;
            return Some(
                serde_json::from_str(&line)
                    .map_err(|source| FasterError::InvalidLine { line: number, source }),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LabeledEventFile;
    use crate::formats::faster::FasterError;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_events(name: &str, text: &str) -> PathBuf {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!("evtconv_{name}_{unique}.jsonl"));
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn yields_events_in_order_and_skips_blank_lines() {
        let text = concat!(
            "{\"label\":1,\"time\":5.0,\"data\":{\"value\":11}}\n",
            "\n",
            "{\"label\":2,\"time\":6.0,\"data\":{\"value\":22}}\n",
        );
        let path = temp_events("labeled", text);

        let events: Vec<_> = LabeledEventFile::open(&path)
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].label, 1);
        assert_eq!(events[0].data.value, Some(11));
        assert_eq!(events[1].label, 2);
        assert_eq!(events[1].data.value, Some(22));
    }

    #[test]
    fn invalid_line_reports_its_file_line_number() {
        let path = temp_events("badline", "{\"label\":1,\"time\":5.0}\nnot json\n");

        let mut source = LabeledEventFile::open(&path).unwrap();
        assert!(source.next().unwrap().is_ok());
        let err = source.next().unwrap().unwrap_err();
        let _ = fs::remove_file(&path);

        assert!(matches!(err, FasterError::InvalidLine { line: 2, .. }));
    }
}
