use crate::{NormalizedHit, QDC_LEN};

use super::error::DdasError;
use super::layout;
use super::reader::WordReader;
use super::timing::ModuleFrequency;

/// Decode one hit record from the reader's current position.
///
/// Fields are consumed in strict order with no backtracking: header word,
/// coarse timestamp, CFD word, energy word, optional block, trace. The
/// bytes consumed must equal the record's declared length in 32-bit words;
/// any disagreement means the stream position can no longer be trusted and
/// is returned as [`DdasError::LengthMismatch`].
pub fn parse_hit(freq: ModuleFrequency, reader: &mut WordReader<'_>) -> Result<NormalizedHit, DdasError> {
    let start = reader.consumed();

    let header = reader.read_u32()?;
    let channel = (header >> layout::CHANNEL_SHIFT) & layout::MASK_4BIT;
    let slot = (header >> layout::SLOT_SHIFT) & layout::MASK_4BIT;
    let crate_id = (header >> layout::CRATE_SHIFT) & layout::MASK_4BIT;
    let _header_size = (header >> layout::HEADER_SIZE_SHIFT) & layout::MASK_5BIT;
    // Total record size in 32-bit words, including this header.
    let event_length = (header >> layout::EVENT_LENGTH_SHIFT) & layout::MASK_14BIT;
    let _finish_code = (header >> layout::FINISH_CODE_SHIFT) & layout::MASK_1BIT;

    let time_low = reader.read_u32()?;
    let cfd_word = reader.read_u32()?;
    let time = freq.correct(time_low, cfd_word);

    let energy_word = reader.read_u32()?;
    let energy = (energy_word >> layout::ENERGY_SHIFT) & layout::MASK_16BIT;
    let trace_length = (energy_word >> layout::TRACE_LENGTH_SHIFT) & layout::MASK_15BIT;
    let overflow = (energy_word >> layout::OVERFLOW_SHIFT) & layout::MASK_1BIT == 1;

    // Optional-block length in words: whatever the declared record length
    // leaves after the fixed header and the trace (two samples per word).
    let opt_len = event_length as i64
        - (trace_length as i64 / 2 + layout::FIXED_HEADER_WORDS as i64);

    let mut qdc = [0i32; QDC_LEN];
    if opt_len == layout::QDC_WORDS as i64 {
        for entry in qdc.iter_mut() {
            *entry = reader.read_u32()? as i32;
        }
    } else if opt_len > 0 {
        // Only QDC records are supported; skip other optional blocks by
        // their declared length without decoding.
        for _ in 0..opt_len {
            reader.read_u32()?;
        }
    }

    let mut trace = Vec::with_capacity(trace_length as usize);
    for _ in 0..trace_length {
        trace.push(reader.read_u16()? as i16 as i32);
    }

    let declared = event_length as usize * layout::WORD_BYTES;
    let consumed = reader.consumed() - start;
    if consumed != declared {
        return Err(DdasError::LengthMismatch { declared, consumed });
    }

    Ok(NormalizedHit {
        crate_id: crate_id as u8,
        slot: slot as u8,
        channel: channel as u16,
        energy: energy as u16,
        overflow,
        time_raw: time.raw,
        time: time.corrected,
        qdc,
        trace,
    })
}
