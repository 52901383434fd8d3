use crate::NormalizedHit;
use crate::formats::ddas::{ModuleFrequency, WordReader, parse_hit};

use super::error::RingError;
use super::layout;
use super::reader::RingReader;

/// Decode every hit in a physics ring-item payload.
///
/// The loop repeats until the declared payload is exhausted; a built event
/// carries several hit blocks back to back and yields one hit per block,
/// in encounter order.
pub fn parse_physics_event(payload: &[u8]) -> Result<Vec<NormalizedHit>, RingError> {
    let mut reader = RingReader::new(payload);
    reader.skip(layout::BODY_HEADER_LEN)?;
    reader.skip(layout::FRAGMENT_SIZE_LEN)?;

    let mut hits = Vec::new();
    while reader.remaining() > 0 {
        reader.skip(layout::FRAGMENT_HEADER_LEN)?;
        reader.skip(layout::PHYSICS_HEADER_LEN)?;
        reader.skip(layout::BODY_HEADER_LEN)?;

        let _body_size = reader.read_i32()?;
        let frequency = reader.read_i16()?;
        let _resolution = reader.read_i8()?;
        let _revision = reader.read_i8()?;

        let offset = reader.offset();
        let freq = ModuleFrequency::from_raw(frequency)
            .map_err(|source| RingError::Hit { offset, source })?;

        let mut words = WordReader::new(reader.rest());
        let hit =
            parse_hit(freq, &mut words).map_err(|source| RingError::Hit { offset, source })?;
        reader.skip(words.consumed())?;
        hits.push(hit);
    }

    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::parse_physics_event;
    use crate::formats::ring::error::RingError;
    use crate::formats::ring::layout;

    fn push_word(buf: &mut Vec<u8>, word: u32) {
        buf.extend_from_slice(&word.to_le_bytes());
    }

    fn push_hit_record(buf: &mut Vec<u8>, channel: u32, energy: u32) {
        push_word(buf, channel | (4 << 12) | (4 << 17));
        push_word(buf, 100); // time low
        push_word(buf, 16384 << 16); // cfd
        push_word(buf, energy);
    }

    fn push_fragment(buf: &mut Vec<u8>, frequency: i16, channel: u32, energy: u32) {
        buf.extend_from_slice(&[0u8; layout::FRAGMENT_HEADER_LEN]);
        buf.extend_from_slice(&[0u8; layout::PHYSICS_HEADER_LEN]);
        buf.extend_from_slice(&[0u8; layout::BODY_HEADER_LEN]);
        buf.extend_from_slice(&16i32.to_le_bytes());
        buf.extend_from_slice(&frequency.to_le_bytes());
        buf.push(14);
        buf.push(1);
        push_hit_record(buf, channel, energy);
    }

    fn payload_prelude() -> Vec<u8> {
        let mut buf = vec![0u8; layout::BODY_HEADER_LEN];
        buf.extend_from_slice(&[0u8; layout::FRAGMENT_SIZE_LEN]);
        buf
    }

    #[test]
    fn single_hit_payload_yields_one_hit() {
        let mut payload = payload_prelude();
        push_fragment(&mut payload, 100, 3, 1234);

        let hits = parse_physics_event(&payload).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].channel, 3);
        assert_eq!(hits[0].energy, 1234);
        assert_eq!(hits[0].time_raw, 1000.0);
        assert_eq!(hits[0].time, 1005.0);
    }

    #[test]
    fn built_payload_yields_hits_in_encounter_order() {
        let mut payload = payload_prelude();
        push_fragment(&mut payload, 100, 3, 10);
        push_fragment(&mut payload, 250, 5, 20);

        let hits = parse_physics_event(&payload).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].channel, 3);
        assert_eq!(hits[0].energy, 10);
        assert_eq!(hits[1].channel, 5);
        assert_eq!(hits[1].energy, 20);
    }

    #[test]
    fn unknown_frequency_is_fatal_with_offset() {
        let mut payload = payload_prelude();
        push_fragment(&mut payload, 333, 0, 0);

        let err = parse_physics_event(&payload).unwrap_err();
        assert!(matches!(err, RingError::Hit { .. }));
        assert!(err.to_string().contains("unknown module frequency: 333"));
    }

    #[test]
    fn truncated_framing_is_fatal() {
        let payload = vec![0u8; layout::BODY_HEADER_LEN + layout::FRAGMENT_SIZE_LEN + 10];
        let err = parse_physics_event(&payload).unwrap_err();
        assert!(matches!(err, RingError::TooShort { .. }));
    }

    #[test]
    fn empty_payload_after_prelude_yields_no_hits() {
        let payload = payload_prelude();
        let hits = parse_physics_event(&payload).unwrap();
        assert!(hits.is_empty());
    }
}
