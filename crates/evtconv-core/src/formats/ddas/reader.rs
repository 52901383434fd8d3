use super::error::DdasError;

/// Little-endian word cursor over a hit record.
///
/// Reads advance the cursor; `consumed` bookkeeping lets callers check a
/// record against its declared length.
pub struct WordReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WordReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Read the next 4 bytes as an unsigned 32-bit little-endian word.
    pub fn read_u32(&mut self) -> Result<u32, DdasError> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read the next 2 bytes as an unsigned 16-bit little-endian value.
    pub fn read_u16(&mut self) -> Result<u16, DdasError> {
        let bytes = self.take(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn consumed(&self) -> usize {
        self.pos
    }

    fn take(&mut self, needed: usize) -> Result<&'a [u8], DdasError> {
        let end = self.pos + needed;
        let bytes = self
            .buf
            .get(self.pos..end)
            .ok_or(DdasError::TruncatedRead {
                needed,
                remaining: self.buf.len() - self.pos,
            })?;
        self.pos = end;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::WordReader;
    use crate::formats::ddas::error::DdasError;

    #[test]
    fn reads_words_and_tracks_consumption() {
        let buf = [0x01, 0x00, 0x00, 0x00, 0x34, 0x12];
        let mut reader = WordReader::new(&buf);
        assert_eq!(reader.read_u32().unwrap(), 1);
        assert_eq!(reader.consumed(), 4);
        assert_eq!(reader.read_u16().unwrap(), 0x1234);
        assert_eq!(reader.consumed(), 6);
    }

    #[test]
    fn truncated_word_is_an_error() {
        let buf = [0x01, 0x02, 0x03];
        let mut reader = WordReader::new(&buf);
        let err = reader.read_u32().unwrap_err();
        assert!(matches!(
            err,
            DdasError::TruncatedRead {
                needed: 4,
                remaining: 3
            }
        ));
        // A failed read must not advance the cursor.
        assert_eq!(reader.consumed(), 0);
    }
}
