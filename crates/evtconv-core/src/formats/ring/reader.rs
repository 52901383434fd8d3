use super::error::RingError;

/// Byte cursor over a physics ring-item payload.
///
/// Handles the fixed skips and the little-endian device descriptor; hit
/// records themselves go through the DDAS word reader.
pub struct RingReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> RingReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn skip(&mut self, len: usize) -> Result<(), RingError> {
        self.take(len)?;
        Ok(())
    }

    pub fn read_i32(&mut self) -> Result<i32, RingError> {
        let bytes = self.take(4)?;
        Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_i16(&mut self) -> Result<i16, RingError> {
        let bytes = self.take(2)?;
        Ok(i16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_i8(&mut self) -> Result<i8, RingError> {
        let bytes = self.take(1)?;
        Ok(bytes[0] as i8)
    }

    /// Unconsumed tail of the payload.
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    pub fn offset(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, needed: usize) -> Result<&'a [u8], RingError> {
        let end = self.pos + needed;
        let bytes = self.buf.get(self.pos..end).ok_or(RingError::TooShort {
            offset: self.pos,
            needed,
            remaining: self.buf.len() - self.pos,
        })?;
        self.pos = end;
        Ok(bytes)
    }
}
