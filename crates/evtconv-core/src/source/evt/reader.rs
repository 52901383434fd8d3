use std::io::Read;

use super::layout;

/// Read one 8-byte item header, returning `None` at end-of-stream.
///
/// A partial header (fewer than 8 bytes remaining) is also end-of-stream:
/// the legacy writer pads nothing after the final item, so anything short
/// of a full header at the item boundary terminates the walk.
pub fn read_item_header<R: Read>(reader: &mut R) -> std::io::Result<Option<(u32, u32)>> {
    let mut header = [0u8; layout::ITEM_HEADER_LEN];
    let filled = fill(reader, &mut header)?;
    if filled < header.len() {
        return Ok(None);
    }
    let item_size = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
    let item_type = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
    Ok(Some((item_size, item_type)))
}

/// Read as many bytes as the reader can supply, up to `buf.len()`.
pub fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}
