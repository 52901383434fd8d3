use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::source::{ItemSource, RingItem, SourceError};

use super::error::EvtSourceError;
use super::layout;
use super::reader::{fill, read_item_header};

/// Ring-item source backed by a capture file.
pub struct EvtFileSource {
    reader: BufReader<File>,
    offset: u64,
}

impl EvtFileSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path).map_err(SourceError::from)?;
        Ok(Self {
            reader: BufReader::new(file),
            offset: 0,
        })
    }
}

impl ItemSource for EvtFileSource {
    fn next_item(&mut self) -> Result<Option<RingItem>, SourceError> {
        next_item(&mut self.reader, &mut self.offset).map_err(SourceError::from)
    }
}

fn next_item(
    reader: &mut BufReader<File>,
    offset: &mut u64,
) -> Result<Option<RingItem>, EvtSourceError> {
    let item_offset = *offset;
    let (item_size, item_type) = match read_item_header(reader)? {
        Some(header) => header,
        None => return Ok(None),
    };
    if item_size < layout::ITEM_SIZE_INCLUSIVE {
        return Err(EvtSourceError::InvalidItemSize {
            size: item_size,
            offset: item_offset,
        });
    }

    let declared = (item_size - layout::ITEM_SIZE_INCLUSIVE) as usize;
    let mut payload = vec![0u8; declared];
    let actual = fill(reader, &mut payload)?;
    if actual < declared {
        return Err(EvtSourceError::TruncatedItem {
            offset: item_offset,
            declared,
            actual,
        });
    }

    *offset = item_offset + layout::ITEM_HEADER_LEN as u64 + declared as u64;
    Ok(Some(RingItem { item_type, payload }))
}
