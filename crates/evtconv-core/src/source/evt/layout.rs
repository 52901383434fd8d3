/// Ring item header: `(item_size: u32 LE, item_type: u32 LE)`.
pub const ITEM_HEADER_LEN: usize = 8;

/// `item_size` counts the header itself; payload size is `item_size - 8`.
pub const ITEM_SIZE_INCLUSIVE: u32 = ITEM_HEADER_LEN as u32;
