pub const MASK_1BIT: u32 = 0x1;
pub const MASK_3BIT: u32 = 0x7;
pub const MASK_4BIT: u32 = 0xf;
pub const MASK_5BIT: u32 = 0x1f;
pub const MASK_13BIT: u32 = 0x1fff;
pub const MASK_14BIT: u32 = 0x3fff;
pub const MASK_15BIT: u32 = 0x7fff;
pub const MASK_16BIT: u32 = 0xffff;

// Header word fields.
pub const CHANNEL_SHIFT: u32 = 0;
pub const SLOT_SHIFT: u32 = 4;
pub const CRATE_SHIFT: u32 = 8;
pub const HEADER_SIZE_SHIFT: u32 = 12;
pub const EVENT_LENGTH_SHIFT: u32 = 17;
pub const FINISH_CODE_SHIFT: u32 = 31;

// Energy word fields.
pub const ENERGY_SHIFT: u32 = 0;
pub const TRACE_LENGTH_SHIFT: u32 = 16;
pub const OVERFLOW_SHIFT: u32 = 31;

// CFD word fields shared by all frequencies.
pub const TIME_HIGH_SHIFT: u32 = 0;
pub const CFD_FRAC_SHIFT: u32 = 16;
pub const CFD_PARITY_SHIFT: u32 = 30;
pub const CFD_FORCE_SHIFT: u32 = 31;
// Legacy decoder computes the 500 MHz trigger source at shift 31.
pub const CFD_SOURCE_SHIFT: u32 = 31;

/// Fixed words before any optional block: header, time low, CFD, energy.
pub const FIXED_HEADER_WORDS: u32 = 4;
/// Optional-block word count identifying a QDC record.
pub const QDC_WORDS: u32 = 8;
/// Bytes per 32-bit word.
pub const WORD_BYTES: usize = 4;
