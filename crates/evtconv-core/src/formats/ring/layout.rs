/// Ring item type carrying DDAS physics payloads.
pub const PHYSICS_EVENT_TYPE: u32 = 30;

// Opaque legacy skip lengths; see the module docs.
pub const BODY_HEADER_LEN: usize = 20;
pub const FRAGMENT_SIZE_LEN: usize = 4;
pub const FRAGMENT_HEADER_LEN: usize = 20;
pub const PHYSICS_HEADER_LEN: usize = 8;
