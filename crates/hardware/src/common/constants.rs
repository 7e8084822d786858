//! Bus-level constants shared across the crate.
//!
//! Pin positions follow the Commodore userport wiring used by the SNES pad adapter:
//!
//! | C64/C128 | PET     | VIC-20  | SNES pad | Direction |
//! |----------|---------|---------|----------|-----------|
//! | F (PB3)  | F (PA3) | F (PB3) | CLOCK    | out       |
//! | J (PB5)  | J (PA5) | J (PB5) | LATCH    | out       |
//! | K (PB6)  | K (PA6) | K (PB6) | DATA     | in        |

/// Value of a bus slot nobody is pulling low.
pub const IDLE_BYTE: u8 = 0xFF;

/// Value a host read returns when no secondary domain is attached and enabled.
pub const IDLE_READ: u8 = 0x00;

/// Byte-wide port bit carrying the shift-register clock line.
pub const PB_CLOCK: u8 = 1 << 3;

/// Byte-wide port bit carrying the shift-register latch line.
pub const PB_LATCH: u8 = 1 << 5;

/// Byte-wide port bit carrying the shift-register data line.
pub const PB_DATA: u8 = 1 << 6;

/// Bit position of [`PB_DATA`].
pub const PB_DATA_SHIFT: u32 = 6;

/// Mask covering every bit of the byte-wide port.
pub const PB_ALL: u8 = 0xFF;

/// Host clock of a PAL C64 in Hz.
pub const PAL_HOST_HZ: u64 = 985_248;

/// Clock of a 1541-class drive CPU in Hz.
pub const DRIVE_HZ: u64 = 1_000_000;

/// First IEC unit number assigned to disk drives.
pub const FIRST_DRIVE_UNIT: u8 = 8;

/// Number of drive units a host can address.
pub const MAX_DRIVE_UNITS: usize = 4;
