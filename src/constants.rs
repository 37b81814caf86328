//! TIC Protocol Constants
//!
//! This module defines constants used by the TIC (tele-information client)
//! link layer and decoders, based on the Enedis NOI-CPT_54E specification.

/// Start of Text, opens a data block
pub const TIC_STX: u8 = 0x02;

/// End of Text, closes a data block
pub const TIC_ETX: u8 = 0x03;

/// Number of lines sampled per candidate mode during detection
pub const TIC_DETECT_SAMPLE_LINES: usize = 5;

/// Longest line kept in one read; longer input is split into several lines
pub const TIC_MAX_LINE_LENGTH: usize = 4096;

/// Shape of a well-formed TIC row: label, value, one checksum character
pub const TIC_LINE_SHAPE_PATTERN: &str = r"^[A-Z0-9\-+]+ +[a-zA-Z0-9 .\-]+ +.$";

/// Width of the standard-mode status register (STGE)
pub const TIC_STATUS_BIT_COUNT: usize = 32;

/// Width of the standard-mode relay register (RELAIS)
pub const TIC_RELAY_BIT_COUNT: usize = 8;

// Field separators inside a row
pub const TIC_SEPARATOR_SPACE: char = ' ';
pub const TIC_SEPARATOR_TAB: char = '\t';

// Serial defaults (7E1 for both modes)
pub const TIC_STANDARD_BAUD_RATE: u32 = 9600;
pub const TIC_HISTORICAL_BAUD_RATE: u32 = 1200;

// Date season markers; winter is UTC+1, anything else UTC+2
pub const TIC_DATE_WINTER_MARKER: char = 'h';
pub const TIC_DATE_WINTER_OFFSET_SECS: i32 = 3600;
pub const TIC_DATE_SUMMER_OFFSET_SECS: i32 = 7200;
pub const TIC_DATE_LAYOUT: &str = "%y%m%d%H%M%S";
