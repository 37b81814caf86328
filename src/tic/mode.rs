//! # TIC Link Modes
//!
//! A meter speaks exactly one of two serial dialects. The historical dialect is
//! the legacy 1200 baud output, the standard dialect is the 9600 baud output of
//! current meters. Both use 7 data bits, even parity and one stop bit.
//!
//! The two profiles are plain values gathered in a [`ModeCatalog`], which is
//! built once and passed to detection and configuration explicitly.

use crate::constants::{TIC_HISTORICAL_BAUD_RATE, TIC_STANDARD_BAUD_RATE};
use crate::error::TicError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tokio_serial::{DataBits, Parity, StopBits};

/// Name of a TIC link mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TicMode {
    Standard,
    Historical,
}

impl TicMode {
    pub fn name(&self) -> &'static str {
        match self {
            TicMode::Standard => "standard",
            TicMode::Historical => "historical",
        }
    }
}

impl fmt::Display for TicMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TicMode {
    type Err = TicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(TicMode::Standard),
            "historical" => Ok(TicMode::Historical),
            _ => Err(TicError::InvalidMode(s.to_string())),
        }
    }
}

/// Immutable serial profile of one link mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkMode {
    pub mode: TicMode,
    pub baud_rate: u32,
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
}

impl LinkMode {
    pub const STANDARD: LinkMode = LinkMode {
        mode: TicMode::Standard,
        baud_rate: TIC_STANDARD_BAUD_RATE,
        data_bits: DataBits::Seven,
        parity: Parity::Even,
        stop_bits: StopBits::One,
    };

    pub const HISTORICAL: LinkMode = LinkMode {
        mode: TicMode::Historical,
        baud_rate: TIC_HISTORICAL_BAUD_RATE,
        data_bits: DataBits::Seven,
        parity: Parity::Even,
        stop_bits: StopBits::One,
    };
}

/// The set of link modes known to the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeCatalog {
    pub standard: LinkMode,
    pub historical: LinkMode,
}

impl Default for ModeCatalog {
    fn default() -> Self {
        ModeCatalog {
            standard: LinkMode::STANDARD,
            historical: LinkMode::HISTORICAL,
        }
    }
}

impl ModeCatalog {
    /// Returns the profile registered for `mode`.
    pub fn get(&self, mode: TicMode) -> LinkMode {
        match mode {
            TicMode::Standard => self.standard,
            TicMode::Historical => self.historical,
        }
    }

    /// Detection order. Modern meters default to standard, so it is tried first.
    pub fn candidates(&self) -> [LinkMode; 2] {
        [self.standard, self.historical]
    }
}

/// Width in bits of a serial character.
pub fn data_bits_width(bits: DataBits) -> u8 {
    match bits {
        DataBits::Five => 5,
        DataBits::Six => 6,
        DataBits::Seven => 7,
        DataBits::Eight => 8,
    }
}
