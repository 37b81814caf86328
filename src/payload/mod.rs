//! The payload module contains the components responsible for turning the rows
//! of a TIC frame into typed readings, one schema per link mode.

pub mod date;
pub mod field;
pub mod historical;
pub mod relay;
pub mod standard;
pub mod status;

use crate::tic::frame::Frame;
use crate::tic::mode::TicMode;
use serde::Serialize;

pub use date::decode_date;
pub use field::{decode_unsigned, FieldSpec, FieldTable, Slot, ValueToken};
pub use historical::HistoricalReading;
pub use relay::RelayRegister;
pub use standard::StandardReading;
pub use status::StatusRegister;

/// A finished reading, in the schema of the link mode it was read with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum TicReading {
    Historical(HistoricalReading),
    Standard(StandardReading),
}

impl TicReading {
    /// Decodes `frame` with the schema of `mode`.
    pub fn decode(mode: TicMode, frame: &Frame) -> Self {
        match mode {
            TicMode::Historical => TicReading::Historical(HistoricalReading::from_frame(frame)),
            TicMode::Standard => TicReading::Standard(StandardReading::from_frame(frame)),
        }
    }

    pub fn mode(&self) -> TicMode {
        match self {
            TicReading::Historical(_) => TicMode::Historical,
            TicReading::Standard(_) => TicMode::Standard,
        }
    }

    /// Meter address: ADCO in historical mode, ADSC in standard mode.
    pub fn meter_id(&self) -> &str {
        match self {
            TicReading::Historical(reading) => &reading.adco,
            TicReading::Standard(reading) => &reading.adsc,
        }
    }
}
