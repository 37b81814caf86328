//! # TIC Link Configuration
//!
//! The boundary hands over a device path, a mode selection and optional serial
//! overrides. [`LinkConfig::resolve`] turns them into the single active
//! configuration of the process, running detection only when asked to.

use crate::error::TicError;
use crate::tic::detect::detect_mode;
use crate::tic::mode::{data_bits_width, LinkMode, ModeCatalog, TicMode};
use crate::tic::serial::LinkOpener;
use log::debug;
use std::fmt;
use tokio_serial::{DataBits, Parity, StopBits};

/// How the link mode is chosen at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeSelection {
    #[default]
    Auto,
    Standard,
    Historical,
}

impl ModeSelection {
    /// Maps the CLI flags onto a selection. `auto` wins; no flag at all means auto.
    pub fn from_flags(auto: bool, standard: bool, historical: bool) -> Self {
        if auto {
            ModeSelection::Auto
        } else if standard {
            ModeSelection::Standard
        } else if historical {
            ModeSelection::Historical
        } else {
            ModeSelection::Auto
        }
    }
}

/// Serial parameters that replace the selected mode's defaults when set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SerialOverrides {
    pub baud_rate: Option<u32>,
    pub data_bits: Option<DataBits>,
    pub parity: Option<Parity>,
    pub stop_bits: Option<StopBits>,
}

impl SerialOverrides {
    /// Builds overrides from raw CLI values. A zero baud rate or frame size is unset.
    pub fn from_args(
        baud_rate: Option<u32>,
        frame_size: Option<u8>,
        parity: Option<&str>,
        stop_bits: Option<&str>,
    ) -> Result<Self, TicError> {
        Ok(SerialOverrides {
            baud_rate: baud_rate.filter(|b| *b != 0),
            data_bits: frame_size
                .filter(|s| *s != 0)
                .map(parse_data_bits)
                .transpose()?,
            parity: parity
                .filter(|p| !p.is_empty())
                .map(parse_parity)
                .transpose()?,
            stop_bits: stop_bits
                .filter(|s| !s.is_empty())
                .map(parse_stop_bits)
                .transpose()?,
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == SerialOverrides::default()
    }
}

/// Effective link parameters for every read of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    pub device: String,
    pub mode: TicMode,
    pub baud_rate: u32,
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
}

impl LinkConfig {
    /// Takes every serial parameter from `mode`.
    pub fn from_mode(device: impl Into<String>, mode: &LinkMode) -> Self {
        LinkConfig {
            device: device.into(),
            mode: mode.mode,
            baud_rate: mode.baud_rate,
            data_bits: mode.data_bits,
            parity: mode.parity,
            stop_bits: mode.stop_bits,
        }
    }

    pub fn with_overrides(mut self, overrides: &SerialOverrides) -> Self {
        if let Some(baud_rate) = overrides.baud_rate {
            self.baud_rate = baud_rate;
        }
        if let Some(data_bits) = overrides.data_bits {
            self.data_bits = data_bits;
        }
        if let Some(parity) = overrides.parity {
            self.parity = parity;
        }
        if let Some(stop_bits) = overrides.stop_bits {
            self.stop_bits = stop_bits;
        }
        self
    }

    /// Builds the active configuration once, detecting the mode for
    /// [`ModeSelection::Auto`]. Overrides are layered on the chosen mode.
    pub async fn resolve<O: LinkOpener>(
        opener: &O,
        device: &str,
        selection: ModeSelection,
        overrides: &SerialOverrides,
        catalog: &ModeCatalog,
    ) -> Result<LinkConfig, TicError> {
        let mode = match selection {
            ModeSelection::Auto => detect_mode(opener, device, catalog).await?,
            ModeSelection::Standard => catalog.get(TicMode::Standard),
            ModeSelection::Historical => catalog.get(TicMode::Historical),
        };

        let config = LinkConfig::from_mode(device, &mode).with_overrides(overrides);
        debug!("Resolved link configuration: {config}");
        Ok(config)
    }
}

impl fmt::Display for LinkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "device={} mode={} baudrate={} framesize={} parity={:?} stopbits={:?}",
            self.device,
            self.mode,
            self.baud_rate,
            data_bits_width(self.data_bits),
            self.parity,
            self.stop_bits
        )
    }
}

/// Parses a parity name (`ParityEven` or `E`, ...).
///
/// Mark and space parity are recognised but the serial backend cannot open
/// them, so they are rejected.
pub fn parse_parity(value: &str) -> Result<Parity, TicError> {
    match value {
        "ParityNone" | "N" => Ok(Parity::None),
        "ParityOdd" | "O" => Ok(Parity::Odd),
        "ParityEven" | "E" => Ok(Parity::Even),
        "ParityMark" | "M" | "ParitySpace" | "S" => Err(TicError::InvalidParity(format!(
            "{value} is not supported by the serial backend"
        ))),
        _ => Err(TicError::InvalidParity(value.to_string())),
    }
}

/// Parses a stop bit name (`Stop1` or `1`, ...).
pub fn parse_stop_bits(value: &str) -> Result<StopBits, TicError> {
    match value {
        "Stop1" | "1" => Ok(StopBits::One),
        "Stop2" | "2" => Ok(StopBits::Two),
        "Stop1Half" | "15" => Err(TicError::InvalidStopBits(format!(
            "{value} is not supported by the serial backend"
        ))),
        _ => Err(TicError::InvalidStopBits(value.to_string())),
    }
}

pub fn parse_data_bits(value: u8) -> Result<DataBits, TicError> {
    match value {
        5 => Ok(DataBits::Five),
        6 => Ok(DataBits::Six),
        7 => Ok(DataBits::Seven),
        8 => Ok(DataBits::Eight),
        other => Err(TicError::InvalidDataBits(other)),
    }
}
