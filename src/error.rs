//! # TIC Error Handling
//!
//! This module defines the TicError enum, which represents the different error
//! types that can occur in the tic-rs crate.
//!
//! Field-level parse failures are not represented here: a malformed numeric or
//! date value decodes to the field's zero value instead.

use thiserror::Error;

/// Represents the different error types that can occur in the TIC crate.
#[derive(Debug, Error)]
pub enum TicError {
    /// The serial link could not be opened with the requested parameters.
    #[error("Failed to open device {device}: {reason}")]
    DeviceOpenFailed { device: String, reason: String },

    /// No candidate mode produced a well-formed line within the sampling window.
    #[error("Impossible to auto detect TIC mode on {device}")]
    DetectionFailed { device: String },

    /// An I/O error occurred before the end-of-frame marker was observed.
    #[error("Failed to read TIC frame: {0}")]
    FrameReadFailed(String),

    /// Indicates an unknown or unsupported parity setting.
    #[error("Invalid parity: {0}")]
    InvalidParity(String),

    /// Indicates an unknown or unsupported stop bit setting.
    #[error("Invalid stop bits: {0}")]
    InvalidStopBits(String),

    /// Indicates a data bit width outside 5..=8.
    #[error("Invalid frame size: {0}")]
    InvalidDataBits(u8),

    /// Indicates an unknown link mode name.
    #[error("Invalid TIC mode: {0}")]
    InvalidMode(String),
}

impl TicError {
    /// True for errors that abort a single poll but leave the process usable.
    pub fn is_poll_error(&self) -> bool {
        matches!(
            self,
            TicError::DeviceOpenFailed { .. } | TicError::FrameReadFailed(_)
        )
    }
}
