//! # tic-rs - A Rust Crate for the TIC (Télé-Information Client) Protocol
//!
//! The tic-rs crate decodes the serial tele-information output of French
//! residential electricity meters (Linky and its electronic predecessors) into
//! typed readings, ready to be handed to a metrics exporter.
//!
//! ## Features
//!
//! - Auto-detect the link mode (standard 9600 baud or historical 1200 baud)
//! - Synchronize on the STX/ETX delimited frames of a noisy line stream
//! - Decode the historical and standard label schemas into typed readings
//! - Unpack the standard-mode status word and relay byte
//! - Tolerate unknown labels and malformed values (zero-value fallback)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tic_rs::{connect, ModeSelection, SerialOverrides, TicReading};
//!
//! # async fn example() -> Result<(), tic_rs::TicError> {
//! let connector = connect("/dev/ttyUSB0", ModeSelection::Auto, &SerialOverrides::default()).await?;
//! match connector.read().await? {
//!     TicReading::Standard(reading) => println!("EAST = {} Wh", reading.east),
//!     TicReading::Historical(reading) => println!("BASE = {} Wh", reading.base),
//! }
//! # Ok(())
//! # }
//! ```

pub mod constants;
pub mod error;
pub mod logging;
pub mod payload;
pub mod tic;

pub use crate::error::TicError;
pub use crate::logging::{init_logger, log_info};

pub use payload::{HistoricalReading, RelayRegister, StandardReading, StatusRegister, TicReading};
pub use tic::{
    LinkConfig, LinkMode, LinkOpener, ModeCatalog, ModeSelection, SerialOpener, SerialOverrides,
    TicConnector, TicMode,
};

/// Resolve the link configuration of a serial device and build a connector.
///
/// Detection, when selected, runs once here; every read of the returned
/// connector reuses its result.
///
/// # Arguments
/// * `device` - Serial port path (e.g., "/dev/ttyUSB0")
/// * `selection` - Explicit mode or auto-detection
/// * `overrides` - Serial parameters replacing the mode's defaults
pub async fn connect(
    device: &str,
    selection: ModeSelection,
    overrides: &SerialOverrides,
) -> Result<TicConnector<SerialOpener>, TicError> {
    let catalog = ModeCatalog::default();
    let config = LinkConfig::resolve(&SerialOpener, device, selection, overrides, &catalog).await?;
    Ok(TicConnector::new(config))
}

/// Detect the link mode of a serial device.
///
/// # Returns
/// * `Ok(LinkMode)` - First catalog mode producing well-formed rows
/// * `Err(TicError::DetectionFailed)` - No mode matched
pub async fn detect(device: &str) -> Result<LinkMode, TicError> {
    tic::detect_mode(&SerialOpener, device, &ModeCatalog::default()).await
}

/// Read one frame from a connector and decode it with the active schema.
pub async fn poll<O: LinkOpener>(connector: &TicConnector<O>) -> Result<TicReading, TicError> {
    connector.read().await
}
