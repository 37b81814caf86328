//! The tic module contains the link layer of the TIC protocol: the mode
//! catalog, link configuration, serial acquisition, mode detection and frame
//! synchronization.

pub mod config;
pub mod detect;
pub mod frame;
pub mod mode;
pub mod serial;
pub mod serial_mock;

pub use config::{LinkConfig, ModeSelection, SerialOverrides};
pub use detect::{detect_mode, matches_line_shape, probe_mode};
pub use frame::{read_frame, tokenize_row, Frame, RawRow};
pub use mode::{LinkMode, ModeCatalog, TicMode};
pub use serial::{LinkOpener, SerialOpener, TicConnector};
