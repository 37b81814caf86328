//! # TIC Serial Communication
//!
//! This module provides the serial side of the TIC link: the [`LinkOpener`]
//! seam used to acquire a link, its tokio-serial implementation, and the
//! [`TicConnector`] that runs one poll cycle (open, read a frame, decode,
//! release).
//!
//! A link is never shared between polls. Each read acquires its own handle and
//! the handle is dropped, which closes the port, on every exit path.

use crate::error::TicError;
use crate::payload::{HistoricalReading, StandardReading, TicReading};
use crate::tic::config::LinkConfig;
use crate::tic::frame::{read_frame, Frame};
use crate::tic::mode::TicMode;
use async_trait::async_trait;
use log::{debug, error};
use tokio::io::{AsyncRead, BufReader};
use tokio_serial::{SerialPortBuilderExt, SerialStream};

/// Acquires a byte stream for a given link configuration.
#[async_trait]
pub trait LinkOpener: Send + Sync {
    type Link: AsyncRead + Unpin + Send;

    async fn open(&self, config: &LinkConfig) -> Result<Self::Link, TicError>;
}

/// Opens real serial ports through `tokio_serial`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialOpener;

#[async_trait]
impl LinkOpener for SerialOpener {
    type Link = SerialStream;

    async fn open(&self, config: &LinkConfig) -> Result<SerialStream, TicError> {
        tokio_serial::new(config.device.as_str(), config.baud_rate)
            .data_bits(config.data_bits)
            .parity(config.parity)
            .stop_bits(config.stop_bits)
            .open_native_async()
            .map_err(|e| TicError::DeviceOpenFailed {
                device: config.device.clone(),
                reason: e.to_string(),
            })
    }
}

/// Runs poll cycles against one meter with a fixed configuration.
pub struct TicConnector<O: LinkOpener = SerialOpener> {
    config: LinkConfig,
    opener: O,
}

impl TicConnector<SerialOpener> {
    pub fn new(config: LinkConfig) -> Self {
        Self::with_opener(config, SerialOpener)
    }
}

impl<O: LinkOpener> TicConnector<O> {
    pub fn with_opener(config: LinkConfig, opener: O) -> Self {
        TicConnector { config, opener }
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    pub fn mode(&self) -> TicMode {
        self.config.mode
    }

    /// Opens a fresh link, reads exactly one frame and releases the link.
    pub async fn read_frame(&self) -> Result<Frame, TicError> {
        debug!("Read serial with config {}", self.config);
        let link = self.opener.open(&self.config).await?;
        let mut reader = BufReader::new(link);
        read_frame(&mut reader).await
    }

    /// Reads one frame and decodes it with the historical schema.
    pub async fn read_historical(&self) -> Result<HistoricalReading, TicError> {
        let frame = self.read_frame().await.map_err(|e| {
            error!("Failed to read historical serial: {e}");
            e
        })?;
        Ok(HistoricalReading::from_frame(&frame))
    }

    /// Reads one frame and decodes it with the standard schema.
    pub async fn read_standard(&self) -> Result<StandardReading, TicError> {
        let frame = self.read_frame().await.map_err(|e| {
            error!("Failed to read standard serial: {e}");
            e
        })?;
        Ok(StandardReading::from_frame(&frame))
    }

    /// Reads one frame and decodes it with the schema of the active mode.
    pub async fn read(&self) -> Result<TicReading, TicError> {
        match self.config.mode {
            TicMode::Historical => self.read_historical().await.map(TicReading::Historical),
            TicMode::Standard => self.read_standard().await.map(TicReading::Standard),
        }
    }
}
