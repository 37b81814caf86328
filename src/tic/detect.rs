//! # TIC Mode Detection
//!
//! Probes each catalog mode in priority order. A probe opens the device with
//! the candidate's serial parameters and samples a few lines; the first line
//! with the shape of a TIC row confirms the candidate. A link opened with the
//! wrong baud rate produces garbage that never has that shape.

use crate::constants::{TIC_DETECT_SAMPLE_LINES, TIC_LINE_SHAPE_PATTERN};
use crate::error::TicError;
use crate::tic::config::LinkConfig;
use crate::tic::frame::read_line;
use crate::tic::mode::{LinkMode, ModeCatalog};
use crate::tic::serial::LinkOpener;
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use tokio::io::BufReader;

static LINE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(TIC_LINE_SHAPE_PATTERN).expect("line shape pattern is valid"));

/// True when `line` looks like `LABEL value(s) C`.
pub fn matches_line_shape(line: &str) -> bool {
    LINE_SHAPE.is_match(line)
}

/// Opens `device` with `mode` and samples up to five lines.
///
/// Open failures count as a non-match. The link is released before returning,
/// whatever the outcome.
pub async fn probe_mode<O: LinkOpener>(opener: &O, device: &str, mode: &LinkMode) -> bool {
    let config = LinkConfig::from_mode(device, mode);
    let link = match opener.open(&config).await {
        Ok(link) => link,
        Err(e) => {
            debug!("Could not open {device} in {} mode: {e}", mode.mode);
            return false;
        }
    };

    let mut reader = BufReader::new(link);
    let mut buf = Vec::with_capacity(128);

    debug!("Read serial data...");
    for i in 1..=TIC_DETECT_SAMPLE_LINES {
        match read_line(&mut reader, &mut buf).await {
            Ok(Some(line)) => {
                debug!("Try line {i}/{TIC_DETECT_SAMPLE_LINES}: {line:?}");
                if matches_line_shape(&line) {
                    return true;
                }
                debug!("Regex not match");
            }
            Ok(None) => {
                debug!("Stream ended after {} lines", i - 1);
                return false;
            }
            Err(e) => debug!("Failed to read line {i}/{TIC_DETECT_SAMPLE_LINES}: {e}"),
        }
    }

    false
}

/// Picks the first catalog mode whose probe succeeds.
pub async fn detect_mode<O: LinkOpener>(
    opener: &O,
    device: &str,
    catalog: &ModeCatalog,
) -> Result<LinkMode, TicError> {
    info!("Trying to auto detect TIC mode...");

    for candidate in catalog.candidates() {
        if probe_mode(opener, device, &candidate).await {
            info!("{} mode detected !", candidate.mode);
            return Ok(candidate);
        }
        debug!("It's not {} mode !", candidate.mode);
    }

    Err(TicError::DetectionFailed {
        device: device.to_string(),
    })
}
