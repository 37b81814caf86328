//! # TIC Frame Reader
//!
//! A meter emits its telemetry as a continuous stream of text lines. One
//! snapshot (a *frame*) is bracketed by the STX (0x02) and ETX (0x03) control
//! bytes, which are embedded in the byte stream and rarely sit on a line of
//! their own.
//!
//! [`read_frame`] skips everything up to the line carrying STX, records each
//! following line as a tokenized [`RawRow`], and stops on the first line
//! carrying ETX. That terminating line is not recorded.

use crate::constants::{
    TIC_ETX, TIC_MAX_LINE_LENGTH, TIC_SEPARATOR_SPACE, TIC_SEPARATOR_TAB, TIC_STX,
};
use crate::error::TicError;
use log::debug;
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

/// Tokens of one physical line inside a frame, in wire order.
pub type RawRow = Vec<String>;

/// One block of rows between the start and end markers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub rows: Vec<RawRow>,
}

impl Frame {
    pub fn new(rows: Vec<RawRow>) -> Self {
        Frame { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RawRow> {
        self.rows.iter()
    }
}

/// Splits a line on spaces and tabs, dropping empty tokens.
pub fn tokenize_row(line: &str) -> RawRow {
    line.split(|c: char| c == TIC_SEPARATOR_SPACE || c == TIC_SEPARATOR_TAB)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads one line, without its trailing CR/LF. Returns `None` at end of stream.
///
/// At most [`TIC_MAX_LINE_LENGTH`] bytes are read; a longer line comes back
/// in pieces, one per call.
pub(crate) async fn read_line<R>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    let n = (&mut *reader)
        .take(TIC_MAX_LINE_LENGTH as u64)
        .read_until(b'\n', buf)
        .await?;
    if n == 0 {
        return Ok(None);
    }
    while matches!(buf.last(), Some(b'\n') | Some(b'\r')) {
        buf.pop();
    }
    Ok(Some(String::from_utf8_lossy(buf).into_owned()))
}

/// Reads exactly one frame from `reader`.
///
/// A stream that ends before any start marker yields an empty frame. A stream
/// that fails, or ends, after the start marker but before the end marker
/// yields [`TicError::FrameReadFailed`] and no partial frame.
pub async fn read_frame<R>(reader: &mut R) -> Result<Frame, TicError>
where
    R: AsyncBufRead + Unpin,
{
    let stx = char::from(TIC_STX);
    let etx = char::from(TIC_ETX);
    let mut started = false;
    let mut rows = Vec::new();
    let mut buf = Vec::with_capacity(128);

    debug!("Read serial data...");
    loop {
        let line = match read_line(reader, &mut buf).await {
            Ok(Some(line)) => line,
            Ok(None) if !started => {
                debug!("Stream ended before start of frame");
                return Ok(Frame::default());
            }
            Ok(None) => {
                return Err(TicError::FrameReadFailed(
                    "link closed before end of frame".to_string(),
                ))
            }
            Err(e) => return Err(TicError::FrameReadFailed(e.to_string())),
        };

        if started && line.contains(etx) {
            break;
        }

        if started {
            debug!("{line}");
            rows.push(tokenize_row(&line));
        }

        if line.contains(stx) {
            started = true;
        }
    }
    debug!("Read serial data ended ! ({} rows)", rows.len());

    Ok(Frame { rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::BufReader;

    #[test]
    fn test_tokenize_mixed_separators() {
        let row = tokenize_row("ADCO\t 031762120214  \tX");
        assert_eq!(row, vec!["ADCO", "031762120214", "X"]);
    }

    #[test]
    fn test_tokenize_blank_line() {
        assert!(tokenize_row(" \t ").is_empty());
    }

    #[tokio::test]
    async fn test_read_frame_skips_preamble() {
        let data = b"HCHC 1 X\r\n\x02\nADCO 0123 A\r\nIINST 002 Y\r\n\x03\x02\n";
        let mut reader = BufReader::new(&data[..]);
        let frame = read_frame(&mut reader).await.unwrap();
        assert_eq!(frame.len(), 2);
        assert_eq!(frame.rows[0], vec!["ADCO", "0123", "A"]);
        assert_eq!(frame.rows[1], vec!["IINST", "002", "Y"]);
    }

    #[tokio::test]
    async fn test_read_frame_no_start_marker() {
        let data = b"ADCO 0123 A\r\nIINST 002 Y\r\n";
        let mut reader = BufReader::new(&data[..]);
        let frame = read_frame(&mut reader).await.unwrap();
        assert!(frame.is_empty());
    }

    #[tokio::test]
    async fn test_read_frame_truncated() {
        let data = b"\x02\nADCO 0123 A\r\n";
        let mut reader = BufReader::new(&data[..]);
        let result = read_frame(&mut reader).await;
        assert!(matches!(result, Err(TicError::FrameReadFailed(_))));
    }
}
