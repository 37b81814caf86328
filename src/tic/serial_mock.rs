//! Mock serial link implementation for testing
//!
//! This module provides an in-memory link and opener that can be used to test
//! detection and poll cycles without a meter attached. Scripts are keyed by
//! baud rate, the way a real meter only makes sense at its own speed.

use crate::error::TicError;
use crate::tic::config::LinkConfig;
use crate::tic::serial::LinkOpener;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::io;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, ReadBuf};

/// Bytes served by one opened link.
#[derive(Debug, Clone, Default)]
pub struct MockScript {
    pub data: Vec<u8>,
    /// Error returned once `data` is drained, instead of end of stream.
    pub error_at_end: Option<io::ErrorKind>,
    /// Byte repeated forever once `data` is drained.
    pub noise: Option<u8>,
    /// The open consuming this script fails.
    pub refuse_open: bool,
}

impl MockScript {
    pub fn new(data: &[u8]) -> Self {
        MockScript {
            data: data.to_vec(),
            ..Default::default()
        }
    }

    pub fn failing(data: &[u8], kind: io::ErrorKind) -> Self {
        MockScript {
            data: data.to_vec(),
            error_at_end: Some(kind),
            ..Default::default()
        }
    }

    /// A line that never goes quiet, like a meter read at the wrong speed.
    pub fn endless(data: &[u8], noise: u8) -> Self {
        MockScript {
            data: data.to_vec(),
            noise: Some(noise),
            ..Default::default()
        }
    }

    /// One failed open; the following script is served to the next open.
    pub fn refused() -> Self {
        MockScript {
            refuse_open: true,
            ..Default::default()
        }
    }
}

/// One opened in-memory link. Dropping it marks the link as released.
pub struct MockLink {
    rx_buffer: VecDeque<u8>,
    error_at_end: Option<io::ErrorKind>,
    noise: Option<u8>,
    live_links: Arc<AtomicUsize>,
}

impl MockLink {
    fn new(script: MockScript, live_links: Arc<AtomicUsize>) -> Self {
        live_links.fetch_add(1, Ordering::SeqCst);
        MockLink {
            rx_buffer: script.data.into(),
            error_at_end: script.error_at_end,
            noise: script.noise,
            live_links,
        }
    }
}

impl Drop for MockLink {
    fn drop(&mut self) {
        self.live_links.fetch_sub(1, Ordering::SeqCst);
    }
}

impl AsyncRead for MockLink {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();

        if this.rx_buffer.is_empty() {
            if let Some(kind) = this.error_at_end.take() {
                return Poll::Ready(Err(io::Error::new(kind, "mock link failure")));
            }
            if let Some(byte) = this.noise {
                let n = buf.remaining();
                buf.put_slice(&vec![byte; n]);
                return Poll::Ready(Ok(()));
            }
            return Poll::Ready(Ok(()));
        }

        let available = this.rx_buffer.len().min(buf.remaining());
        let data: Vec<u8> = this.rx_buffer.drain(..available).collect();
        buf.put_slice(&data);
        Poll::Ready(Ok(()))
    }
}

/// Opener serving scripted links.
///
/// Each open at a baud rate consumes the next queued script; the last script
/// keeps being served. Baud rates without a script open to an empty stream.
#[derive(Clone, Default)]
pub struct MockOpener {
    scripts: Arc<Mutex<HashMap<u32, VecDeque<MockScript>>>>,
    failing: Arc<Mutex<HashSet<u32>>>,
    opened: Arc<Mutex<Vec<LinkConfig>>>,
    live_links: Arc<AtomicUsize>,
}

impl MockOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes served by the next link opened at `baud_rate`.
    pub fn respond_at(&self, baud_rate: u32, data: &[u8]) -> &Self {
        self.queue_script(baud_rate, MockScript::new(data))
    }

    pub fn queue_script(&self, baud_rate: u32, script: MockScript) -> &Self {
        self.scripts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(baud_rate)
            .or_default()
            .push_back(script);
        self
    }

    /// Make every open at `baud_rate` fail.
    pub fn fail_at(&self, baud_rate: u32) -> &Self {
        self.failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(baud_rate);
        self
    }

    /// Configurations of every open attempt, in order.
    pub fn opened(&self) -> Vec<LinkConfig> {
        self.opened
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of links opened and not yet released.
    pub fn live_links(&self) -> usize {
        self.live_links.load(Ordering::SeqCst)
    }

    fn next_script(&self, baud_rate: u32) -> MockScript {
        let mut scripts = self.scripts.lock().unwrap_or_else(PoisonError::into_inner);
        match scripts.get_mut(&baud_rate) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_default(),
            Some(queue) => queue.front().cloned().unwrap_or_default(),
            None => MockScript::default(),
        }
    }
}

#[async_trait]
impl LinkOpener for MockOpener {
    type Link = MockLink;

    async fn open(&self, config: &LinkConfig) -> Result<MockLink, TicError> {
        self.opened
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(config.clone());

        let fails = self
            .failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&config.baud_rate);
        let script = if fails {
            MockScript::refused()
        } else {
            self.next_script(config.baud_rate)
        };
        if script.refuse_open {
            return Err(TicError::DeviceOpenFailed {
                device: config.device.clone(),
                reason: "mock open failure".to_string(),
            });
        }

        Ok(MockLink::new(script, Arc::clone(&self.live_links)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tic::mode::LinkMode;
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn test_script_served_and_released() {
        let opener = MockOpener::new();
        opener.respond_at(1200, b"ADCO 0123 A\r\n");
        let config = LinkConfig::from_mode("/dev/null", &LinkMode::HISTORICAL);

        let mut link = opener.open(&config).await.unwrap();
        assert_eq!(opener.live_links(), 1);
        let mut out = Vec::new();
        link.read_to_end(&mut out).await.unwrap();
        assert_eq!(out, b"ADCO 0123 A\r\n");

        drop(link);
        assert_eq!(opener.live_links(), 0);
    }

    #[tokio::test]
    async fn test_last_script_repeats() {
        let opener = MockOpener::new();
        opener.respond_at(9600, b"first").respond_at(9600, b"second");
        let config = LinkConfig::from_mode("/dev/null", &LinkMode::STANDARD);

        for expected in [&b"first"[..], b"second", b"second"] {
            let mut link = opener.open(&config).await.unwrap();
            let mut out = Vec::new();
            link.read_to_end(&mut out).await.unwrap();
            assert_eq!(out, expected);
        }
        assert_eq!(opener.opened().len(), 3);
    }

    #[tokio::test]
    async fn test_error_at_end() {
        let opener = MockOpener::new();
        opener.queue_script(9600, MockScript::failing(b"abc", io::ErrorKind::BrokenPipe));
        let config = LinkConfig::from_mode("/dev/null", &LinkMode::STANDARD);

        let mut link = opener.open(&config).await.unwrap();
        let mut out = Vec::new();
        let err = link.read_to_end(&mut out).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[tokio::test]
    async fn test_endless_noise() {
        let opener = MockOpener::new();
        opener.queue_script(9600, MockScript::endless(b"A", 0xF8));
        let config = LinkConfig::from_mode("/dev/null", &LinkMode::STANDARD);

        let mut link = opener.open(&config).await.unwrap();
        let mut out = [0u8; 16];
        link.read_exact(&mut out).await.unwrap();
        assert_eq!(out[0], b'A');
        assert!(out[1..].iter().all(|b| *b == 0xF8));
    }

    #[tokio::test]
    async fn test_open_failure() {
        let opener = MockOpener::new();
        opener.fail_at(1200);
        let config = LinkConfig::from_mode("/dev/null", &LinkMode::HISTORICAL);

        let result = opener.open(&config).await;
        assert!(matches!(result, Err(TicError::DeviceOpenFailed { .. })));
        assert_eq!(opener.live_links(), 0);
    }
}
