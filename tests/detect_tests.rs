//! Mode detection tests against scripted links.

use tic_rs::tic::detect::{detect_mode, matches_line_shape, probe_mode};
use tic_rs::tic::serial_mock::{MockOpener, MockScript};
use tic_rs::{LinkMode, ModeCatalog, TicError, TicMode};

const DEVICE: &str = "/dev/ttyMOCK";

const HISTORICAL_LINES: &[u8] = b"\x02\nADCO 031762120214 X\r\nOPTARIF BASE 0\r\nISOUSC 30 9\r\n";
const STANDARD_LINES: &[u8] = b"\x02\nADSC 041876097467 N\r\nVTIC 02 J\r\nNGTF TEMPO F\r\n";
const GARBAGE: &[u8] = b"~~~~\r\n\x7f\x7f\r\n####\r\n????\r\n!!!!\r\n";

/// The standard profile is confirmed first when it yields well-formed rows.
#[tokio::test]
async fn test_standard_confirmed() {
    let opener = MockOpener::new();
    opener.respond_at(9600, STANDARD_LINES);

    let mode = detect_mode(&opener, DEVICE, &ModeCatalog::default()).await.unwrap();
    assert_eq!(mode, LinkMode::STANDARD);
    assert_eq!(opener.opened().len(), 1);
    assert_eq!(opener.live_links(), 0);
}

/// Garbage at 9600 baud falls back to the historical profile.
#[tokio::test]
async fn test_historical_fallback() {
    let opener = MockOpener::new();
    opener.respond_at(9600, GARBAGE).respond_at(1200, HISTORICAL_LINES);

    let mode = detect_mode(&opener, DEVICE, &ModeCatalog::default()).await.unwrap();
    assert_eq!(mode.mode, TicMode::Historical);
    assert_eq!(mode.baud_rate, 1200);

    let bauds: Vec<u32> = opener.opened().iter().map(|c| c.baud_rate).collect();
    assert_eq!(bauds, vec![9600, 1200]);
    assert_eq!(opener.live_links(), 0);
}

/// A profile that cannot be opened is treated as not matching.
#[tokio::test]
async fn test_open_failure_tries_next_candidate() {
    let opener = MockOpener::new();
    opener.fail_at(9600).respond_at(1200, HISTORICAL_LINES);

    let mode = detect_mode(&opener, DEVICE, &ModeCatalog::default()).await.unwrap();
    assert_eq!(mode, LinkMode::HISTORICAL);
    assert_eq!(opener.live_links(), 0);
}

/// Only five lines are sampled per candidate.
#[tokio::test]
async fn test_sampling_window() {
    let mut late = GARBAGE.to_vec();
    late.extend_from_slice(b"ADSC 041876097467 N\r\n");

    let opener = MockOpener::new();
    opener.respond_at(9600, &late);

    assert!(!probe_mode(&opener, DEVICE, &LinkMode::STANDARD).await);
    assert_eq!(opener.live_links(), 0);
}

/// A well-formed fifth line still confirms the candidate.
#[tokio::test]
async fn test_match_on_last_sampled_line() {
    let mut data = GARBAGE[..GARBAGE.len() - 6].to_vec();
    data.extend_from_slice(b"PAPP 00750 2\r\n");

    let opener = MockOpener::new();
    opener.respond_at(1200, &data);

    assert!(probe_mode(&opener, DEVICE, &LinkMode::HISTORICAL).await);
}

/// A newline-free stream is sampled in bounded lines and rejected.
#[tokio::test]
async fn test_endless_line_rejected() {
    let opener = MockOpener::new();
    opener.queue_script(9600, MockScript::endless(b"", 0xF8));

    assert!(!probe_mode(&opener, DEVICE, &LinkMode::STANDARD).await);
    assert_eq!(opener.live_links(), 0);
}

/// A historical meter read at 9600 baud shows up as noise; detection moves on.
#[tokio::test]
async fn test_wrong_speed_noise_falls_back() {
    let opener = MockOpener::new();
    opener
        .queue_script(9600, MockScript::endless(b"\x00\x00", 0xF8))
        .respond_at(1200, HISTORICAL_LINES);

    let mode = detect_mode(&opener, DEVICE, &ModeCatalog::default()).await.unwrap();
    assert_eq!(mode, LinkMode::HISTORICAL);
    assert_eq!(opener.live_links(), 0);
}

/// No candidate matching is a detection failure naming the device.
#[tokio::test]
async fn test_detection_failed() {
    let opener = MockOpener::new();
    opener.respond_at(9600, GARBAGE).respond_at(1200, GARBAGE);

    match detect_mode(&opener, DEVICE, &ModeCatalog::default()).await {
        Err(TicError::DetectionFailed { device }) => assert_eq!(device, DEVICE),
        other => panic!("Expected DetectionFailed, got {other:?}"),
    }
    assert_eq!(opener.opened().len(), 2);
    assert_eq!(opener.live_links(), 0);
}

/// A silent line ends the probe without a match.
#[tokio::test]
async fn test_silent_line() {
    let opener = MockOpener::new();
    assert!(!probe_mode(&opener, DEVICE, &LinkMode::STANDARD).await);
    assert_eq!(opener.live_links(), 0);
}

/// A read error on one line does not end the sampling.
#[tokio::test]
async fn test_read_error_skipped() {
    let opener = MockOpener::new();
    opener.queue_script(
        1200,
        MockScript::failing(b"\xff\xfe\r\n", std::io::ErrorKind::TimedOut),
    );
    assert!(!probe_mode(&opener, DEVICE, &LinkMode::HISTORICAL).await);
    assert_eq!(opener.live_links(), 0);
}

/// Probes open the link with the candidate's own serial settings.
#[tokio::test]
async fn test_probe_uses_profile_settings() {
    let opener = MockOpener::new();
    opener.respond_at(1200, HISTORICAL_LINES);

    probe_mode(&opener, DEVICE, &LinkMode::HISTORICAL).await;
    let config = &opener.opened()[0];
    assert_eq!(config.device, DEVICE);
    assert_eq!(config.mode, TicMode::Historical);
    assert_eq!(config.baud_rate, 1200);
    assert_eq!(config.data_bits, LinkMode::HISTORICAL.data_bits);
    assert_eq!(config.parity, LinkMode::HISTORICAL.parity);
}

/// Line shape: label, value, single checksum character.
#[test]
fn test_line_shapes() {
    assert!(matches_line_shape("ADCO 031762120214 X"));
    assert!(matches_line_shape("MOTDETAT 000000 B"));
    assert!(matches_line_shape("NJOURF+1 00 B"));
    assert!(!matches_line_shape("ADCO 031762120214"));
    assert!(!matches_line_shape("adco 031762120214 X"));
    assert!(!matches_line_shape("ADCO\t031762120214\tX"));
    assert!(!matches_line_shape(""));
}
