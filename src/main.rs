use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::Path;
use tic_rs::logging::{init_logger_with_debug, log_debug, log_error, log_info, log_warn};
use tic_rs::tic::mode::data_bits_width;
use tic_rs::{ModeSelection, SerialOverrides};

#[derive(Parser)]
#[command(name = "tic-cli")]
#[command(version, about = "CLI tool for the TIC tele-information protocol")]
struct Cli {
    /// Serial device to read
    #[arg(short, long, global = true)]
    device: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Auto detect the TIC mode
    #[arg(long, global = true)]
    auto: bool,

    /// Historical mode
    #[arg(long, global = true)]
    historical: bool,

    /// Standard mode
    #[arg(long, global = true)]
    standard: bool,

    /// Baud rate
    #[arg(short, long = "baud", global = true)]
    baudrate: Option<u32>,

    /// Serial frame size
    #[arg(long, global = true)]
    size: Option<u8>,

    /// Serial parity (ParityNone, N, ParityOdd, O, ParityEven, E)
    #[arg(long, global = true)]
    parity: Option<String>,

    /// Serial stop bits (Stop1, 1, Stop2, 2)
    #[arg(long, global = true)]
    stopbits: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the TIC mode and print the serial settings
    Detect,
    /// Read frames and print the decoded readings as JSON
    Read {
        #[arg(short, long, default_value = "1")]
        count: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger_with_debug(cli.debug);
    if cli.debug {
        log_info("Debug mode enabled !");
    }

    let device = cli.device.context("a device is required")?;
    if !Path::new(&device).exists() {
        log_warn(&format!("Device not found: {device}"));
    }

    let overrides = SerialOverrides::from_args(
        cli.baudrate,
        cli.size,
        cli.parity.as_deref(),
        cli.stopbits.as_deref(),
    )?;

    match cli.command {
        Commands::Detect => {
            let mode = tic_rs::detect(&device)
                .await
                .context("error during auto detection")?;
            println!(
                "mode={} baudrate={} framesize={} parity={:?} stopbits={:?}",
                mode.mode,
                mode.baud_rate,
                data_bits_width(mode.data_bits),
                mode.parity,
                mode.stop_bits
            );
        }
        Commands::Read { count } => {
            let selection = ModeSelection::from_flags(cli.auto, cli.standard, cli.historical);
            let connector = tic_rs::connect(&device, selection, &overrides)
                .await
                .context("error during link configuration")?;
            log_debug(&format!("Active configuration: {}", connector.config()));

            for i in 1..=count {
                match tic_rs::poll(&connector).await {
                    Ok(reading) => println!("{}", serde_json::to_string_pretty(&reading)?),
                    Err(e) if e.is_poll_error() => {
                        log_error(&format!("Poll {i}/{count} failed: {e}"));
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }
    }

    Ok(())
}
