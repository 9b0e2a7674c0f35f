//! framescan Command-Line Interface
//!
//! A headless smoke harness for the capture engine: drives a complete
//! capture session against a synthetic frame source and a stub decoder,
//! without camera hardware.

mod colors;
mod exit_codes;
mod synthetic;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use exit_codes::ExitCode;
use framescan::{CaptureSession, NullLightMonitor, SessionEvent, SurfaceHandle};
use framescan_types::{BarcodeFormat, CaptureResult, ScanMode, ScanRequest, ALL_FORMATS};
use synthetic::{StatusViewfinder, StubDecoder, SyntheticSource};

/// framescan - Barcode capture-session smoke harness
#[derive(Parser, Debug)]
#[command(name = "fscan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output in JSON format for scripting
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a scan session against the synthetic frame source
    Scan {
        /// Format to scan for (wire name, repeatable), e.g. CODE_39
        #[arg(long = "format")]
        formats: Vec<String>,

        /// Scan mode preset, e.g. QR_CODE_MODE
        #[arg(long)]
        mode: Option<String>,

        /// Status prompt shown while scanning
        #[arg(long)]
        prompt: Option<String>,

        /// Pause before delivering the result, in milliseconds
        #[arg(long, default_value_t = 0)]
        display_duration_ms: u64,

        /// Frames that miss before the stub decoder reports a hit
        #[arg(long, default_value_t = 3)]
        miss_frames: usize,
    },
    /// List supported symbologies and mode presets
    Formats,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG controls engine logging; default keeps smoke runs quiet.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let code = match cli.command {
        Commands::Scan {
            formats,
            mode,
            prompt,
            display_duration_ms,
            miss_frames,
        } => {
            run_scan(
                formats,
                mode,
                prompt,
                display_duration_ms,
                miss_frames,
                cli.json,
                cli.quiet,
            )
            .await
        }
        Commands::Formats => list_formats(cli.json),
    };

    std::process::exit(code.as_i32());
}

async fn run_scan(
    format_names: Vec<String>,
    mode_name: Option<String>,
    prompt: Option<String>,
    display_duration_ms: u64,
    miss_frames: usize,
    json: bool,
    quiet: bool,
) -> ExitCode {
    let mut formats = Vec::new();
    for name in &format_names {
        match BarcodeFormat::from_name(name) {
            Some(format) => formats.push(format),
            None => {
                eprintln!("{}", colors::error(&format!("unknown format: {}", name)));
                return ExitCode::InvalidArguments;
            }
        }
    }

    let mode = match &mode_name {
        Some(name) => match ScanMode::from_wire_name(name) {
            Some(mode) => Some(mode),
            None => {
                eprintln!("{}", colors::error(&format!("unknown mode: {}", name)));
                return ExitCode::InvalidArguments;
            }
        },
        None => None,
    };

    let request = ScanRequest {
        formats,
        mode,
        prompt_message: prompt,
        result_display_duration_ms: display_duration_ms,
        ..Default::default()
    };

    let handle = CaptureSession::spawn(
        Box::new(SyntheticSource::new()),
        Arc::new(StubDecoder::new(miss_frames)),
        Box::new(NullLightMonitor),
        Box::new(StatusViewfinder::new(quiet)),
    );
    let mut events = handle.subscribe();

    handle.surface_ready(SurfaceHandle::from_raw(1));
    handle.start(request);

    let code = loop {
        match events.recv().await {
            Ok(SessionEvent::StateChanged(state)) => {
                if !quiet {
                    eprintln!("{}", colors::dim(&format!("state: {:?}", state)));
                }
            }
            Ok(SessionEvent::Fatal { reason }) => {
                eprintln!("{}", colors::error(&reason));
                break ExitCode::CaptureFailed;
            }
            Ok(SessionEvent::ResultReady(reply)) => {
                if json {
                    println!("{}", serde_json::to_string_pretty(&reply).unwrap());
                } else {
                    let result = CaptureResult::from_extras(&reply);
                    println!(
                        "{} {}",
                        colors::success(result.contents().unwrap_or("")),
                        colors::dim(&format!("({})", result.format_name().unwrap_or("unknown")))
                    );
                }
                break ExitCode::Success;
            }
            Err(_) => break ExitCode::GeneralError,
        }
    };

    handle.close().await;
    code
}

fn list_formats(json: bool) -> ExitCode {
    if json {
        let names: Vec<&str> = ALL_FORMATS.iter().map(BarcodeFormat::name).collect();
        println!("{}", serde_json::to_string_pretty(&names).unwrap());
        return ExitCode::Success;
    }

    println!("{}", colors::header("FORMATS"));
    for format in ALL_FORMATS {
        println!("  {}", format.name());
    }
    println!();
    println!("{}", colors::header("MODES"));
    for mode in [
        ScanMode::Product,
        ScanMode::OneD,
        ScanMode::QrCode,
        ScanMode::DataMatrix,
    ] {
        let expansion = mode
            .formats()
            .iter()
            .map(|f| f.name())
            .collect::<Vec<_>>()
            .join(", ");
        println!("  {:<18} {}", mode.wire_name(), colors::dim(&expansion));
    }
    ExitCode::Success
}
