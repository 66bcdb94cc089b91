//! Kenwood memory channel tool
//! Reads the radio's channel bank into a JSON snapshot, or writes a
//! snapshot back to the radio

use kenwood_memory::drivers::{KenwoodRadio, StatusCallback};
use kenwood_memory::formats::{load_channels, save_channels};
use kenwood_memory::serial::{list_ports, SerialConfig, SerialPort};
use std::env;
use std::time::Duration;
use tracing_subscriber::{fmt::format::FmtSpan, prelude::*, EnvFilter};

/// What to do once the radio is identified
enum Command {
    Identify,
    Read { file: String },
    Write { file: String },
    WriteChannel { file: String, channel: u16 },
}

/// Command line arguments
struct Args {
    port: String,
    config: SerialConfig,
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    let format_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(format_layer)
        .init();

    let Some(args) = parse_args()? else {
        return Ok(());
    };

    tracing::info!("Opening serial port {} at {} baud", args.port, args.config.baud_rate);
    let mut port = SerialPort::open(&args.port, args.config)?;
    port.clear_all()?;

    let mut radio = KenwoodRadio::new(port);

    // Every command starts by making sure a radio is answering
    let model = radio.identify().await?;
    tracing::info!("Connected to {} {}", radio.vendor(), model);

    match args.command {
        Command::Identify => {
            println!("{}", model);
        }
        Command::Read { file } => {
            tracing::info!("Reading memory...");
            radio.read_memory(Some(progress("Read"))).await?;
            save_channels(&file, &radio.occupied_channels())?;
            tracing::info!("Reading done.");
        }
        Command::Write { file } => {
            radio.load_channels(load_channels(&file)?)?;
            tracing::info!("Writing memory...");
            let written = radio.write_memory(Some(progress("Write"))).await?;
            tracing::info!("Writing memory done, {} channels written.", written);
        }
        Command::WriteChannel { file, channel } => {
            radio.load_channels(load_channels(&file)?)?;
            radio.write_channel(channel).await?;
            tracing::info!("Channel {} written.", channel);
        }
    }

    radio.into_transport().close()?;
    Ok(())
}

/// Log progress every 100 channels
fn progress(verb: &'static str) -> StatusCallback {
    Box::new(move |current, total, message| {
        if current % 100 == 0 || current == total {
            tracing::info!("[{}/{}] {}: {}", current, total, verb, message);
        }
    })
}

/// Parse command line arguments; `None` means nothing left to do
fn parse_args() -> anyhow::Result<Option<Args>> {
    let args: Vec<String> = env::args().collect();
    let mut config = SerialConfig::default();
    let mut positional = vec![];

    let mut iter = args[1..].iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--baud" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--baud needs a value"))?;
                config.baud_rate = value.parse()?;
            }
            "--timeout" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--timeout needs a value"))?;
                config.timeout = Duration::try_from_secs_f64(value.parse()?)?;
            }
            "--help" | "-h" => {
                print_usage(&args[0]);
                return Ok(None);
            }
            flag if flag.starts_with('-') => {
                eprintln!("Unknown flag: {}", flag);
                print_usage(&args[0]);
                std::process::exit(1);
            }
            _ => positional.push(arg.clone()),
        }
    }

    if positional.first().map(String::as_str) == Some("ports") {
        for port in list_ports()? {
            println!("{}", port);
        }
        return Ok(None);
    }

    if positional.len() < 2 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    let port = positional[0].clone();
    let file = positional.get(2).cloned();
    let command = match (positional[1].as_str(), file) {
        ("id", None) => Command::Identify,
        ("read", Some(file)) => Command::Read { file },
        ("write", Some(file)) => Command::Write { file },
        ("write-channel", Some(file)) => {
            let channel = positional
                .get(3)
                .ok_or_else(|| anyhow::anyhow!("write-channel needs a channel number"))?
                .parse()?;
            Command::WriteChannel { file, channel }
        }
        (other, _) => {
            eprintln!("Unknown command or missing file: {}", other);
            print_usage(&args[0]);
            std::process::exit(1);
        }
    };

    Ok(Some(Args {
        port,
        config,
        command,
    }))
}

/// Print usage information
fn print_usage(program: &str) {
    eprintln!("Usage: {} [OPTIONS] <port> <command> [args]", program);
    eprintln!("       {} ports", program);
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  id                           Print the radio model");
    eprintln!("  read <file.json>             Read all channels, save the occupied ones");
    eprintln!("  write <file.json>            Write every channel in the file");
    eprintln!("  write-channel <file.json> N  Write channel N from the file");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --baud N        Baud rate (default 9600)");
    eprintln!("  --timeout SECS  Longest wait for a reply line (default 2)");
    eprintln!("  -h, --help      Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} /dev/ttyUSB0 read kenwood-memory.json", program);
    eprintln!("  {} --baud 57600 /dev/ttyUSB0 write kenwood-memory.json", program);
}
