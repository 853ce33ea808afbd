use clap::Parser;
use rustlora_core::Notification;
use rustlora_tools::{parse_hex, read_input};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lora-envelope-decode")]
struct Args {
    /// File holding the hex-encoded envelope. Reads stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,
    /// Pretty-print the JSON document.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let text = read_input(args.input.as_deref())?;
    let bytes = parse_hex(&text)?;
    log::debug!("decoding {} byte envelope", bytes.len());

    match Notification::decode_durable(&bytes) {
        Ok(notification) => {
            let doc = if args.pretty {
                notification.encode_external_pretty()?
            } else {
                notification.encode_external()?
            };
            println!("kind: {}", notification.kind());
            println!("{doc}");
        }
        Err(e) => {
            eprintln!("decode failed: {e}");
            std::process::exit(1);
        }
    }
    Ok(())
}
