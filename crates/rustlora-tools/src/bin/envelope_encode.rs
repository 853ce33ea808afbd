use clap::Parser;
use rustlora_core::Notification;
use rustlora_tools::{format_hex, read_input, KindArg};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lora-envelope-encode")]
struct Args {
    /// Kind of the JSON document being encoded.
    #[arg(long, value_enum)]
    kind: KindArg,
    /// File holding the external JSON document. Reads stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let kind = args.kind.into_kind();
    let doc = read_input(args.input.as_deref())?;

    let notification = match Notification::decode_external(kind, &doc) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("invalid {kind} document: {e}");
            std::process::exit(1);
        }
    };
    let bytes = notification.encode_durable()?;
    log::info!("encoded {kind} into {} bytes", bytes.len());
    println!("{}", format_hex(&bytes));
    Ok(())
}
