use clap::Parser;
use rustlora_core::notifications::DataDownPayload;
use rustlora_core::decode_external;
use rustlora_tools::read_input;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lora-downlink-check")]
struct Args {
    /// File holding the downlink request JSON. Reads stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let doc = read_input(args.input.as_deref())?;

    let down: DataDownPayload = match decode_external(&doc) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("invalid downlink request: {e}");
            std::process::exit(1);
        }
    };

    println!("application: {}", down.application_id);
    println!("device:      {}", down.dev_eui);
    println!("reference:   {}", down.reference);
    println!("confirmed:   {}", down.confirmed);
    println!("fPort:       {}", down.f_port);
    println!("data:        {}", hex::encode(&down.data));
    match &down.object {
        Some(object) => println!("object:      {object}"),
        None => println!("object:      (none)"),
    }
    if down.f_port == 0 {
        log::warn!("fPort 0 is reserved for MAC commands");
    }
    Ok(())
}
