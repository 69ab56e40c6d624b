use clap::Parser;
use house_price_serve::adapters::json_format::decode_any;
use house_price_serve::core::inspect::summarize;
use house_price_serve::utils::logger;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inspect-artifact")]
#[command(about = "Inspect a scaler / estimator artifact and print a quick summary")]
struct Args {
    /// Path to the artifact file
    file: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let bytes = match tokio::fs::read(&args.file).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            eprintln!("❌ File not found: {}", args.file.display());
            std::process::exit(2);
        }
        Err(e) => {
            eprintln!("❌ Failed to read {}: {}", args.file.display(), e);
            std::process::exit(3);
        }
    };

    let metadata = match decode_any(&bytes) {
        Ok(metadata) => metadata,
        Err(reason) => {
            eprintln!("❌ Failed to load {}: {}", args.file.display(), reason);
            std::process::exit(3);
        }
    };

    println!("Summary for: {}\n", args.file.display());
    for line in summarize(metadata.as_ref()) {
        println!("{}", line);
    }
}
