use clap::Parser;
use house_price_serve::core::batch::predict_csv;
use house_price_serve::utils::logger;
use house_price_serve::{load_artifacts, PredictionService};
use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "batch-predict")]
#[command(about = "Predict house prices for every row of a CSV file")]
struct Args {
    /// CSV with bedrooms, bathrooms, livingArea, condition, schoolsNearby columns
    #[arg(short, long)]
    input: String,

    /// Output CSV (input columns + predicted_price)
    #[arg(short, long)]
    output: String,

    /// Directory holding scaler.json and house_price_model.json
    #[arg(long, default_value = "model")]
    model_dir: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    tracing::info!("📁 Loading artifacts from: {}", args.model_dir);
    let store = match load_artifacts(&args.model_dir).await {
        Ok(store) => store,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code().max(1));
        }
    };
    let service = PredictionService::new(Arc::new(store));

    let input = File::open(&args.input)?;
    let output = BufWriter::new(File::create(&args.output)?);

    match predict_csv(&service, input, output) {
        Ok(processed) => {
            tracing::info!("✅ Predicted {} rows", processed);
            println!("✅ Predicted {} rows", processed);
            println!("📁 Output saved to: {}", args.output);
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ Batch prediction failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code().max(1));
        }
    }
}
