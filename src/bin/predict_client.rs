use clap::Parser;
use house_price_serve::adapters::http_client::PredictionClient;
use house_price_serve::utils::logger;
use house_price_serve::HouseFeatures;

#[derive(Parser)]
#[command(name = "predict-client")]
#[command(about = "Send one prediction request to a running house-price-serve")]
struct Args {
    /// Base URL of the server
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    url: String,

    #[arg(long)]
    bedrooms: f64,

    #[arg(long)]
    bathrooms: f64,

    #[arg(long)]
    living_area: f64,

    #[arg(long)]
    condition: f64,

    #[arg(long)]
    schools_nearby: f64,

    /// Also query /health
    #[arg(long)]
    health: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let client = match PredictionClient::new(&args.url) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    if args.health {
        match client.health().await {
            Ok(health) => println!(
                "🩺 {} v{} ({}, loaded at {})",
                health.status, health.version, health.estimator, health.loaded_at
            ),
            Err(e) => eprintln!("⚠️ Health check failed: {}", e),
        }
    }

    let features = HouseFeatures {
        bedrooms: args.bedrooms,
        bathrooms: args.bathrooms,
        living_area: args.living_area,
        condition: args.condition,
        schools_nearby: args.schools_nearby,
    };

    match client.predict(&features).await {
        Ok(response) => println!("💰 predicted_price: {}", response.predicted_price),
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code().max(1));
        }
    }
}
