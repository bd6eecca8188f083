// Static Publisher Binary Entry Point
//
// Purpose: fetch all configured stations once and write static JSON files
// Usage: cargo run --features api --bin update_air_quality [OUTPUT_DIR]

use air_quality_rust::publisher::{output_dir, publish};
use air_quality_rust::{AirKoreaClient, AppConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "air_quality_rust=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    if !config.has_api_key() {
        anyhow::bail!("AIR_KOREA_API_KEY is not set");
    }

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| output_dir(&config));

    let client = AirKoreaClient::from_config(&config);
    let summary = publish(&config, &client, &out_dir).await?;

    println!("\nUpdate complete:");
    println!("  OK:     {}", summary.success_count);
    println!("  Failed: {}", summary.error_count);
    println!("  Output: {}", out_dir.display());

    Ok(())
}
