// Site diagnostic binary
//
// Purpose: Run one diagnostic against the live soil/climate providers and
// print the snapshot as JSON
// Usage: cargo run --bin diagnose -- <lat> <lng> [crop ...] [--surface <ha>]

use anyhow::{bail, Context, Result};
use crop_suitability::adapters::{ClimateCache, OpenMeteoArchive, SoilGridsClient};
use crop_suitability::{run_diagnostic, ClimateAdapter, Config, DiagnosticRequest, PlantCatalog, SoilAdapter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: diagnose <lat> <lng> [crop ...] [--surface <ha>]";

fn parse_request(args: &[String]) -> Result<DiagnosticRequest> {
    let [lat, lng, rest @ ..] = args else {
        bail!(USAGE);
    };

    let latitude: f64 = lat.parse().with_context(|| format!("invalid latitude '{}'", lat))?;
    let longitude: f64 = lng.parse().with_context(|| format!("invalid longitude '{}'", lng))?;

    let mut crops = Vec::new();
    let mut surface = None;
    let mut iter = rest.iter();
    while let Some(arg) = iter.next() {
        if arg == "--surface" {
            let value = iter.next().context("--surface needs a value")?;
            surface = Some(value.parse::<f64>().with_context(|| format!("invalid surface '{}'", value))?);
        } else {
            crops.push(arg.clone());
        }
    }

    let mut request = DiagnosticRequest::new(latitude, longitude).with_crops(crops);
    if let Some(ha) = surface {
        request = request.with_surface(ha);
    }
    Ok(request)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays pure JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crop_suitability=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let request = parse_request(&args)?;

    let config = Config::from_env()?;
    tracing::info!("Configuration:");
    tracing::info!("  CLIMATE_API_URL: {}", config.climate_api_url);
    tracing::info!("  SOIL_API_URL: {}", config.soil_api_url);
    tracing::info!("  SOIL_PROVIDER_ENABLED: {}", config.soil_provider_enabled);
    tracing::info!("  CLIMATE_HISTORY_YEARS: {}", config.climate_history_years);

    let catalog = match &config.catalog_path {
        Some(path) => PlantCatalog::from_path(path)?,
        None => PlantCatalog::builtin()?,
    };
    tracing::info!("Loaded {} crops", catalog.len());

    let soil = SoilAdapter::new(SoilGridsClient::new(&config)?, config.soil_provider_enabled);
    let climate = ClimateAdapter::new(OpenMeteoArchive::new(&config)?, config.climate_retry_delay)
        .with_cache(ClimateCache::new(config.climate_cache_ttl));

    let snapshot = run_diagnostic(&catalog, &soil, &climate, &request).await?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
