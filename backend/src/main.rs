use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use clap::Parser;
use trackview::{
    AppState,
    config::TrackConfig,
    create_router,
    enrich::{DEFAULT_SPEED_KMH, ElevationPolicy, EnrichOptions},
    geodesy::DistanceFormula,
    load_report,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Show a GPX track on a slope-coloured map with its elevation profile"
)]
struct Args {
    /// Path to the GPX file to analyse
    input: PathBuf,

    /// Assumed average speed in km/h, used for the travel time estimate
    #[arg(long, default_value_t = DEFAULT_SPEED_KMH)]
    speed_kmh: f64,

    /// How to treat points without an elevation
    #[arg(long, value_enum, default_value_t = ElevationPolicy::Propagate)]
    elevation_policy: ElevationPolicy,

    /// Formula for the distance between consecutive points
    #[arg(long, value_enum, default_value_t = DistanceFormula::Haversine)]
    distance: DistanceFormula,

    /// Address the page is served on
    #[arg(long, default_value = "127.0.0.1:8097")]
    addr: SocketAddr,
}

impl Args {
    fn config(&self) -> TrackConfig {
        TrackConfig {
            input_path: self.input.clone(),
            enrich: EnrichOptions {
                speed_kmh: self.speed_kmh,
                elevation_policy: self.elevation_policy,
                distance_formula: self.distance,
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trackview=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = args.config();
    tracing::info!(
        "loading {:?} (speed {} km/h, elevation policy {:?}, {:?} distance)",
        config.input_path,
        config.enrich.speed_kmh,
        config.enrich.elevation_policy,
        config.enrich.distance_formula
    );

    let report = load_report(&config)?;
    let app = create_router(AppState {
        report: Arc::new(report),
    });

    let listener = tokio::net::TcpListener::bind(args.addr).await?;
    tracing::info!("serving track overview on http://{}", args.addr);
    axum::serve(listener, app).await?;

    Ok(())
}
