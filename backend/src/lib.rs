pub mod config;
pub mod enrich;
pub mod error;
pub mod geodesy;
pub mod gpx_import;
pub mod summary;
pub mod view;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, Uri},
    response::Html,
    routing::get,
};
use shared::{ApiError, EnrichedPoint, RawPoint, TrackView};
use tower_http::trace::TraceLayer;

use crate::config::TrackConfig;
use crate::enrich::{EnrichOptions, enrich};
use crate::error::TrackError;
use crate::gpx_import::read_track_file;
use crate::summary::summarize;
use crate::view::build_view;

const INDEX_HTML: &str = include_str!("../static/index.html");

/// The enriched track together with the data handed to the page.
#[derive(Debug, Clone)]
pub struct TrackReport {
    pub points: Vec<EnrichedPoint>,
    pub view: TrackView,
}

impl TrackReport {
    pub fn from_points(
        name: &str,
        points: &[RawPoint],
        options: &EnrichOptions,
    ) -> Result<Self, TrackError> {
        let points = enrich(points, options)?;
        let summary = summarize(name, &points);
        let view = build_view(summary, &points);
        Ok(Self { points, view })
    }
}

/// Read the configured file and run the whole computation once.
pub fn load_report(config: &TrackConfig) -> Result<TrackReport, TrackError> {
    let track = read_track_file(&config.input_path)?;
    let report = TrackReport::from_points(&track.name, &track.points, &config.enrich)?;
    tracing::info!(
        "{}: {} points, {} km, max height {:?} m",
        report.view.track_name,
        report.points.len(),
        report.view.summary.total_km,
        report.view.summary.max_height_m
    );
    Ok(report)
}

#[derive(Clone)]
pub struct AppState {
    pub report: Arc<TrackReport>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/track", get(track_handler))
        .route("/api/points", get(points_handler))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn track_handler(State(state): State<AppState>) -> Json<TrackView> {
    Json(state.report.view.clone())
}

async fn points_handler(State(state): State<AppState>) -> Json<Vec<EnrichedPoint>> {
    Json(state.report.points.clone())
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError {
            message: format!("no resource at {uri}"),
        }),
    )
}
