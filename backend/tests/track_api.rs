use std::{io::Write, sync::Arc};

use axum::{
    body::{Body, to_bytes},
    http::Request,
};
use hyper::StatusCode;
use shared::{ApiError, EnrichedPoint, TrackView};
use tower::ServiceExt;
use trackview::{
    AppState, TrackReport,
    config::TrackConfig,
    create_router,
    enrich::{ElevationPolicy, EnrichOptions},
    error::TrackError,
    gpx_import::read_track,
    load_report,
};

const SAMPLE_TRACK: &str = include_str!("../data/sample_track.gpx");

fn test_app() -> axum::Router {
    let track = read_track(SAMPLE_TRACK.as_bytes()).expect("track");
    let report =
        TrackReport::from_points(&track.name, &track.points, &EnrichOptions::default())
            .expect("report");
    create_router(AppState {
        report: Arc::new(report),
    })
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn index_serves_the_page() {
    let (status, body) = get(test_app(), "/").await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("/api/track"));
}

#[tokio::test]
async fn track_endpoint_returns_view() {
    let (status, body) = get(test_app(), "/api/track").await;
    assert_eq!(status, StatusCode::OK);

    let view: TrackView = serde_json::from_slice(&body).unwrap();
    assert_eq!(view.title, "Overview of route");
    assert_eq!(view.track_name, "Rhine climb");
    assert_eq!(view.path.len(), 7);
    // the point without elevation is left out of the profile
    assert_eq!(view.profile.len(), 6);
    assert_eq!(view.summary.max_height_m, Some(320));
    assert_eq!(view.summary_lines[1], "Maximum Height: 320 m");
    assert!(view.path.iter().all(|p| (-10.0..=10.0).contains(&p.slope_percent)));
}

#[tokio::test]
async fn points_endpoint_returns_enriched_points() {
    let (status, body) = get(test_app(), "/api/points").await;
    assert_eq!(status, StatusCode::OK);

    let points: Vec<EnrichedPoint> = serde_json::from_slice(&body).unwrap();
    assert_eq!(points.len(), 7);
    assert_eq!(points[0].cumulative_distance_m, 0.0);
    assert!(points.windows(2).all(|w| w[1].cumulative_distance_m >= w[0].cumulative_distance_m));

    // repeated position: no distance added, flat slope despite the 1 m rise
    assert_eq!(points[3].cumulative_distance_m, points[2].cumulative_distance_m);
    assert_eq!(points[3].slope_percent, Some(0.0));

    // unknown elevation propagates into both adjacent slopes
    assert_eq!(points[5].elevation, None);
    assert_eq!(points[5].slope_percent, None);
    assert_eq!(points[6].slope_percent, None);

    assert!(points[0].time.is_some());
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let (status, body) = get(test_app(), "/api/nothing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let err: ApiError = serde_json::from_slice(&body).unwrap();
    assert!(err.message.contains("/api/nothing"));
}

#[test]
fn load_report_reads_file_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SAMPLE_TRACK.as_bytes()).unwrap();

    let report = load_report(&TrackConfig::new(file.path(), 30.0)).unwrap();
    let last = report.points.last().unwrap();
    assert!((last.elapsed_seconds - last.cumulative_distance_m / (30.0 / 3.6)).abs() < 1e-6);
    assert_eq!(
        report.view.summary.total_km,
        (last.cumulative_distance_m / 1000.0).round() as i64
    );
}

#[test]
fn load_report_with_zero_speed() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SAMPLE_TRACK.as_bytes()).unwrap();

    let report = load_report(&TrackConfig::new(file.path(), 0.0)).unwrap();
    assert!(report.points.iter().all(|p| p.elapsed_seconds == 0.0));
    assert_eq!(report.view.summary.estimated_duration_s, 0.0);
}

#[test]
fn load_report_rejects_missing_elevation_when_asked() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SAMPLE_TRACK.as_bytes()).unwrap();

    let mut config = TrackConfig::new(file.path(), 30.0);
    config.enrich.elevation_policy = ElevationPolicy::Reject;
    assert!(matches!(
        load_report(&config),
        Err(TrackError::MissingElevation { index: 5 })
    ));
}

#[test]
fn load_report_fails_on_missing_and_malformed_files() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.gpx");
    assert!(matches!(
        load_report(&TrackConfig::new(&missing, 30.0)),
        Err(TrackError::Io { .. })
    ));

    let broken = dir.path().join("broken.gpx");
    std::fs::write(&broken, "<gpx><trk><trkseg>").unwrap();
    assert!(matches!(
        load_report(&TrackConfig::new(&broken, 30.0)),
        Err(TrackError::Gpx(_))
    ));
}
