//! Launchdash HTTP API
//!
//! HTTP layer for the dashboard, built with Axum.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - Dashboard page
//!
//! ## Dashboard data
//! - `GET /api/v1/layout` - Dropdown and slider description
//! - `GET /api/v1/dataset` - Dataset summary
//!
//! ## Summary tables
//! - `GET /api/v1/summary/outcomes?site=` - Pie chart table
//! - `GET /api/v1/summary/scatter?site=&low=&high=` - Scatter chart table
//!
//! ## Charts
//! - `GET /api/v1/charts/pie?site=` - Pie chart figure
//! - `GET /api/v1/charts/scatter?site=&low=&high=` - Scatter chart figure
//!
//! ## Health
//! - `GET /health/live` - Liveness check
//! - `GET /health/ready` - Readiness check
//! - `GET /health` - Full health status
//!
//! ## WebSocket
//! - `GET /ws` - Dashboard session
//!
//! # Example
//!
//! ```rust,ignore
//! use launchdash::api::{serve, ApiConfig, AppState};
//! use launchdash::dashboard::Dashboard;
//! use launchdash::dataset::load_dataset;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = Arc::new(load_dataset("data/spacex_launch_dash.csv".as_ref())?);
//!     let dashboard = Arc::new(Dashboard::with_defaults(dataset));
//!     let config = ApiConfig::default();
//!
//!     serve(AppState::new(dashboard, config.clone()), &config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::session::websocket_handler;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/layout", get(routes::dashboard::layout))
        .route("/dataset", get(routes::dashboard::dataset_stats))
        .route("/summary/outcomes", get(routes::summary::outcomes))
        .route("/summary/scatter", get(routes::summary::scatter))
        .route("/charts/pie", get(routes::charts::pie_chart))
        .route("/charts/scatter", get(routes::charts::scatter_chart));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::dashboard::index))
        .route("/ws", get(websocket_handler))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Dashboard listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Dashboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::Dashboard;
    use crate::dataset::{Dataset, LaunchRecord, Outcome};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        create_test_app_with(ApiConfig::default())
    }

    fn create_test_app_with(config: ApiConfig) -> Router {
        let dataset = Dataset::new(vec![
            LaunchRecord::new("A", 500.0, Outcome::Success, "v1.1"),
            LaunchRecord::new("A", 2500.0, Outcome::Failure, "FT"),
            LaunchRecord::new("B", 3000.0, Outcome::Failure, "FT"),
            LaunchRecord::new("A", 4000.0, Outcome::Success, "B4"),
            LaunchRecord::new("B", 7000.0, Outcome::Failure, "B5"),
            LaunchRecord::new("A", 9600.0, Outcome::Success, "B5"),
        ])
        .unwrap();
        let dashboard = Arc::new(Dashboard::with_defaults(Arc::new(dataset)));
        build_router(AppState::new(dashboard, config))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_health_live() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/ready")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_not_ready_when_sessions_exhausted() {
        let config = ApiConfig {
            max_sessions: 0,
            ..ApiConfig::default()
        };

        let (status, _) = get_json(create_test_app_with(config.clone()), "/health/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        let (status, json) = get_json(create_test_app_with(config), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "saturated");
    }

    #[tokio::test]
    async fn test_health_full() {
        let (status, json) = get_json(create_test_app(), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["records"], 6);
        assert_eq!(json["sites"], 2);
        assert_eq!(json["sessions"], 0);
    }

    #[tokio::test]
    async fn test_index_page() {
        let app = create_test_app();

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.contains("site-dropdown"));
        assert!(page.contains("payload-slider"));
        assert!(page.contains("opt.value === current"));
    }

    #[tokio::test]
    async fn test_layout() {
        let (status, json) = get_json(create_test_app(), "/api/v1/layout").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["site_dropdown"]["options"][0]["value"], "ALL");
        assert_eq!(json["site_dropdown"]["options"][1]["value"], "A");
        assert_eq!(json["payload_slider"]["value"][0], 500.0);
        assert_eq!(json["payload_slider"]["value"][1], 9600.0);
    }

    #[tokio::test]
    async fn test_dataset_stats() {
        let (status, json) = get_json(create_test_app(), "/api/v1/dataset").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["records"], 6);
        assert_eq!(json["successes"], 3);
    }

    #[tokio::test]
    async fn test_outcomes_all_sites() {
        let (status, json) = get_json(create_test_app(), "/api/v1/summary/outcomes").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["site"], "ALL");
        assert_eq!(json["table"]["kind"], "site_successes");
        assert_eq!(json["table"]["rows"][0]["site"], "A");
        assert_eq!(json["table"]["rows"][0]["success_count"], 3);
        assert_eq!(json["table"]["rows"][1]["success_count"], 0);
    }

    #[tokio::test]
    async fn test_outcomes_single_site() {
        let (status, json) =
            get_json(create_test_app(), "/api/v1/summary/outcomes?site=A").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["table"]["kind"], "outcome_counts");
        assert_eq!(json["table"]["rows"][0]["outcome"], "Yes");
        assert_eq!(json["table"]["rows"][0]["count"], 3);
        assert_eq!(json["table"]["rows"][1]["outcome"], "No");
        assert_eq!(json["table"]["rows"][1]["count"], 1);
    }

    #[tokio::test]
    async fn test_scatter_defaults_to_observed_range() {
        let (status, json) = get_json(create_test_app(), "/api/v1/summary/scatter").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["row_count"], 6);
        assert_eq!(json["payload"]["low"], 500.0);
        assert_eq!(json["payload"]["high"], 9600.0);
    }

    #[tokio::test]
    async fn test_scatter_empty_range() {
        let (status, json) = get_json(
            create_test_app(),
            "/api/v1/summary/scatter?site=ALL&low=5000&high=6000",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["row_count"], 0);
    }

    #[tokio::test]
    async fn test_scatter_single_bound_above_data() {
        let (status, json) =
            get_json(create_test_app(), "/api/v1/summary/scatter?low=9700").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["row_count"], 0);
        assert_eq!(json["payload"]["low"], 9700.0);
        assert_eq!(json["payload"]["high"], 9700.0);
    }

    #[tokio::test]
    async fn test_scatter_single_bound_below_data() {
        let (status, json) =
            get_json(create_test_app(), "/api/v1/summary/scatter?high=100").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["row_count"], 0);
        assert_eq!(json["payload"]["low"], 100.0);
    }

    #[tokio::test]
    async fn test_scatter_single_bound_inside_data() {
        let (status, json) =
            get_json(create_test_app(), "/api/v1/summary/scatter?site=A&low=4000").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["row_count"], 2);
        assert_eq!(json["payload"]["high"], 9600.0);
    }

    #[tokio::test]
    async fn test_scatter_reversed_range_rejected() {
        let (status, json) = get_json(
            create_test_app(),
            "/api/v1/summary/scatter?low=6000&high=5000",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "INVALID_SELECTION");
    }

    #[tokio::test]
    async fn test_pie_chart_figure() {
        let (status, json) = get_json(create_test_app(), "/api/v1/charts/pie?site=B").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"][0]["type"], "pie");
        assert_eq!(json["data"][0]["labels"][0], "No");
        assert_eq!(json["data"][0]["values"][0], 2);
        assert_eq!(
            json["layout"]["title"]["text"],
            "Portion of Successful Missions"
        );
    }

    #[tokio::test]
    async fn test_scatter_chart_empty_figure() {
        let (status, json) = get_json(
            create_test_app(),
            "/api/v1/charts/scatter?low=5000&high=6000",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"].as_array().map(Vec::len), Some(0));
        assert_eq!(
            json["layout"]["xaxis"]["title"]["text"],
            "Payload Mass (kg)"
        );
    }
}
