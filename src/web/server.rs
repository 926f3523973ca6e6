use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::catalog::store::ProductCatalog;
use crate::cli::{load_catalog, load_rules, ServeArgs};
use crate::matching::classifier::SafetyClassifier;
use crate::matching::scanner::ProductScanner;
use crate::utils::text::char_len;

/// Longest scanned code accepted over HTTP
pub const MAX_CODE_LENGTH: usize = 128;

/// Request body limit; scan requests are a single short code
pub const MAX_BODY_SIZE: usize = 16 * 1024;

/// Shared application state
pub struct AppState {
    pub catalog: ProductCatalog,
    pub classifier: SafetyClassifier,
}

/// Body of `POST /api/scan`
#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    pub code: String,
}

/// Enhanced error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None,
    }
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the catalog or rules cannot be loaded, the tokio
/// runtime cannot be created, or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    let state = AppState {
        catalog: load_catalog(args.catalog.as_deref())?,
        classifier: SafetyClassifier::new(load_rules(args.rules.as_deref())?),
    };

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args, state).await })
}

/// Create the application router with all routes and middleware configured.
///
/// # Errors
///
/// Returns an error if the rate limiter configuration is rejected.
pub fn create_router(state: AppState) -> anyhow::Result<Router> {
    let state = Arc::new(state);

    // Configure IP-based rate limiting
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10) // 10 requests per second per IP
        .burst_size(50) // Allow bursts of 50 requests
        .finish()
        .ok_or_else(|| anyhow::anyhow!("Invalid rate limit configuration"))?;

    let app = Router::new()
        .route("/api/scan", post(scan_handler))
        .route("/api/catalog", get(catalog_handler))
        .route("/api/rules", get(rules_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                // Security headers for browser protection
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                ))
                // IP-based rate limiting to prevent abuse
                .layer(GovernorLayer {
                    config: Arc::new(governor_conf),
                })
                // Request timeout to prevent slow client attacks
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(10),
                ))
                // Limit concurrent requests to prevent DOS
                .layer(ConcurrencyLimitLayer::new(100))
                .layer(DefaultBodyLimit::max(MAX_BODY_SIZE)),
        );

    Ok(app)
}

async fn run_server(args: ServeArgs, state: AppState) -> anyhow::Result<()> {
    let product_count = state.catalog.len();
    let app = create_router(state)?;

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting maa-scan API at http://{addr} ({product_count} products)");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Resolve and classify one scanned code
async fn scan_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ScanRequest>,
) -> Response {
    let code = request.code.trim();

    if code.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(create_safe_error_response(
                "empty_code",
                "Scanned code must not be empty",
                None,
            )),
        )
            .into_response();
    }

    if char_len(code) > MAX_CODE_LENGTH {
        return (
            StatusCode::BAD_REQUEST,
            Json(create_safe_error_response(
                "code_too_long",
                &format!("Scanned code exceeds {MAX_CODE_LENGTH} characters"),
                None,
            )),
        )
            .into_response();
    }

    let scanner = ProductScanner::new(&state.catalog, &state.classifier);
    Json(scanner.scan(code).to_report()).into_response()
}

/// Return list of products in catalog with their status
async fn catalog_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let products: Vec<serde_json::Value> = state
        .catalog
        .products
        .iter()
        .map(|p| {
            let verdict = state.classifier.classify(p);
            serde_json::json!({
                "code": p.code,
                "name": p.name,
                "brand": p.brand,
                "status": verdict.status,
                "has_ingredient_data": verdict.has_ingredient_data,
            })
        })
        .collect();

    Json(serde_json::json!({
        "count": products.len(),
        "products": products,
    }))
}

/// Return the active rule table
async fn rules_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let rules = state.classifier.rules();
    Json(serde_json::json!({
        "count": rules.len(),
        "rules": rules.rules(),
    }))
}
