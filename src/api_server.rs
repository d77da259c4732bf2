// Axum API Server Module
//
// HTML form front end plus JSON endpoints over the recommendation engine.
// The engine is read-only and shared across requests through an Arc.

use crate::config::ServiceConfig;
use crate::decision::Decision;
use crate::error::{ArtifactError, RecommendError};
use crate::features::FeatureVector;
use crate::recommender::RecommendationEngine;
use askama::Template;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Form, Router,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::ServeDir,
    trace::TraceLayer,
};

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RecommendationEngine>,
    pub static_dir: PathBuf,
}

impl AppState {
    /// Load artifacts; failure means the server must not start
    pub fn new(config: &ServiceConfig) -> Result<Self, ArtifactError> {
        tracing::info!("Initializing recommendation engine...");
        let engine = RecommendationEngine::load(&config.artifact_dir)?;
        Ok(Self::from_engine(engine, config.static_dir.clone()))
    }

    pub fn from_engine(engine: RecommendationEngine, static_dir: PathBuf) -> Self {
        Self {
            engine: Arc::new(engine),
            static_dir,
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        // HTML front end
        .route("/", get(index_page))
        .route("/predict", post(predict_form))

        // JSON API
        .route("/health", get(health_check))
        .route("/api/recommend", post(recommend_json))
        .route("/api/crops", get(list_crops))

        // Crop images
        .nest_service("/static", static_files)

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// HTML Pages
// ============================================================================

#[derive(Template, Default)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub show_result: bool,
    pub result: String,
    pub crop: String,
    pub image_file: String,
    pub reason: String,
    pub error: String,
}

impl IndexTemplate {
    fn with_decision(decision: &Decision) -> Self {
        Self {
            show_result: true,
            result: decision.headline.clone(),
            crop: decision.crop_name.clone().unwrap_or_default(),
            image_file: decision.image_asset.clone(),
            reason: decision.explanation.clone(),
            error: String::new(),
        }
    }

    fn with_error(message: String) -> Self {
        Self {
            error: message,
            ..Self::default()
        }
    }
}

fn render(template: &IndexTemplate) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| format!("Template error: {}", e)))
}

async fn index_page() -> impl IntoResponse {
    render(&IndexTemplate::default())
}

async fn predict_form(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let features = match FeatureVector::from_form(&form) {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!("Rejected form input: {}", e);
            return (StatusCode::BAD_REQUEST, render(&IndexTemplate::with_error(e.to_string())))
                .into_response();
        }
    };

    match state.engine.recommend(&features) {
        Ok(decision) => render(&IndexTemplate::with_decision(&decision)).into_response(),
        Err(e) => {
            tracing::error!("Recommendation failed: {}", e);
            (status_for(&e), render(&IndexTemplate::with_error(e.to_string()))).into_response()
        }
    }
}

// ============================================================================
// JSON Endpoints
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn recommend_json(
    State(state): State<AppState>,
    payload: Result<Json<FeatureVector>, JsonRejection>,
) -> Result<Json<Decision>, AppError> {
    let Json(features) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let decision = state.engine.recommend(&features)?;
    Ok(Json(decision))
}

#[derive(Debug, serde::Serialize)]
struct CropEntry<'a> {
    label: u32,
    name: &'a str,
    image_asset: &'a str,
    explanation: &'a str,
}

async fn list_crops(State(state): State<AppState>) -> impl IntoResponse {
    let labels = state.engine.labels();
    let explanations = state.engine.explanations();

    let crops: Vec<CropEntry> = labels
        .records()
        .into_iter()
        .map(|record| CropEntry {
            label: record.label.0,
            name: &record.name,
            image_asset: &record.image_asset,
            explanation: explanations.explain(&record.name),
        })
        .collect();

    Json(serde_json::json!({
        "rows": crops.len(),
        "data": crops,
    }))
}

// ============================================================================
// Error Handling
// ============================================================================

fn status_for(err: &RecommendError) -> StatusCode {
    match err {
        RecommendError::Input(_) => StatusCode::BAD_REQUEST,
        RecommendError::Classify(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    Recommend(RecommendError),
}

impl From<RecommendError> for AppError {
    fn from(err: RecommendError) -> Self {
        AppError::Recommend(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Recommend(err) => (status_for(&err), err.to_string()),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
