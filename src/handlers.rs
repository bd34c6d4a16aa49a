use crate::config::Config;
use crate::dashboard::{DashboardCharts, DashboardView, FollowTable, MetricCard};
use crate::deltas::ScoreDeltas;
use crate::errors::{AppError, ResultExt};
use crate::models::{LookupOutcome, RankedFollowRow};
use crate::reference_data::ReferenceData;
use crate::render::{render_page, PageState};
use crate::scoring_client::ScoringClient;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Client for the scoring API.
    pub client: ScoringClient,
    /// Falsity table and density samples, loaded once at startup.
    pub reference: Arc<ReferenceData>,
}

impl AppState {
    /// Fetches and classifies a handle, then builds the view when the account was found.
    async fn lookup(&self, handle: &str) -> Result<Option<DashboardView>, AppError> {
        let outcome = self
            .client
            .fetch(handle)
            .await
            .with_context(|| format!("Lookup for '{}'", handle.trim()))?;

        Ok(match outcome {
            LookupOutcome::Found(scores) => Some(DashboardView::build(
                &scores,
                &self.reference,
                self.config.missing_scores,
            )),
            LookupOutcome::NotFound { .. } => None,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub handle: Option<String>,
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "mes-dashboard",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// GET /
///
/// Renders the dashboard page. With `?handle=…` the account is looked up and
/// its scores rendered below the input field.
pub async fn dashboard_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
) -> (StatusCode, Html<String>) {
    let handle = params
        .handle
        .as_deref()
        .map(str::trim)
        .filter(|h| !h.is_empty());

    let Some(handle) = handle else {
        return (StatusCode::OK, Html(render_page(None, &PageState::Empty)));
    };

    let (status, page_state) = match state.lookup(handle).await {
        Ok(Some(view)) => (StatusCode::OK, PageState::Found(Box::new(view))),
        Ok(None) => (StatusCode::OK, PageState::NotFound),
        Err(e) => {
            match e.root() {
                AppError::BadRequest(_) => tracing::info!("Rejected input: {}", e),
                _ => tracing::error!("Dashboard lookup failed: {}", e),
            }
            (e.status_code(), PageState::Failed(e.public_message()))
        }
    };

    (status, Html(render_page(Some(handle), &page_state)))
}

/// GET /api/v1/accounts/:handle
///
/// Returns the dashboard view model as JSON.
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{handle}",
    params(("handle" = String, Path, description = "Twitter handle or numeric ID, with or without leading @")),
    responses(
        (status = 200, description = "Scores found", body = DashboardView),
        (status = 400, description = "Invalid handle"),
        (status = 404, description = "The scoring API has no information for this account"),
        (status = 502, description = "Scoring API unavailable")
    )
)]
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Path(handle): Path<String>,
) -> Result<Json<DashboardView>, AppError> {
    tracing::info!("GET /api/v1/accounts/{}", handle);

    state
        .lookup(&handle)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No information for '{}'", handle)))
}

#[derive(OpenApi)]
#[openapi(
    paths(get_account),
    components(schemas(
        DashboardView,
        MetricCard,
        DashboardCharts,
        FollowTable,
        RankedFollowRow,
        ScoreDeltas
    )),
    tags((name = "mes-dashboard", description = "Misinformation exposure lookups"))
)]
pub struct ApiDoc;

/// Dashboard page, JSON API and API docs. Rate limiting is layered on by the caller.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/api/v1/accounts/:handle", get(get_account))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// Complete application without rate limiting.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
