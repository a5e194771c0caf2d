//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tracing::error;

use crate::domain::Dimension;
use crate::filters::{Board, Reconciliation};
use crate::marta::MartaError;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(board_page))
        .route("/health", get(health))
        .route("/arrivals", get(arrivals))
        .route("/api/options", get(options))
        .route("/refresh", post(refresh))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Build the board for a request against the latest snapshot.
async fn open_board(state: &AppState, query: &BoardQuery) -> (Board, Reconciliation) {
    let snapshot = state.store.current().await;
    Board::open(snapshot, query.selection(), query.page())
}

fn render<T: Template>(template: &T) -> Result<String, AppError> {
    template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })
}

/// The arrivals board page.
async fn board_page(
    State(state): State<AppState>,
    Query(query): Query<BoardQuery>,
) -> Result<Html<String>, AppError> {
    let (board, reconciliation) = open_board(&state, &query).await;
    let template = BoardTemplate::new(&board, &reconciliation, state.refresh_interval);
    Ok(Html(render(&template)?))
}

/// One page of the filtered arrival list.
async fn arrivals(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<BoardQuery>,
) -> Result<Response, AppError> {
    let (board, reconciliation) = open_board(&state, &query).await;

    if accepts_html(&headers) {
        let template = ArrivalListTemplate {
            list: ArrivalListView::from_board(&board),
        };
        return Ok(Html(render(&template)?).into_response());
    }

    let view = board.view();
    let index = board.index();
    Ok(Json(ArrivalsResponse {
        selection: board.selection().clone(),
        cleared: ClearedSelection::from_reconciliation(&reconciliation),
        page: view.page(),
        page_count: view.page_count(),
        page_size: view.page_size(),
        total: view.len(),
        arrivals: view
            .current_items()
            .iter()
            .map(|r| ArrivalResult::from_record(r, index))
            .collect(),
        fetched_at: format_timestamp(board.snapshot().fetched_at()),
    })
    .into_response())
}

/// Filter options with their disabled flags.
async fn options(
    State(state): State<AppState>,
    Query(query): Query<BoardQuery>,
) -> Json<OptionsResponse> {
    let (board, reconciliation) = open_board(&state, &query).await;

    Json(OptionsResponse {
        selection: board.selection().clone(),
        cleared: ClearedSelection::from_reconciliation(&reconciliation),
        destinations: board.options(Dimension::Destination),
        lines: board.options(Dimension::Line),
        stations: board.options(Dimension::Station),
    })
}

/// Fetch a fresh snapshot now instead of waiting for the poller.
async fn refresh(State(state): State<AppState>) -> Result<Json<RefreshResponse>, AppError> {
    let snapshot = state
        .store
        .refresh_from(state.provider.as_ref())
        .await
        .map_err(AppError::from)?;

    Ok(Json(RefreshResponse {
        arrivals: snapshot.len(),
        fetched_at: format_timestamp(snapshot.fetched_at()),
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// The arrivals provider failed
    Upstream { message: String },
    Internal { message: String },
}

impl From<MartaError> for AppError {
    fn from(e: MartaError) -> Self {
        AppError::Upstream {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        error!(%status, "{message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
