use axum::{
    extract::Query,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use connect4::{request_config, search_position, GameError, MoveResponse};
use tokio::{net::TcpListener, task::JoinError};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, error, info, warn};

const LISTEN_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let app = app_router();

    let listener = TcpListener::bind(LISTEN_ADDR).await?;
    info!("Listening on http://{LISTEN_ADDR}");
    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("info,tower_http=debug")
        .try_init();
}

fn app_router() -> Router {
    let api = Router::new().route("/move", get(handle_move));
    Router::new()
        .nest("/api", api)
        .layer(
            CorsLayer::new()
                .allow_methods([axum::http::Method::GET])
                .allow_origin(axum::http::HeaderValue::from_static("*"))
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
}

#[derive(Debug, serde::Deserialize)]
struct MoveQuery {
    #[serde(default)]
    position: String,
    level: u8,
}

async fn handle_move(Query(query): Query<MoveQuery>) -> Result<impl IntoResponse, ApiError> {
    // Reject oversized levels before any search work is scheduled.
    let config = request_config(query.level)?;
    let MoveQuery { position, level } = query;
    debug!(%position, level, "searching");

    let mv: MoveResponse =
        tokio::task::spawn_blocking(move || search_position(&position, config)).await??;
    info!(column = mv.column, score = mv.score, nodes = mv.nodes, "move chosen");
    let headers = [(header::CACHE_CONTROL, "no-store")];
    Ok((headers, Json(mv)))
}

/// Bad input is the caller's fault; a crashed search task is ours.
#[derive(Debug)]
enum ApiError {
    Rejected(GameError),
    Internal(JoinError),
}

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        Self::Rejected(err)
    }
}

impl From<JoinError> for ApiError {
    fn from(err: JoinError) -> Self {
        Self::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Rejected(err) => {
                let body = err.to_string();
                warn!(error = %body, "rejected move request");
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            ApiError::Internal(err) => {
                error!(error = %err, "search task failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "search failed").into_response()
            }
        }
    }
}
