use super::app_error::AppError;
use super::state::HttpServerState;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use tracing::warn;

pub async fn favicon(State(state): State<HttpServerState>) -> Result<impl IntoResponse, AppError> {
    let path = state.favicon_path.as_path();
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(([(header::CONTENT_TYPE, "image/jpeg")], bytes)),
        Err(err) => {
            warn!("favicon file[{}] does not exist: {}", path.display(), err);
            Err(AppError::not_found(anyhow::anyhow!("favicon not found")))
        }
    }
}
