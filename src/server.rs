//! HTTP upload endpoint.
//!
//! One route: `POST /uploadfile` takes a multipart-uploaded audio file,
//! decodes it, runs the segmentation engine, and returns the accepted
//! segments as a JSON array. The engine run is synchronous and CPU-bound,
//! so it is moved onto the blocking pool.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use tracing::{info, warn};

use crate::decode::Decoder;
use crate::defaults;
use crate::error::{Result, VadSplitError};
use crate::segmenter::Engine;
use crate::transport::{self, EncodedSegment};

#[derive(Clone)]
struct AppState {
    engine: Arc<Engine>,
    decoder: Arc<dyn Decoder>,
}

/// Builds the application router.
pub fn router(engine: Arc<Engine>, decoder: Arc<dyn Decoder>) -> Router {
    let state = AppState { engine, decoder };
    Router::new()
        .route("/uploadfile", post(upload_file))
        .layer(DefaultBodyLimit::max(defaults::MAX_UPLOAD_BYTES))
        .with_state(state)
}

/// Binds `listen` and serves the router until the process exits.
pub async fn serve(listen: &str, engine: Arc<Engine>, decoder: Arc<dyn Decoder>) -> Result<()> {
    let addr: SocketAddr = listen
        .parse()
        .map_err(|e| VadSplitError::ConfigInvalidValue {
            key: "server.listen".to_string(),
            message: format!("{}: {}", listen, e),
        })?;

    let app = router(engine, decoder);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, version = %crate::version_string(), "starting vadsplit upload endpoint");
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> std::result::Result<Json<Vec<EncodedSegment>>, ApiError> {
    let mut payload: Option<Vec<u8>> = None;
    while let Some(field) =
        multipart
            .next_field()
            .await
            .map_err(|e| VadSplitError::InvalidRequest {
                message: format!("malformed multipart body: {}", e),
            })?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| VadSplitError::InvalidRequest {
                    message: format!("failed to read upload: {}", e),
                })?;
            payload = Some(bytes.to_vec());
            break;
        }
    }

    let payload = payload.ok_or_else(|| VadSplitError::InvalidRequest {
        message: "missing 'file' field".to_string(),
    })?;

    let pcm = state.decoder.decode(payload).await?;

    let engine = state.engine.clone();
    let segments = tokio::task::spawn_blocking(move || engine.segment(pcm))
        .await
        .map_err(|e| VadSplitError::Other(format!("segmentation task failed: {}", e)))??;

    info!(segments = segments.len(), "segmented upload");
    Ok(Json(transport::encode_segments(&segments)))
}

/// Error wrapper mapping engine failures onto HTTP responses.
pub struct ApiError(VadSplitError);

impl From<VadSplitError> for ApiError {
    fn from(error: VadSplitError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            VadSplitError::InvalidRequest { .. }
            | VadSplitError::DecodeFailed { .. }
            | VadSplitError::DecoderNotFound { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        warn!(error = %self.0, "request failed");
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}
