use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use log::warn;

use crate::web::state::SharedState;
use crate::web::utils::error_page;

/// Serve a stored thumbnail.
pub async fn upload_handler(State(state): State<SharedState>, Path(file_name): Path<String>) -> Response {
    match state.service.files().read(&file_name).await {
        Ok(Some(bytes)) => {
            let mime = mime_guess::from_path(&file_name).first_or_octet_stream();
            (StatusCode::OK, [(header::CONTENT_TYPE, mime.as_ref())], bytes).into_response()
        }
        Ok(None) => error_page(StatusCode::NOT_FOUND, "No such file."),
        Err(e) if e.kind() == std::io::ErrorKind::InvalidInput => {
            error_page(StatusCode::BAD_REQUEST, "Invalid file name.")
        }
        Err(e) => {
            warn!("Failed to read upload {file_name}: {e}");
            error_page(StatusCode::INTERNAL_SERVER_ERROR, "Could not read file.")
        }
    }
}
