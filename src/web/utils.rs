//! Shared helpers for the handlers: error responses, redirects and form decoding.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::Multipart;
use log::{error, warn};

use crate::error::TrackerError;
use crate::service::Upload;
use crate::web::views;

impl TrackerError {
    /// HTTP status reported for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            TrackerError::NotFound { .. } => StatusCode::NOT_FOUND,
            TrackerError::Validation(_) => StatusCode::BAD_REQUEST,
            TrackerError::Constraint(_) => StatusCode::CONFLICT,
            TrackerError::FileStorage(_) | TrackerError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for TrackerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {self}");
            return error_page(status, "Something went wrong on our side.");
        }
        warn!("Request rejected ({}): {self}", status.as_u16());
        error_page(status, &self.to_string())
    }
}

/// Build an HTML error page response.
pub fn error_page(status: StatusCode, message: &str) -> Response {
    (status, Html(views::error_page(status, message))).into_response()
}

/// Build a standard JSON error response.
pub fn api_error(status: StatusCode, message: impl Into<String>) -> Response {
    let body = serde_json::json!({ "error": message.into() });
    (status, axum::Json(body)).into_response()
}

pub fn project_redirect(project_id: i32) -> Redirect {
    Redirect::to(&format!("/project/{project_id}"))
}

pub fn materials_redirect() -> Redirect {
    Redirect::to("/materials")
}

/// Fields of the multipart project create/edit form.
#[derive(Debug, Default)]
pub struct ProjectForm {
    pub title: String,
    pub external_link: Option<String>,
    pub notes: Option<String>,
    /// Comma separated tag names
    pub tags: String,
    pub thumbnail: Option<Upload>,
    pub remove_thumbnail: bool,
}

/// Decode the multipart project form.
///
/// A file input left empty by the browser arrives as a part with an empty
/// file name and no bytes; it is treated as "no upload".
pub async fn read_project_form(mut multipart: Multipart, max_upload_bytes: usize) -> Result<ProjectForm, Response> {
    let mut form = ProjectForm::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err(error_page(e.status(), &e.body_text())),
        };

        let name = field.name().unwrap_or_default().to_string();
        if name == "thumbnail" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| error_page(e.status(), &e.body_text()))?;
            if bytes.len() > max_upload_bytes {
                return Err(error_page(
                    StatusCode::PAYLOAD_TOO_LARGE,
                    &format!("Thumbnail exceeds maximum size of {max_upload_bytes} bytes"),
                ));
            }
            if !file_name.trim().is_empty() && !bytes.is_empty() {
                form.thumbnail = Some(Upload {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| error_page(e.status(), &e.body_text()))?;
        match name.as_str() {
            "title" => form.title = value,
            "external_link" => form.external_link = Some(value),
            "notes" => form.notes = Some(value),
            "tags" => form.tags = value,
            "remove_thumbnail" => form.remove_thumbnail = !value.is_empty(),
            _ => {}
        }
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(TrackerError::not_found("Project", 1).status(), StatusCode::NOT_FOUND);
        assert_eq!(TrackerError::validation("title").status(), StatusCode::BAD_REQUEST);
        assert_eq!(TrackerError::Constraint("UNIQUE".into()).status(), StatusCode::CONFLICT);
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(TrackerError::from(io).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_redirects_use_see_other() {
        let response = project_redirect(4).into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/project/4");
    }
}
