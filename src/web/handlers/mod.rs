pub mod api;
pub mod material_types;
pub mod materials;
pub mod parts;
pub mod projects;
pub mod steps;
pub mod uploads;

use axum::http::StatusCode;
use axum::response::Response;

use crate::web::utils::error_page;

/// Result type for handlers; errors render through [`crate::error::TrackerError`]'s `IntoResponse`.
pub type WebResult<T> = std::result::Result<T, crate::error::TrackerError>;

pub async fn not_found_handler() -> Response {
    error_page(StatusCode::NOT_FOUND, "No such page.")
}
