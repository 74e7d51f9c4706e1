//! JSON search endpoints used for autocompletion.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::web::state::SharedState;
use crate::web::utils::api_error;

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct SearchQuery {
    pub q: String,
}

/// `GET /api/material-types/search?q=` returns `[{id, brand, name, description}]`.
pub async fn search_material_types_handler(
    State(state): State<SharedState>,
    Query(params): Query<SearchQuery>,
) -> Response {
    match state.service.search_material_types(&params.q).await {
        Ok(results) => Json(results).into_response(),
        Err(e) => api_error(e.status(), e.to_string()),
    }
}

/// `GET /api/tags/search?q=` returns matching tag names.
pub async fn search_tags_handler(
    State(state): State<SharedState>,
    Query(params): Query<SearchQuery>,
) -> Response {
    match state.service.search_tags(&params.q).await {
        Ok(names) => Json(names).into_response(),
        Err(e) => api_error(e.status(), e.to_string()),
    }
}
