//! Shared application state.

use std::sync::Arc;

use crate::repositories::ProjectSort;
use crate::service::TrackerService;

/// State handed to every handler.
pub struct AppState {
    pub service: TrackerService,
    /// Sort used by the project list when the request names none.
    pub default_sort: ProjectSort,
    pub max_upload_bytes: usize,
}

pub type SharedState = Arc<AppState>;
