//! Axum router construction.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::web::handlers;
use crate::web::state::SharedState;

/// Room for the non-file multipart fields on top of the thumbnail itself.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the complete router with all pages, form targets and API routes.
pub fn build_router(state: SharedState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes + FORM_OVERHEAD_BYTES);

    Router::new()
        // Projects
        .route("/", get(handlers::projects::index_handler))
        .route(
            "/project/new",
            get(handlers::projects::new_project_page).post(handlers::projects::create_project_handler),
        )
        .route("/project/:project_id", get(handlers::projects::project_page))
        .route(
            "/project/:project_id/edit",
            get(handlers::projects::edit_project_page).post(handlers::projects::update_project_handler),
        )
        .route(
            "/project/:project_id/delete",
            post(handlers::projects::delete_project_handler),
        )
        .route(
            "/project/:project_id/update_round",
            post(handlers::projects::update_round_handler),
        )
        .route(
            "/project/:project_id/update_made_count",
            post(handlers::projects::update_made_count_handler),
        )
        .route(
            "/project/:project_id/update_notes",
            post(handlers::projects::update_notes_handler),
        )
        .route(
            "/project/:project_id/update_tags",
            post(handlers::projects::update_tags_handler),
        )
        .route(
            "/project/:project_id/add_part",
            post(handlers::parts::add_part_handler),
        )
        .route(
            "/project/:project_id/add_material",
            post(handlers::materials::add_material_handler),
        )
        .route(
            "/project/:project_id/reset_steps",
            post(handlers::steps::reset_project_steps_handler),
        )
        // Parts
        .route("/part/:part_id/add_step", post(handlers::steps::add_step_handler))
        .route("/part/:part_id/rename", post(handlers::parts::rename_part_handler))
        .route("/part/:part_id/delete", post(handlers::parts::delete_part_handler))
        .route("/part/:part_id/move", post(handlers::parts::move_part_handler))
        .route(
            "/part/:part_id/reset_steps",
            post(handlers::steps::reset_part_steps_handler),
        )
        // Steps
        .route("/step/:step_id/edit", post(handlers::steps::edit_step_handler))
        .route("/step/:step_id/delete", post(handlers::steps::delete_step_handler))
        .route("/step/:step_id/toggle", post(handlers::steps::toggle_step_handler))
        // Project materials
        .route(
            "/material/:material_id/edit",
            post(handlers::materials::edit_material_handler),
        )
        .route(
            "/material/:material_id/delete",
            post(handlers::materials::delete_material_handler),
        )
        // Material catalog
        .route("/materials", get(handlers::material_types::materials_page))
        .route(
            "/materials/new",
            post(handlers::material_types::create_material_type_handler),
        )
        .route(
            "/materials/:material_type_id/edit",
            get(handlers::material_types::edit_material_type_page)
                .post(handlers::material_types::update_material_type_handler),
        )
        .route(
            "/materials/:material_type_id/delete",
            post(handlers::material_types::delete_material_type_handler),
        )
        // JSON search API
        .route(
            "/api/material-types/search",
            get(handlers::api::search_material_types_handler),
        )
        .route("/api/tags/search", get(handlers::api::search_tags_handler))
        // Uploaded thumbnails
        .route("/uploads/:file_name", get(handlers::uploads::upload_handler))
        .fallback(handlers::not_found_handler)
        .layer(body_limit)
        .with_state(state)
}
