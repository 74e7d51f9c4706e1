use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Form;
use serde::Deserialize;

use crate::web::handlers::WebResult;
use crate::web::state::SharedState;
use crate::web::utils::project_redirect;

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct StepForm {
    pub round_number: Option<String>,
    pub instructions: String,
}

pub async fn add_step_handler(
    State(state): State<SharedState>,
    Path(part_id): Path<i32>,
    Form(form): Form<StepForm>,
) -> WebResult<Redirect> {
    state
        .service
        .add_step(part_id, form.round_number.as_deref(), &form.instructions)
        .await?;
    let project_id = state.service.project_id_of_part(part_id).await?;
    Ok(project_redirect(project_id))
}

pub async fn edit_step_handler(
    State(state): State<SharedState>,
    Path(step_id): Path<i32>,
    Form(form): Form<StepForm>,
) -> WebResult<Redirect> {
    let step = state
        .service
        .edit_step(step_id, form.round_number.as_deref(), &form.instructions)
        .await?;
    let project_id = state.service.project_id_of_part(step.part_id).await?;
    Ok(project_redirect(project_id))
}

pub async fn delete_step_handler(
    State(state): State<SharedState>,
    Path(step_id): Path<i32>,
) -> WebResult<Redirect> {
    let step = state.service.delete_step(step_id).await?;
    let project_id = state.service.project_id_of_part(step.part_id).await?;
    Ok(project_redirect(project_id))
}

pub async fn toggle_step_handler(
    State(state): State<SharedState>,
    Path(step_id): Path<i32>,
) -> WebResult<Redirect> {
    let step = state.service.toggle_step_completion(step_id).await?;
    let project_id = state.service.project_id_of_part(step.part_id).await?;
    Ok(project_redirect(project_id))
}

pub async fn reset_part_steps_handler(
    State(state): State<SharedState>,
    Path(part_id): Path<i32>,
) -> WebResult<Redirect> {
    state.service.reset_steps_for_part(part_id).await?;
    let project_id = state.service.project_id_of_part(part_id).await?;
    Ok(project_redirect(project_id))
}

pub async fn reset_project_steps_handler(
    State(state): State<SharedState>,
    Path(project_id): Path<i32>,
) -> WebResult<Redirect> {
    state.service.reset_all_steps(project_id).await?;
    Ok(project_redirect(project_id))
}
