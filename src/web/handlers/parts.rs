use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Form;
use serde::Deserialize;

use crate::service::MoveDirection;
use crate::web::handlers::WebResult;
use crate::web::state::SharedState;
use crate::web::utils::project_redirect;

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct PartNameForm {
    pub name: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct MoveForm {
    pub direction: String,
}

pub async fn add_part_handler(
    State(state): State<SharedState>,
    Path(project_id): Path<i32>,
    Form(form): Form<PartNameForm>,
) -> WebResult<Redirect> {
    state.service.append_part(project_id, &form.name).await?;
    Ok(project_redirect(project_id))
}

pub async fn rename_part_handler(
    State(state): State<SharedState>,
    Path(part_id): Path<i32>,
    Form(form): Form<PartNameForm>,
) -> WebResult<Redirect> {
    let part = state.service.rename_part(part_id, &form.name).await?;
    Ok(project_redirect(part.project_id))
}

pub async fn delete_part_handler(
    State(state): State<SharedState>,
    Path(part_id): Path<i32>,
) -> WebResult<Redirect> {
    let part = state.service.delete_part(part_id).await?;
    Ok(project_redirect(part.project_id))
}

pub async fn move_part_handler(
    State(state): State<SharedState>,
    Path(part_id): Path<i32>,
    Form(form): Form<MoveForm>,
) -> WebResult<Redirect> {
    let direction: MoveDirection = form.direction.parse()?;
    let project_id = state.service.project_id_of_part(part_id).await?;
    state.service.move_part(part_id, direction).await?;
    Ok(project_redirect(project_id))
}
