use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Form;
use serde::Deserialize;

use crate::error::TrackerError;
use crate::web::handlers::WebResult;
use crate::web::state::SharedState;
use crate::web::utils::project_redirect;

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct AddMaterialForm {
    pub material_type_id: String,
    pub quantity: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct QuantityForm {
    pub quantity: Option<String>,
}

pub async fn add_material_handler(
    State(state): State<SharedState>,
    Path(project_id): Path<i32>,
    Form(form): Form<AddMaterialForm>,
) -> WebResult<Redirect> {
    let material_type_id: i32 = form
        .material_type_id
        .trim()
        .parse()
        .map_err(|_| TrackerError::validation("material_type_id"))?;
    state
        .service
        .add_material(project_id, material_type_id, form.quantity.as_deref())
        .await?;
    Ok(project_redirect(project_id))
}

pub async fn edit_material_handler(
    State(state): State<SharedState>,
    Path(material_id): Path<i32>,
    Form(form): Form<QuantityForm>,
) -> WebResult<Redirect> {
    let material = state
        .service
        .update_material(material_id, form.quantity.as_deref())
        .await?;
    Ok(project_redirect(material.project_id))
}

pub async fn delete_material_handler(
    State(state): State<SharedState>,
    Path(material_id): Path<i32>,
) -> WebResult<Redirect> {
    let material = state.service.delete_material(material_id).await?;
    Ok(project_redirect(material.project_id))
}
