use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::Form;
use serde::Deserialize;

use crate::service::MaterialTypeInput;
use crate::web::handlers::WebResult;
use crate::web::state::SharedState;
use crate::web::utils::materials_redirect;
use crate::web::views;

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct MaterialTypeForm {
    pub brand: String,
    pub name: String,
    pub description: Option<String>,
    pub external_link: Option<String>,
}

impl From<MaterialTypeForm> for MaterialTypeInput {
    fn from(form: MaterialTypeForm) -> Self {
        MaterialTypeInput {
            brand: form.brand,
            name: form.name,
            description: form.description,
            external_link: form.external_link,
        }
    }
}

pub async fn materials_page(State(state): State<SharedState>) -> WebResult<Html<String>> {
    let catalog = state.service.list_material_types().await?;
    Ok(Html(views::materials_page(&catalog)))
}

pub async fn create_material_type_handler(
    State(state): State<SharedState>,
    Form(form): Form<MaterialTypeForm>,
) -> WebResult<Redirect> {
    state.service.create_material_type(form.into()).await?;
    Ok(materials_redirect())
}

pub async fn edit_material_type_page(
    State(state): State<SharedState>,
    Path(material_type_id): Path<i32>,
) -> WebResult<Html<String>> {
    let material_type = state.service.get_material_type(material_type_id).await?;
    Ok(Html(views::material_type_edit_page(&material_type)))
}

pub async fn update_material_type_handler(
    State(state): State<SharedState>,
    Path(material_type_id): Path<i32>,
    Form(form): Form<MaterialTypeForm>,
) -> WebResult<Redirect> {
    state
        .service
        .update_material_type(material_type_id, form.into())
        .await?;
    Ok(materials_redirect())
}

pub async fn delete_material_type_handler(
    State(state): State<SharedState>,
    Path(material_type_id): Path<i32>,
) -> WebResult<Redirect> {
    state.service.delete_material_type(material_type_id).await?;
    Ok(materials_redirect())
}
