use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::Multipart;
use serde::Deserialize;

use crate::error::TrackerError;
use crate::repositories::ProjectSort;
use crate::service::{split_tag_input, CounterAction, CounterKind, NewProject, ProjectEdit};
use crate::web::handlers::WebResult;
use crate::web::state::SharedState;
use crate::web::utils::{project_redirect, read_project_form};
use crate::web::views;

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct IndexQuery {
    pub search: Option<String>,
    pub sort: Option<String>,
}

pub async fn index_handler(
    State(state): State<SharedState>,
    Query(params): Query<IndexQuery>,
) -> WebResult<Html<String>> {
    // An unknown sort key falls back to the configured default
    let sort = params
        .sort
        .as_deref()
        .and_then(|s| s.parse::<ProjectSort>().ok())
        .unwrap_or(state.default_sort);
    let search = params.search.unwrap_or_default();

    let listings = state.service.list_projects(Some(&search), sort).await?;
    Ok(Html(views::index_page(&listings, &search, sort)))
}

pub async fn new_project_page() -> Html<String> {
    Html(views::project_form_page(None))
}

pub async fn create_project_handler(State(state): State<SharedState>, multipart: Multipart) -> Response {
    let form = match read_project_form(multipart, state.max_upload_bytes).await {
        Ok(form) => form,
        Err(response) => return response,
    };

    let input = NewProject {
        title: form.title,
        external_link: form.external_link,
        notes: form.notes,
        tags: split_tag_input(&form.tags),
        thumbnail: form.thumbnail,
    };
    match state.service.create_project(input).await {
        Ok(project) => project_redirect(project.id).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn project_page(
    State(state): State<SharedState>,
    Path(project_id): Path<i32>,
) -> WebResult<Html<String>> {
    let detail = state.service.project_detail(project_id).await?;
    let catalog = state.service.list_material_types().await?;
    Ok(Html(views::project_detail_page(&detail, &catalog)))
}

pub async fn edit_project_page(
    State(state): State<SharedState>,
    Path(project_id): Path<i32>,
) -> WebResult<Html<String>> {
    let project = state.service.get_project(project_id).await?;
    let tags = state.service.project_tags(project_id).await?;
    Ok(Html(views::project_form_page(Some((&project, tags.as_slice())))))
}

pub async fn update_project_handler(
    State(state): State<SharedState>,
    Path(project_id): Path<i32>,
    multipart: Multipart,
) -> Response {
    let form = match read_project_form(multipart, state.max_upload_bytes).await {
        Ok(form) => form,
        Err(response) => return response,
    };

    let edit = ProjectEdit {
        title: form.title,
        external_link: form.external_link,
        notes: form.notes,
        thumbnail: form.thumbnail,
        remove_thumbnail: form.remove_thumbnail,
    };
    match state.service.update_project(project_id, edit).await {
        Ok(project) => project_redirect(project.id).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete_project_handler(
    State(state): State<SharedState>,
    Path(project_id): Path<i32>,
) -> WebResult<Redirect> {
    state.service.delete_project(project_id).await?;
    Ok(Redirect::to("/"))
}

/// Fields posted by the round and made-count counter buttons.
///
/// Values are raw strings; [`CounterAction::parse`] validates them.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct CounterForm {
    pub action: String,
    pub round_number: Option<String>,
    pub made_count: Option<String>,
}

impl CounterForm {
    fn into_action(self, kind: CounterKind) -> Result<CounterAction, TrackerError> {
        if self.action.trim().is_empty() {
            return Err(TrackerError::validation("action"));
        }
        let value = match kind {
            CounterKind::Round => self.round_number,
            CounterKind::MadeCount => self.made_count,
        };
        CounterAction::parse(kind, self.action.trim(), value.as_deref())
    }
}

async fn update_counter(
    state: &SharedState,
    project_id: i32,
    kind: CounterKind,
    form: CounterForm,
) -> WebResult<Redirect> {
    let action = form.into_action(kind)?;
    state.service.update_counter(project_id, kind, action).await?;
    Ok(project_redirect(project_id))
}

pub async fn update_round_handler(
    State(state): State<SharedState>,
    Path(project_id): Path<i32>,
    Form(form): Form<CounterForm>,
) -> WebResult<Redirect> {
    update_counter(&state, project_id, CounterKind::Round, form).await
}

pub async fn update_made_count_handler(
    State(state): State<SharedState>,
    Path(project_id): Path<i32>,
    Form(form): Form<CounterForm>,
) -> WebResult<Redirect> {
    update_counter(&state, project_id, CounterKind::MadeCount, form).await
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct NotesForm {
    pub notes: String,
}

pub async fn update_notes_handler(
    State(state): State<SharedState>,
    Path(project_id): Path<i32>,
    Form(form): Form<NotesForm>,
) -> WebResult<Redirect> {
    state.service.update_notes(project_id, &form.notes).await?;
    Ok(project_redirect(project_id))
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct TagsForm {
    pub tags: String,
}

pub async fn update_tags_handler(
    State(state): State<SharedState>,
    Path(project_id): Path<i32>,
    Form(form): Form<TagsForm>,
) -> WebResult<Redirect> {
    state
        .service
        .set_tags(project_id, &split_tag_input(&form.tags))
        .await?;
    Ok(project_redirect(project_id))
}
