mod common;

use std::sync::Arc;

use axum::body::to_bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Form;
use tempfile::TempDir;

use common::{create_material_type, create_project, setup};
use stitchlog::repositories::ProjectSort;
use stitchlog::web::handlers::{api, parts, projects, uploads};
use stitchlog::web::router::build_router;
use stitchlog::web::state::{AppState, SharedState};

async fn state() -> (SharedState, TempDir) {
    let (service, dir) = setup().await;
    let state = Arc::new(AppState {
        service,
        default_sort: ProjectSort::TitleAsc,
        max_upload_bytes: 1024 * 1024,
    });
    (state, dir)
}

fn counter_form(action: &str, round_number: Option<&str>, made_count: Option<&str>) -> Form<projects::CounterForm> {
    Form(projects::CounterForm {
        action: action.to_string(),
        round_number: round_number.map(str::to_string),
        made_count: made_count.map(str::to_string),
    })
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_router_builds() {
    let (state, _dir) = state().await;
    let _router = build_router(state);
}

#[tokio::test]
async fn test_index_lists_and_filters_projects() {
    let (state, _dir) = state().await;
    create_project(&state.service, "Zebra", &[]).await;
    create_project(&state.service, "Amigurumi Bear", &["toy"]).await;

    let html = projects::index_handler(State(state.clone()), Query(Default::default()))
        .await
        .unwrap()
        .0;
    // Falls back to the configured title order
    let bear = html.find("Amigurumi Bear").unwrap();
    let zebra = html.find("Zebra").unwrap();
    assert!(bear < zebra);

    let query = projects::IndexQuery {
        search: Some("toy".to_string()),
        sort: Some("bogus".to_string()),
    };
    let html = projects::index_handler(State(state), Query(query)).await.unwrap().0;
    assert!(html.contains("Amigurumi Bear"));
    assert!(!html.contains("Zebra"));
}

#[tokio::test]
async fn test_missing_project_is_404() {
    let (state, _dir) = state().await;
    let response = projects::project_page(State(state), Path(12)).await.into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Project 12 not found"));
}

#[tokio::test]
async fn test_counter_form_redirects_to_project() {
    let (state, _dir) = state().await;
    let project = create_project(&state.service, "Hat", &[]).await;

    let response = projects::update_round_handler(
        State(state.clone()),
        Path(project.id),
        counter_form("set", Some("7"), None),
    )
    .await
    .into_response();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], format!("/project/{}", project.id).as_str());
    assert_eq!(state.service.get_project(project.id).await.unwrap().current_round, 7);

    let response = projects::update_made_count_handler(
        State(state.clone()),
        Path(project.id),
        counter_form("increment", None, None),
    )
    .await
    .into_response();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(state.service.get_project(project.id).await.unwrap().made_count, 1);
}

#[tokio::test]
async fn test_counter_form_reads_the_value_for_its_counter() {
    let (state, _dir) = state().await;
    let project = create_project(&state.service, "Hat", &[]).await;

    let response = projects::update_made_count_handler(
        State(state.clone()),
        Path(project.id),
        counter_form("set", Some("9"), Some("3")),
    )
    .await
    .into_response();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let project = state.service.get_project(project.id).await.unwrap();
    assert_eq!(project.made_count, 3);
    assert_eq!(project.current_round, 1);
}

#[tokio::test]
async fn test_bad_form_values_are_400() {
    let (state, _dir) = state().await;
    let project = create_project(&state.service, "Hat", &[]).await;
    let part = state.service.append_part(project.id, "Brim").await.unwrap();

    let response = projects::update_round_handler(
        State(state.clone()),
        Path(project.id),
        counter_form("set", Some("many"), None),
    )
    .await
    .into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = projects::update_round_handler(State(state.clone()), Path(project.id), Form(Default::default()))
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = parts::move_part_handler(
        State(state),
        Path(part.id),
        Form(parts::MoveForm {
            direction: "left".to_string(),
        }),
    )
    .await
    .into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_part_redirects_to_owner() {
    let (state, _dir) = state().await;
    let project = create_project(&state.service, "Bear", &[]).await;
    let head = state.service.append_part(project.id, "Head").await.unwrap();

    let response = parts::delete_part_handler(State(state.clone()), Path(head.id))
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], format!("/project/{}", project.id).as_str());
    assert!(state.service.list_parts(project.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_api_returns_json() {
    let (state, _dir) = state().await;
    create_material_type(&state.service, "Drops", "Paris").await;
    create_project(&state.service, "Bear", &["amigurumi"]).await;

    let response = api::search_material_types_handler(
        State(state.clone()),
        Query(api::SearchQuery { q: "par".to_string() }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json[0]["brand"], "Drops");
    assert_eq!(json[0]["name"], "Paris");
    assert!(json[0]["description"].is_null());

    let response = api::search_tags_handler(State(state), Query(api::SearchQuery { q: "AMI".to_string() })).await;
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json, serde_json::json!(["amigurumi"]));
}

#[tokio::test]
async fn test_upload_serving() {
    let (state, _dir) = state().await;
    let stored = state.service.files().save(b"gif89a", "bear.gif").await.unwrap();

    let response = uploads::upload_handler(State(state.clone()), Path(stored)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "image/gif");

    let response = uploads::upload_handler(State(state.clone()), Path("nope.png".to_string())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = uploads::upload_handler(State(state), Path("..".to_string())).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
