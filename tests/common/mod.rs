#![allow(dead_code)]

use std::sync::Arc;

use tempfile::TempDir;

use stitchlog::entities::{material_type, part, project};
use stitchlog::service::{MaterialTypeInput, NewProject, TrackerService};
use stitchlog::storage::{LocalFileStorage, LocalStorage};

/// Service over a fresh in-memory database and a temporary upload directory.
///
/// Keep the returned `TempDir` alive for the duration of the test.
pub async fn setup() -> (TrackerService, TempDir) {
    let upload_dir = TempDir::new().unwrap();
    let storage = LocalStorage::in_memory().await.unwrap();
    let files = LocalFileStorage::new(upload_dir.path()).await.unwrap();
    (TrackerService::new(storage, Arc::new(files)), upload_dir)
}

pub async fn create_project(service: &TrackerService, title: &str, tags: &[&str]) -> project::Model {
    service
        .create_project(NewProject {
            title: title.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        })
        .await
        .unwrap()
}

pub async fn create_material_type(service: &TrackerService, brand: &str, name: &str) -> material_type::Model {
    service
        .create_material_type(MaterialTypeInput {
            brand: brand.to_string(),
            name: name.to_string(),
            description: None,
            external_link: None,
        })
        .await
        .unwrap()
}

/// Part names of a project in position order.
pub async fn part_names(service: &TrackerService, project_id: i32) -> Vec<String> {
    service
        .list_parts(project_id)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect()
}

/// Asserts that positions are exactly 0..count in order.
pub fn assert_contiguous(parts: &[part::Model]) {
    let positions: Vec<i32> = parts.iter().map(|p| p.position).collect();
    let expected: Vec<i32> = (0..parts.len() as i32).collect();
    assert_eq!(positions, expected);
}
