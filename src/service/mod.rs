//! Domain service layer for the crochet tracker.
//!
//! [`TrackerService`] is the single entry point the web handlers talk to. It
//! owns an explicit database handle and a file storage handle, and runs every
//! mutating operation inside one transaction so a half-applied change (for
//! example a part deleted without its neighbours being renumbered) can never
//! be observed.
//!
//! Operations are grouped by entity:
//! - [`projects`](self::projects) - listing, search, create/edit and the cascading delete
//! - [`tags`](self::tags) - tag normalization and find-or-create
//! - [`parts`](self::parts) - part ordering (append, delete with compaction, swap)
//! - [`steps`](self::steps) - instructions and completion toggles
//! - [`materials`](self::materials) and [`material_types`](self::material_types) - the catalog
//! - [`counters`](self::counters) - round and made-count counters

pub mod counters;
pub mod material_types;
pub mod materials;
pub mod parts;
pub mod projects;
pub mod steps;
pub mod tags;

use std::sync::Arc;

use log::warn;
use sea_orm::DatabaseConnection;

use crate::entities::{material, material_type, part, project, step, tag};
use crate::storage::{FileStorage, LocalStorage};

pub use counters::{CounterAction, CounterKind};
pub use material_types::MaterialTypeInput;
pub use parts::MoveDirection;
pub use projects::{NewProject, ProjectEdit};
pub use tags::{normalize_tag_names, split_tag_input};

/// A file received from a form upload.
#[derive(Clone, Debug, Default)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// A project row with its tags, as shown on the listing page.
#[derive(Clone, Debug)]
pub struct ProjectListing {
    pub project: project::Model,
    pub tags: Vec<tag::Model>,
}

/// A material together with its catalog entry.
#[derive(Clone, Debug)]
pub struct MaterialLine {
    pub material: material::Model,
    pub material_type: Option<material_type::Model>,
}

/// A part with its steps in insertion order.
#[derive(Clone, Debug)]
pub struct PartWithSteps {
    pub part: part::Model,
    pub steps: Vec<step::Model>,
}

impl PartWithSteps {
    pub fn completed_count(&self) -> usize {
        self.steps.iter().filter(|s| s.completed).count()
    }
}

/// Everything the project page shows.
#[derive(Clone, Debug)]
pub struct ProjectDetail {
    pub project: project::Model,
    pub tags: Vec<tag::Model>,
    pub materials: Vec<MaterialLine>,
    pub parts: Vec<PartWithSteps>,
}

/// Service holding the store and file storage handles.
#[derive(Clone)]
pub struct TrackerService {
    storage: LocalStorage,
    files: Arc<dyn FileStorage>,
}

impl TrackerService {
    pub fn new(storage: LocalStorage, files: Arc<dyn FileStorage>) -> Self {
        Self { storage, files }
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    pub fn files(&self) -> &Arc<dyn FileStorage> {
        &self.files
    }

    fn conn(&self) -> &DatabaseConnection {
        &self.storage.conn
    }

    /// Remove a stored file, logging instead of failing.
    async fn remove_file(&self, stored_name: &str) {
        if let Err(e) = self.files.delete(stored_name).await {
            warn!("Could not remove stored file {stored_name}: {e}");
        }
    }
}
