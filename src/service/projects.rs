//! Project listing, creation, editing and the cascading delete.

use chrono::Utc;
use log::{debug, info};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseTransaction, EntityTrait, IntoActiveModel, QueryFilter,
    TransactionTrait,
};

use crate::entities::{part, project};
use crate::error::{optional, require, Result};
use crate::repositories::{
    MaterialRepository, PartRepository, ProjectRepository, ProjectSort, StepRepository, TagRepository,
};

use super::tags::{attach_tags, normalize_tag_names};
use super::{MaterialLine, PartWithSteps, ProjectDetail, ProjectListing, TrackerService, Upload};

/// Input for a new project.
#[derive(Clone, Debug, Default)]
pub struct NewProject {
    pub title: String,
    pub external_link: Option<String>,
    pub notes: Option<String>,
    pub tags: Vec<String>,
    pub thumbnail: Option<Upload>,
}

/// Input for editing an existing project.
#[derive(Clone, Debug, Default)]
pub struct ProjectEdit {
    pub title: String,
    pub external_link: Option<String>,
    pub notes: Option<String>,
    /// Replaces the current thumbnail when present.
    pub thumbnail: Option<Upload>,
    pub remove_thumbnail: bool,
}

impl TrackerService {
    /// List projects, optionally filtered by a title/tag search.
    pub async fn list_projects(&self, search_query: Option<&str>, sort: ProjectSort) -> Result<Vec<ProjectListing>> {
        let conn = self.conn();
        let projects = match search_query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(query) => ProjectRepository::search(conn, query, sort).await?,
            None => ProjectRepository::get_all(conn, sort).await?,
        };

        let mut listings = Vec::with_capacity(projects.len());
        for project in projects {
            let tags = ProjectRepository::get_tags(conn, &project).await?;
            listings.push(ProjectListing { project, tags });
        }
        Ok(listings)
    }

    /// Get a single project.
    pub async fn get_project(&self, project_id: i32) -> Result<project::Model> {
        ProjectRepository::fetch(self.conn(), project_id).await
    }

    /// Load a project with its tags, materials and parts.
    pub async fn project_detail(&self, project_id: i32) -> Result<ProjectDetail> {
        let conn = self.conn();
        let project = ProjectRepository::fetch(conn, project_id).await?;
        let tags = ProjectRepository::get_tags(conn, &project).await?;

        let materials = MaterialRepository::get_for_project_with_types(conn, project_id)
            .await?
            .into_iter()
            .map(|(material, material_type)| MaterialLine {
                material,
                material_type,
            })
            .collect();

        let parts = PartRepository::get_for_project(conn, project_id).await?;
        let steps = StepRepository::get_for_parts(conn, parts.iter().map(|p| p.id).collect()).await?;
        let parts = parts
            .into_iter()
            .map(|part| {
                let own = steps.iter().filter(|s| s.part_id == part.id).cloned().collect();
                PartWithSteps { part, steps: own }
            })
            .collect();

        Ok(ProjectDetail {
            project,
            tags,
            materials,
            parts,
        })
    }

    /// Create a project, storing its thumbnail and attaching its tags.
    pub async fn create_project(&self, input: NewProject) -> Result<project::Model> {
        let title = require("title", &input.title)?;
        let tag_names = normalize_tag_names(&input.tags);

        let thumbnail = match input.thumbnail.filter(|t| !t.file_name.trim().is_empty()) {
            Some(upload) => Some(self.files.save(&upload.bytes, &upload.file_name).await?),
            None => None,
        };

        let model = project::ActiveModel {
            id: ActiveValue::NotSet,
            title: ActiveValue::Set(title),
            thumbnail: ActiveValue::Set(thumbnail.clone()),
            external_link: ActiveValue::Set(optional(input.external_link.as_deref())),
            notes: ActiveValue::Set(optional(input.notes.as_deref())),
            current_round: ActiveValue::Set(super::CounterKind::Round.floor()),
            made_count: ActiveValue::Set(super::CounterKind::MadeCount.floor()),
            created_at: ActiveValue::Set(Utc::now()),
        };

        match self.insert_project(model, &tag_names).await {
            Ok(project) => {
                info!("Created project {} ({:?})", project.id, project.title);
                Ok(project)
            }
            Err(e) => {
                if let Some(stored) = &thumbnail {
                    self.remove_file(stored).await;
                }
                Err(e)
            }
        }
    }

    async fn insert_project(&self, model: project::ActiveModel, tag_names: &[String]) -> Result<project::Model> {
        let txn = self.conn().begin().await?;
        let inserted = model.insert(&txn).await?;
        attach_tags(&txn, inserted.id, tag_names).await?;
        txn.commit().await?;
        Ok(inserted)
    }

    /// Edit title, link, notes and thumbnail of a project.
    pub async fn update_project(&self, project_id: i32, edit: ProjectEdit) -> Result<project::Model> {
        let title = require("title", &edit.title)?;

        let txn = self.conn().begin().await?;
        let existing = ProjectRepository::fetch(&txn, project_id).await?;
        let old_thumbnail = existing.thumbnail.clone();

        let new_thumbnail = match edit.thumbnail.filter(|t| !t.file_name.trim().is_empty()) {
            Some(upload) => Some(self.files.save(&upload.bytes, &upload.file_name).await?),
            None => None,
        };

        let mut active_model = existing.into_active_model();
        active_model.title = ActiveValue::Set(title);
        active_model.external_link = ActiveValue::Set(optional(edit.external_link.as_deref()));
        active_model.notes = ActiveValue::Set(optional(edit.notes.as_deref()));
        if new_thumbnail.is_some() {
            active_model.thumbnail = ActiveValue::Set(new_thumbnail.clone());
        } else if edit.remove_thumbnail {
            active_model.thumbnail = ActiveValue::Set(None);
        }

        let updated = match commit_update(txn, active_model).await {
            Ok(updated) => updated,
            Err(e) => {
                if let Some(stored) = &new_thumbnail {
                    self.remove_file(stored).await;
                }
                return Err(e);
            }
        };

        if let Some(old) = old_thumbnail.filter(|old| updated.thumbnail.as_ref() != Some(old)) {
            self.remove_file(&old).await;
        }

        debug!("Updated project {project_id}");
        Ok(updated)
    }

    /// Replace the free-text notes of a project.
    pub async fn update_notes(&self, project_id: i32, notes: &str) -> Result<project::Model> {
        let txn = self.conn().begin().await?;
        let project = ProjectRepository::fetch(&txn, project_id).await?;
        let mut active_model = project.into_active_model();
        active_model.notes = ActiveValue::Set(optional(Some(notes)));
        let project = ProjectRepository::update(&txn, active_model).await?;
        txn.commit().await?;
        Ok(project)
    }

    /// Delete a project with its parts, steps, materials and tag links.
    ///
    /// The thumbnail file is removed first, best-effort. Tag and material
    /// type rows are left in place.
    pub async fn delete_project(&self, project_id: i32) -> Result<()> {
        let project = ProjectRepository::fetch(self.conn(), project_id).await?;

        if let Some(thumbnail) = &project.thumbnail {
            self.remove_file(thumbnail).await;
        }

        let txn = self.conn().begin().await?;
        let part_ids: Vec<i32> = PartRepository::get_for_project(&txn, project_id)
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();
        let steps = StepRepository::delete_for_parts(&txn, part_ids).await?;
        let parts = part::Entity::delete_many()
            .filter(part::Column::ProjectId.eq(project_id))
            .exec(&txn)
            .await?
            .rows_affected;
        let materials = MaterialRepository::delete_for_project(&txn, project_id).await?;
        TagRepository::detach_all(&txn, project_id).await?;
        ProjectRepository::delete(&txn, project).await?;
        txn.commit().await?;

        info!("Deleted project {project_id} ({parts} parts, {steps} steps, {materials} materials)");
        Ok(())
    }
}

async fn commit_update(txn: DatabaseTransaction, active_model: project::ActiveModel) -> Result<project::Model> {
    let updated = ProjectRepository::update(&txn, active_model).await?;
    txn.commit().await?;
    Ok(updated)
}
