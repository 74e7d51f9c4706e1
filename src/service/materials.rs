//! Project materials.

use log::debug;
use sea_orm::{ActiveValue, IntoActiveModel, TransactionTrait};

use crate::entities::material;
use crate::error::{optional, Result};
use crate::repositories::{MaterialRepository, MaterialTypeRepository, ProjectRepository};

use super::TrackerService;

impl TrackerService {
    /// Record that a project uses a catalog material.
    pub async fn add_material(
        &self,
        project_id: i32,
        material_type_id: i32,
        quantity: Option<&str>,
    ) -> Result<material::Model> {
        let txn = self.conn().begin().await?;
        ProjectRepository::fetch(&txn, project_id).await?;
        MaterialTypeRepository::fetch(&txn, material_type_id).await?;
        let material = MaterialRepository::create(
            &txn,
            material::ActiveModel {
                id: ActiveValue::NotSet,
                project_id: ActiveValue::Set(project_id),
                material_type_id: ActiveValue::Set(material_type_id),
                quantity: ActiveValue::Set(optional(quantity)),
            },
        )
        .await?;
        txn.commit().await?;

        debug!("Added material {} to project {}", material.id, project_id);
        Ok(material)
    }

    /// Change the quantity of a material.
    pub async fn update_material(&self, material_id: i32, quantity: Option<&str>) -> Result<material::Model> {
        let txn = self.conn().begin().await?;
        let material = MaterialRepository::fetch(&txn, material_id).await?;
        let mut active_model = material.into_active_model();
        active_model.quantity = ActiveValue::Set(optional(quantity));
        let material = MaterialRepository::update(&txn, active_model).await?;
        txn.commit().await?;
        Ok(material)
    }

    /// Remove a material from its project, returning the removed row.
    pub async fn delete_material(&self, material_id: i32) -> Result<material::Model> {
        let txn = self.conn().begin().await?;
        let material = MaterialRepository::fetch(&txn, material_id).await?;
        MaterialRepository::delete(&txn, material.clone()).await?;
        txn.commit().await?;

        debug!("Deleted material {material_id}");
        Ok(material)
    }

    /// Materials of a project.
    pub async fn list_materials(&self, project_id: i32) -> Result<Vec<material::Model>> {
        ProjectRepository::fetch(self.conn(), project_id).await?;
        MaterialRepository::get_for_project(self.conn(), project_id).await
    }
}
