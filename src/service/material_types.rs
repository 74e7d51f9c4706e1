//! The material catalog.

use chrono::Utc;
use log::info;
use sea_orm::{ActiveValue, IntoActiveModel, TransactionTrait};

use crate::constants::MATERIAL_SEARCH_LIMIT;
use crate::entities::material_type;
use crate::error::{optional, require, Result};
use crate::repositories::material_type::MaterialTypeSummary;
use crate::repositories::{MaterialRepository, MaterialTypeRepository};

use super::TrackerService;

/// Form input for creating or editing a catalog entry.
#[derive(Clone, Debug, Default)]
pub struct MaterialTypeInput {
    pub brand: String,
    pub name: String,
    pub description: Option<String>,
    pub external_link: Option<String>,
}

impl TrackerService {
    /// All catalog entries ordered by brand and name.
    pub async fn list_material_types(&self) -> Result<Vec<material_type::Model>> {
        MaterialTypeRepository::get_all(self.conn()).await
    }

    /// Get a single catalog entry.
    pub async fn get_material_type(&self, material_type_id: i32) -> Result<material_type::Model> {
        MaterialTypeRepository::fetch(self.conn(), material_type_id).await
    }

    /// Add a catalog entry.
    pub async fn create_material_type(&self, input: MaterialTypeInput) -> Result<material_type::Model> {
        let name = require("name", &input.name)?;

        let txn = self.conn().begin().await?;
        let created = MaterialTypeRepository::create(
            &txn,
            material_type::ActiveModel {
                id: ActiveValue::NotSet,
                brand: ActiveValue::Set(input.brand.trim().to_string()),
                name: ActiveValue::Set(name),
                description: ActiveValue::Set(optional(input.description.as_deref())),
                external_link: ActiveValue::Set(optional(input.external_link.as_deref())),
                created_at: ActiveValue::Set(Utc::now()),
            },
        )
        .await?;
        txn.commit().await?;

        info!("Created material type {} ({} {})", created.id, created.brand, created.name);
        Ok(created)
    }

    /// Edit a catalog entry.
    pub async fn update_material_type(
        &self,
        material_type_id: i32,
        input: MaterialTypeInput,
    ) -> Result<material_type::Model> {
        let name = require("name", &input.name)?;

        let txn = self.conn().begin().await?;
        let existing = MaterialTypeRepository::fetch(&txn, material_type_id).await?;
        let mut active_model = existing.into_active_model();
        active_model.brand = ActiveValue::Set(input.brand.trim().to_string());
        active_model.name = ActiveValue::Set(name);
        active_model.description = ActiveValue::Set(optional(input.description.as_deref()));
        active_model.external_link = ActiveValue::Set(optional(input.external_link.as_deref()));
        let updated = MaterialTypeRepository::update(&txn, active_model).await?;
        txn.commit().await?;
        Ok(updated)
    }

    /// Delete a catalog entry after deleting every material that uses it.
    ///
    /// Returns how many project materials were removed.
    pub async fn delete_material_type(&self, material_type_id: i32) -> Result<u64> {
        let txn = self.conn().begin().await?;
        let material_type = MaterialTypeRepository::fetch(&txn, material_type_id).await?;
        let removed = MaterialRepository::delete_for_material_type(&txn, material_type_id).await?;
        MaterialTypeRepository::delete(&txn, material_type).await?;
        txn.commit().await?;

        info!("Deleted material type {material_type_id} and {removed} materials using it");
        Ok(removed)
    }

    /// Catalog entries whose brand or name contains `query`.
    pub async fn search_material_types(&self, query: &str) -> Result<Vec<MaterialTypeSummary>> {
        MaterialTypeRepository::search(self.conn(), query.trim(), MATERIAL_SEARCH_LIMIT).await
    }
}
