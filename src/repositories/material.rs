//! Material repository for database operations.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder};

use crate::entities::{material, material_type};
use crate::error::{OrNotFound, Result};

/// Repository for material-related database operations.
pub struct MaterialRepository;

impl MaterialRepository {
    /// Get a single material by id.
    pub async fn get_by_id<C>(conn: &C, id: i32) -> Result<Option<material::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(material::Entity::find_by_id(id).one(conn).await?)
    }

    /// Get a single material by id, failing with `NotFound`.
    pub async fn fetch<C>(conn: &C, id: i32) -> Result<material::Model>
    where
        C: ConnectionTrait,
    {
        Self::get_by_id(conn, id).await?.or_not_found("Material", id)
    }

    /// Get the materials of a project.
    pub async fn get_for_project<C>(conn: &C, project_id: i32) -> Result<Vec<material::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(material::Entity::find()
            .filter(material::Column::ProjectId.eq(project_id))
            .order_by_asc(material::Column::Id)
            .all(conn)
            .await?)
    }

    /// Get the materials of a project together with their catalog entries.
    pub async fn get_for_project_with_types<C>(
        conn: &C,
        project_id: i32,
    ) -> Result<Vec<(material::Model, Option<material_type::Model>)>>
    where
        C: ConnectionTrait,
    {
        Ok(material::Entity::find()
            .filter(material::Column::ProjectId.eq(project_id))
            .find_also_related(material_type::Entity)
            .order_by_asc(material::Column::Id)
            .all(conn)
            .await?)
    }

    /// Delete every material of a project.
    pub async fn delete_for_project<C>(conn: &C, project_id: i32) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        let result = material::Entity::delete_many()
            .filter(material::Column::ProjectId.eq(project_id))
            .exec(conn)
            .await?;
        Ok(result.rows_affected)
    }

    /// Delete every material pointing at a catalog entry, across all projects.
    pub async fn delete_for_material_type<C>(conn: &C, material_type_id: i32) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        let result = material::Entity::delete_many()
            .filter(material::Column::MaterialTypeId.eq(material_type_id))
            .exec(conn)
            .await?;
        Ok(result.rows_affected)
    }

    /// Insert a new material.
    pub async fn create<C>(conn: &C, material: material::ActiveModel) -> Result<material::Model>
    where
        C: ConnectionTrait,
    {
        Ok(material.insert(conn).await?)
    }

    /// Update a material in the database.
    pub async fn update<C>(conn: &C, material: material::ActiveModel) -> Result<material::Model>
    where
        C: ConnectionTrait,
    {
        Ok(material.update(conn).await?)
    }

    /// Delete a material row.
    pub async fn delete<C>(conn: &C, material: material::Model) -> Result<()>
    where
        C: ConnectionTrait,
    {
        material.delete(conn).await?;
        Ok(())
    }
}
