//! Material type (catalog) repository for database operations.

use sea_orm::sea_query::Condition;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, ModelTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use serde::Serialize;

use crate::entities::material_type;
use crate::error::{OrNotFound, Result};

use super::contains_pattern;

/// Lightweight projection returned by the catalog search endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct MaterialTypeSummary {
    pub id: i32,
    pub brand: String,
    pub name: String,
    pub description: Option<String>,
}

/// Repository for material type database operations.
pub struct MaterialTypeRepository;

impl MaterialTypeRepository {
    /// Get all catalog entries ordered by brand, then name.
    pub async fn get_all<C>(conn: &C) -> Result<Vec<material_type::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(material_type::Entity::find()
            .order_by_asc(material_type::Column::Brand)
            .order_by_asc(material_type::Column::Name)
            .all(conn)
            .await?)
    }

    /// Get a single catalog entry by id.
    pub async fn get_by_id<C>(conn: &C, id: i32) -> Result<Option<material_type::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(material_type::Entity::find_by_id(id).one(conn).await?)
    }

    /// Get a single catalog entry by id, failing with `NotFound`.
    pub async fn fetch<C>(conn: &C, id: i32) -> Result<material_type::Model>
    where
        C: ConnectionTrait,
    {
        Self::get_by_id(conn, id).await?.or_not_found("MaterialType", id)
    }

    /// Search brand or name, case-insensitive.
    pub async fn search<C>(conn: &C, query: &str, limit: u64) -> Result<Vec<MaterialTypeSummary>>
    where
        C: ConnectionTrait,
    {
        let pattern = contains_pattern(query);
        Ok(material_type::Entity::find()
            .select_only()
            .columns([
                material_type::Column::Id,
                material_type::Column::Brand,
                material_type::Column::Name,
                material_type::Column::Description,
            ])
            .filter(
                Condition::any()
                    .add(material_type::Column::Brand.like(pattern.clone()))
                    .add(material_type::Column::Name.like(pattern)),
            )
            .order_by_asc(material_type::Column::Brand)
            .order_by_asc(material_type::Column::Name)
            .limit(limit)
            .into_model::<MaterialTypeSummary>()
            .all(conn)
            .await?)
    }

    /// Insert a new catalog entry.
    pub async fn create<C>(conn: &C, material_type: material_type::ActiveModel) -> Result<material_type::Model>
    where
        C: ConnectionTrait,
    {
        Ok(material_type.insert(conn).await?)
    }

    /// Update a catalog entry in the database.
    pub async fn update<C>(conn: &C, material_type: material_type::ActiveModel) -> Result<material_type::Model>
    where
        C: ConnectionTrait,
    {
        Ok(material_type.update(conn).await?)
    }

    /// Delete a catalog entry row.
    pub async fn delete<C>(conn: &C, material_type: material_type::Model) -> Result<()>
    where
        C: ConnectionTrait,
    {
        material_type.delete(conn).await?;
        Ok(())
    }
}
