//! Part repository for database operations.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::entities::part;
use crate::error::{OrNotFound, Result};

/// Repository for part-related database operations.
pub struct PartRepository;

impl PartRepository {
    /// Get a single part by id.
    pub async fn get_by_id<C>(conn: &C, id: i32) -> Result<Option<part::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(part::Entity::find_by_id(id).one(conn).await?)
    }

    /// Get a single part by id, failing with `NotFound`.
    pub async fn fetch<C>(conn: &C, id: i32) -> Result<part::Model>
    where
        C: ConnectionTrait,
    {
        Self::get_by_id(conn, id).await?.or_not_found("Part", id)
    }

    /// Get the parts of a project in construction order.
    pub async fn get_for_project<C>(conn: &C, project_id: i32) -> Result<Vec<part::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(part::Entity::find()
            .filter(part::Column::ProjectId.eq(project_id))
            .order_by_asc(part::Column::Position)
            .all(conn)
            .await?)
    }

    /// Highest position used in a project, `None` when it has no parts.
    pub async fn max_position<C>(conn: &C, project_id: i32) -> Result<Option<i32>>
    where
        C: ConnectionTrait,
    {
        let max = part::Entity::find()
            .select_only()
            .column_as(part::Column::Position.max(), "max_position")
            .filter(part::Column::ProjectId.eq(project_id))
            .into_tuple::<Option<i32>>()
            .one(conn)
            .await?;
        Ok(max.flatten())
    }

    /// Get the part sitting at `position` in a project.
    pub async fn get_at_position<C>(conn: &C, project_id: i32, position: i32) -> Result<Option<part::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(part::Entity::find()
            .filter(part::Column::ProjectId.eq(project_id))
            .filter(part::Column::Position.eq(position))
            .one(conn)
            .await?)
    }

    /// Shift every part of a project above `position` down by one slot.
    pub async fn close_gap<C>(conn: &C, project_id: i32, position: i32) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        let result = part::Entity::update_many()
            .col_expr(part::Column::Position, Expr::col(part::Column::Position).sub(1))
            .filter(part::Column::ProjectId.eq(project_id))
            .filter(part::Column::Position.gt(position))
            .exec(conn)
            .await?;
        Ok(result.rows_affected)
    }

    /// Insert a new part.
    pub async fn create<C>(conn: &C, part: part::ActiveModel) -> Result<part::Model>
    where
        C: ConnectionTrait,
    {
        Ok(part.insert(conn).await?)
    }

    /// Move a part to a new position without touching its neighbours.
    pub async fn set_position<C>(conn: &C, part: part::Model, position: i32) -> Result<part::Model>
    where
        C: ConnectionTrait,
    {
        let mut active_model = part.into_active_model();
        active_model.position = ActiveValue::Set(position);
        Ok(active_model.update(conn).await?)
    }

    /// Update a part in the database.
    pub async fn update<C>(conn: &C, part: part::ActiveModel) -> Result<part::Model>
    where
        C: ConnectionTrait,
    {
        Ok(part.update(conn).await?)
    }

    /// Delete a part row.
    pub async fn delete<C>(conn: &C, part: part::Model) -> Result<()>
    where
        C: ConnectionTrait,
    {
        part.delete(conn).await?;
        Ok(())
    }
}
