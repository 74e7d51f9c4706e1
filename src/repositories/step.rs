//! Step repository for database operations.

use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder};

use crate::entities::step;
use crate::error::{OrNotFound, Result};

/// Repository for step-related database operations.
pub struct StepRepository;

impl StepRepository {
    /// Get a single step by id.
    pub async fn get_by_id<C>(conn: &C, id: i32) -> Result<Option<step::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(step::Entity::find_by_id(id).one(conn).await?)
    }

    /// Get a single step by id, failing with `NotFound`.
    pub async fn fetch<C>(conn: &C, id: i32) -> Result<step::Model>
    where
        C: ConnectionTrait,
    {
        Self::get_by_id(conn, id).await?.or_not_found("Step", id)
    }

    /// Get the steps of several parts, in insertion order.
    pub async fn get_for_parts<C>(conn: &C, part_ids: Vec<i32>) -> Result<Vec<step::Model>>
    where
        C: ConnectionTrait,
    {
        if part_ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(step::Entity::find()
            .filter(step::Column::PartId.is_in(part_ids))
            .order_by_asc(step::Column::Id)
            .all(conn)
            .await?)
    }

    /// Mark every step of the given parts as not completed.
    pub async fn reset_for_parts<C>(conn: &C, part_ids: Vec<i32>) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        if part_ids.is_empty() {
            return Ok(0);
        }
        let result = step::Entity::update_many()
            .col_expr(step::Column::Completed, Expr::value(false))
            .filter(step::Column::PartId.is_in(part_ids))
            .exec(conn)
            .await?;
        Ok(result.rows_affected)
    }

    /// Delete every step owned by the given parts.
    pub async fn delete_for_parts<C>(conn: &C, part_ids: Vec<i32>) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        if part_ids.is_empty() {
            return Ok(0);
        }
        let result = step::Entity::delete_many()
            .filter(step::Column::PartId.is_in(part_ids))
            .exec(conn)
            .await?;
        Ok(result.rows_affected)
    }

    /// Insert a new step.
    pub async fn create<C>(conn: &C, step: step::ActiveModel) -> Result<step::Model>
    where
        C: ConnectionTrait,
    {
        Ok(step.insert(conn).await?)
    }

    /// Update a step in the database.
    pub async fn update<C>(conn: &C, step: step::ActiveModel) -> Result<step::Model>
    where
        C: ConnectionTrait,
    {
        Ok(step.update(conn).await?)
    }

    /// Flip the completion flag of a step.
    pub async fn set_completed<C>(conn: &C, step: step::Model, completed: bool) -> Result<step::Model>
    where
        C: ConnectionTrait,
    {
        let mut active_model: step::ActiveModel = step.into();
        active_model.completed = ActiveValue::Set(completed);
        Self::update(conn, active_model).await
    }

    /// Delete a step row.
    pub async fn delete<C>(conn: &C, step: step::Model) -> Result<()>
    where
        C: ConnectionTrait,
    {
        step.delete(conn).await?;
        Ok(())
    }
}
