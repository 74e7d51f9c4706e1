//! Part ordering.
//!
//! Parts of a project carry a dense, zero-based `position`: for a project with
//! `n` parts the positions are exactly `0..n`. Appending takes the next free
//! slot, deleting shifts every later part down by one, and moving swaps with
//! the adjacent part. Each operation commits as a single transaction.

use std::fmt;
use std::str::FromStr;

use log::{debug, info};
use sea_orm::{ActiveValue, IntoActiveModel, TransactionTrait};

use crate::entities::part;
use crate::error::{require, Result, TrackerError};
use crate::repositories::{PartRepository, ProjectRepository, StepRepository};

use super::TrackerService;

/// Direction for [`TrackerService::move_part`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

impl MoveDirection {
    /// Position of the neighbour to swap with, `None` past the top.
    fn neighbour_of(self, position: i32) -> Option<i32> {
        match self {
            MoveDirection::Up => position.checked_sub(1).filter(|p| *p >= 0),
            MoveDirection::Down => position.checked_add(1),
        }
    }
}

impl FromStr for MoveDirection {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "up" => Ok(MoveDirection::Up),
            "down" => Ok(MoveDirection::Down),
            other => Err(TrackerError::validation(format!("direction up or down (got {other:?})"))),
        }
    }
}

impl fmt::Display for MoveDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveDirection::Up => f.write_str("up"),
            MoveDirection::Down => f.write_str("down"),
        }
    }
}

impl TrackerService {
    /// Get a single part.
    pub async fn get_part(&self, part_id: i32) -> Result<part::Model> {
        PartRepository::fetch(self.conn(), part_id).await
    }

    /// Parts of a project in construction order.
    pub async fn list_parts(&self, project_id: i32) -> Result<Vec<part::Model>> {
        ProjectRepository::fetch(self.conn(), project_id).await?;
        PartRepository::get_for_project(self.conn(), project_id).await
    }

    /// Add a part after the last one of the project.
    pub async fn append_part(&self, project_id: i32, name: &str) -> Result<part::Model> {
        let name = require("name", name)?;

        let txn = self.conn().begin().await?;
        ProjectRepository::fetch(&txn, project_id).await?;
        let position = PartRepository::max_position(&txn, project_id)
            .await?
            .map_or(0, |max| max + 1);
        let part = PartRepository::create(
            &txn,
            part::ActiveModel {
                id: ActiveValue::NotSet,
                project_id: ActiveValue::Set(project_id),
                name: ActiveValue::Set(name),
                position: ActiveValue::Set(position),
            },
        )
        .await?;
        txn.commit().await?;

        debug!("Appended part {} to project {} at {}", part.id, project_id, position);
        Ok(part)
    }

    /// Rename a part, keeping its position.
    pub async fn rename_part(&self, part_id: i32, name: &str) -> Result<part::Model> {
        let name = require("name", name)?;

        let txn = self.conn().begin().await?;
        let part = PartRepository::fetch(&txn, part_id).await?;
        let mut active_model = part.into_active_model();
        active_model.name = ActiveValue::Set(name);
        let part = PartRepository::update(&txn, active_model).await?;
        txn.commit().await?;
        Ok(part)
    }

    /// Delete a part and its steps, closing the gap it leaves.
    ///
    /// Returns the deleted row so callers know which project it belonged to.
    pub async fn delete_part(&self, part_id: i32) -> Result<part::Model> {
        let txn = self.conn().begin().await?;
        let part = PartRepository::fetch(&txn, part_id).await?;

        StepRepository::delete_for_parts(&txn, vec![part.id]).await?;
        PartRepository::delete(&txn, part.clone()).await?;
        let shifted = PartRepository::close_gap(&txn, part.project_id, part.position).await?;
        txn.commit().await?;

        info!(
            "Deleted part {} from project {} ({} later parts shifted)",
            part.id, part.project_id, shifted
        );
        Ok(part)
    }

    /// Swap a part with its neighbour. Returns `false` when it is already at
    /// that end of the list.
    pub async fn move_part(&self, part_id: i32, direction: MoveDirection) -> Result<bool> {
        let txn = self.conn().begin().await?;
        let part = PartRepository::fetch(&txn, part_id).await?;

        let Some(target) = direction.neighbour_of(part.position) else {
            return Ok(false);
        };
        let Some(neighbour) = PartRepository::get_at_position(&txn, part.project_id, target).await? else {
            return Ok(false);
        };

        let from = part.position;
        PartRepository::set_position(&txn, neighbour, from).await?;
        PartRepository::set_position(&txn, part, target).await?;
        txn.commit().await?;

        debug!("Moved part {part_id} {direction} from {from} to {target}");
        Ok(true)
    }
}
