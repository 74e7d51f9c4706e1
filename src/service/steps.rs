//! Step instructions and completion flags.

use log::debug;
use sea_orm::{ActiveValue, IntoActiveModel, TransactionTrait};

use crate::entities::step;
use crate::error::{optional, require, Result};
use crate::repositories::{PartRepository, ProjectRepository, StepRepository};

use super::TrackerService;

impl TrackerService {
    /// Get a single step.
    pub async fn get_step(&self, step_id: i32) -> Result<step::Model> {
        StepRepository::fetch(self.conn(), step_id).await
    }

    /// Add an instruction line to a part.
    pub async fn add_step(&self, part_id: i32, round_number: Option<&str>, instructions: &str) -> Result<step::Model> {
        let instructions = require("instructions", instructions)?;

        let txn = self.conn().begin().await?;
        PartRepository::fetch(&txn, part_id).await?;
        let step = StepRepository::create(
            &txn,
            step::ActiveModel {
                id: ActiveValue::NotSet,
                part_id: ActiveValue::Set(part_id),
                round_number: ActiveValue::Set(optional(round_number)),
                instructions: ActiveValue::Set(instructions),
                completed: ActiveValue::Set(false),
            },
        )
        .await?;
        txn.commit().await?;

        debug!("Added step {} to part {}", step.id, part_id);
        Ok(step)
    }

    /// Change the round label and instructions of a step.
    pub async fn edit_step(&self, step_id: i32, round_number: Option<&str>, instructions: &str) -> Result<step::Model> {
        let instructions = require("instructions", instructions)?;

        let txn = self.conn().begin().await?;
        let step = StepRepository::fetch(&txn, step_id).await?;
        let mut active_model = step.into_active_model();
        active_model.round_number = ActiveValue::Set(optional(round_number));
        active_model.instructions = ActiveValue::Set(instructions);
        let step = StepRepository::update(&txn, active_model).await?;
        txn.commit().await?;
        Ok(step)
    }

    /// Delete a step, returning the removed row.
    pub async fn delete_step(&self, step_id: i32) -> Result<step::Model> {
        let txn = self.conn().begin().await?;
        let step = StepRepository::fetch(&txn, step_id).await?;
        StepRepository::delete(&txn, step.clone()).await?;
        txn.commit().await?;

        debug!("Deleted step {step_id}");
        Ok(step)
    }

    /// Flip the completion flag of a step.
    pub async fn toggle_step_completion(&self, step_id: i32) -> Result<step::Model> {
        let txn = self.conn().begin().await?;
        let step = StepRepository::fetch(&txn, step_id).await?;
        let completed = !step.completed;
        let step = StepRepository::set_completed(&txn, step, completed).await?;
        txn.commit().await?;
        Ok(step)
    }

    /// Mark every step of a part as not completed.
    pub async fn reset_steps_for_part(&self, part_id: i32) -> Result<u64> {
        let txn = self.conn().begin().await?;
        PartRepository::fetch(&txn, part_id).await?;
        let reset = StepRepository::reset_for_parts(&txn, vec![part_id]).await?;
        txn.commit().await?;
        debug!("Reset {reset} steps of part {part_id}");
        Ok(reset)
    }

    /// Mark every step of every part of a project as not completed.
    pub async fn reset_all_steps(&self, project_id: i32) -> Result<u64> {
        let txn = self.conn().begin().await?;
        ProjectRepository::fetch(&txn, project_id).await?;
        let part_ids = PartRepository::get_for_project(&txn, project_id)
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();
        let reset = StepRepository::reset_for_parts(&txn, part_ids).await?;
        txn.commit().await?;
        debug!("Reset {reset} steps of project {project_id}");
        Ok(reset)
    }

    /// Project that owns a part, used to send the browser back to it.
    pub async fn project_id_of_part(&self, part_id: i32) -> Result<i32> {
        Ok(PartRepository::fetch(self.conn(), part_id).await?.project_id)
    }
}
