//! Round and made-count counters.
//!
//! Both counters have a floor: 1 for the current round, 0 for the number of
//! times a project was made. Decrementing never goes below the floor and
//! resetting returns to it.

use log::debug;
use sea_orm::{ActiveValue, IntoActiveModel, TransactionTrait};

use crate::constants::{MADE_COUNT_FLOOR, ROUND_FLOOR};
use crate::error::{Result, TrackerError};
use crate::repositories::ProjectRepository;

use super::TrackerService;

/// Which project counter to change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterKind {
    Round,
    MadeCount,
}

impl CounterKind {
    pub fn floor(self) -> i32 {
        match self {
            CounterKind::Round => ROUND_FLOOR,
            CounterKind::MadeCount => MADE_COUNT_FLOOR,
        }
    }

    /// Form field carrying the explicit value for [`CounterAction::Set`].
    pub fn value_field(self) -> &'static str {
        match self {
            CounterKind::Round => "round_number",
            CounterKind::MadeCount => "made_count",
        }
    }
}

/// A change to a counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterAction {
    Increment,
    Decrement,
    Reset,
    Set(i32),
}

impl CounterAction {
    /// Parse the `action` form field, reading `value` for `set`.
    pub fn parse(kind: CounterKind, action: &str, value: Option<&str>) -> Result<Self> {
        match action {
            "increment" => Ok(CounterAction::Increment),
            "decrement" => Ok(CounterAction::Decrement),
            "reset" => Ok(CounterAction::Reset),
            "set" => value
                .and_then(|v| v.trim().parse::<i32>().ok())
                .map(CounterAction::Set)
                .ok_or_else(|| TrackerError::validation(format!("a whole number for {}", kind.value_field()))),
            other => Err(TrackerError::validation(format!(
                "action increment, decrement, reset or set (got {other:?})"
            ))),
        }
    }

    /// New counter value after applying this action to `current`.
    ///
    /// `Set` only applies values above zero for both counters, so made-count
    /// can reach 0 through decrement or reset but not through set.
    pub fn apply(self, kind: CounterKind, current: i32) -> i32 {
        let floor = kind.floor();
        match self {
            CounterAction::Increment => current.saturating_add(1),
            CounterAction::Decrement if current > floor => current - 1,
            CounterAction::Decrement => current,
            CounterAction::Reset => floor,
            CounterAction::Set(value) if value > 0 => value,
            CounterAction::Set(_) => current,
        }
    }
}

impl TrackerService {
    /// Apply `action` to one of the project counters and return the new value.
    pub async fn update_counter(&self, project_id: i32, kind: CounterKind, action: CounterAction) -> Result<i32> {
        let txn = self.conn().begin().await?;
        let project = ProjectRepository::fetch(&txn, project_id).await?;

        let current = match kind {
            CounterKind::Round => project.current_round,
            CounterKind::MadeCount => project.made_count,
        };
        let next = action.apply(kind, current);

        if next != current {
            let mut active_model = project.into_active_model();
            match kind {
                CounterKind::Round => active_model.current_round = ActiveValue::Set(next),
                CounterKind::MadeCount => active_model.made_count = ActiveValue::Set(next),
            }
            ProjectRepository::update(&txn, active_model).await?;
        }
        txn.commit().await?;

        debug!("Project {project_id} {kind:?}: {current} -> {next} ({action:?})");
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decrement_stops_at_floor() {
        assert_eq!(CounterAction::Decrement.apply(CounterKind::Round, 1), 1);
        assert_eq!(CounterAction::Decrement.apply(CounterKind::Round, 2), 1);
        assert_eq!(CounterAction::Decrement.apply(CounterKind::MadeCount, 0), 0);
        assert_eq!(CounterAction::Decrement.apply(CounterKind::MadeCount, 1), 0);
    }

    #[test]
    fn test_reset_returns_to_floor() {
        assert_eq!(CounterAction::Reset.apply(CounterKind::Round, 9), 1);
        assert_eq!(CounterAction::Reset.apply(CounterKind::MadeCount, 9), 0);
    }

    #[test]
    fn test_set_requires_positive_value() {
        assert_eq!(CounterAction::Set(12).apply(CounterKind::Round, 3), 12);
        assert_eq!(CounterAction::Set(0).apply(CounterKind::Round, 3), 3);
        assert_eq!(CounterAction::Set(-4).apply(CounterKind::Round, 3), 3);
        // Zero is the made-count floor, yet set keeps the round counter's bound
        assert_eq!(CounterAction::Set(0).apply(CounterKind::MadeCount, 3), 3);
    }

    #[test]
    fn test_parse_actions() {
        assert_eq!(
            CounterAction::parse(CounterKind::Round, "increment", None).unwrap(),
            CounterAction::Increment
        );
        assert_eq!(
            CounterAction::parse(CounterKind::Round, "set", Some(" 7 ")).unwrap(),
            CounterAction::Set(7)
        );
        assert!(CounterAction::parse(CounterKind::Round, "set", Some("seven")).is_err());
        assert!(CounterAction::parse(CounterKind::MadeCount, "set", None).is_err());
        assert!(CounterAction::parse(CounterKind::Round, "explode", None).is_err());
    }
}
