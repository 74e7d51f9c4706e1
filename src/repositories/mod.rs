//! Repository layer for database operations.
//!
//! This module provides repository structs that encapsulate database queries
//! and operations, following the Data Mapper pattern recommended by SeaORM.
//! Repositories keep entities as pure data models while providing reusable
//! database access methods. Every repository exposes a `fetch` that maps a
//! missing row to [`TrackerError::NotFound`](crate::error::TrackerError).

pub mod material;
pub mod material_type;
pub mod part;
pub mod project;
pub mod step;
pub mod tag;

pub use material::MaterialRepository;
pub use material_type::MaterialTypeRepository;
pub use part::PartRepository;
pub use project::{ProjectRepository, ProjectSort};
pub use step::StepRepository;
pub use tag::TagRepository;

use sea_orm::sea_query::LikeExpr;

/// Build a `%query%` LIKE pattern with the wildcards in `query` escaped.
pub(crate) fn contains_pattern(query: &str) -> LikeExpr {
    let escaped = query.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
    LikeExpr::new(format!("%{escaped}%")).escape('\\')
}
