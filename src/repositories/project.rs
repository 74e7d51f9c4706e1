//! Project repository for database operations.

use std::fmt;
use std::str::FromStr;

use sea_orm::sea_query::{Condition, Expr, Query, SimpleExpr};
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Select};

use crate::entities::{project, project_tag, tag};
use crate::error::{OrNotFound, Result, TrackerError};

use super::contains_pattern;

/// Sort orders offered on the project listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProjectSort {
    #[default]
    Newest,
    Oldest,
    TitleAsc,
    TitleDesc,
    MadeCountAsc,
    MadeCountDesc,
}

impl ProjectSort {
    pub const ALL: [ProjectSort; 6] = [
        ProjectSort::Newest,
        ProjectSort::Oldest,
        ProjectSort::TitleAsc,
        ProjectSort::TitleDesc,
        ProjectSort::MadeCountAsc,
        ProjectSort::MadeCountDesc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectSort::Newest => "newest",
            ProjectSort::Oldest => "oldest",
            ProjectSort::TitleAsc => "title_asc",
            ProjectSort::TitleDesc => "title_desc",
            ProjectSort::MadeCountAsc => "made_asc",
            ProjectSort::MadeCountDesc => "made_desc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProjectSort::Newest => "Newest first",
            ProjectSort::Oldest => "Oldest first",
            ProjectSort::TitleAsc => "Title A-Z",
            ProjectSort::TitleDesc => "Title Z-A",
            ProjectSort::MadeCountAsc => "Least made",
            ProjectSort::MadeCountDesc => "Most made",
        }
    }

    fn apply(self, select: Select<project::Entity>) -> Select<project::Entity> {
        // Id breaks ties so rows created within the same instant keep a stable order
        match self {
            ProjectSort::Newest => select
                .order_by_desc(project::Column::CreatedAt)
                .order_by_desc(project::Column::Id),
            ProjectSort::Oldest => select
                .order_by_asc(project::Column::CreatedAt)
                .order_by_asc(project::Column::Id),
            ProjectSort::TitleAsc => select
                .order_by_asc(title_nocase())
                .order_by_asc(project::Column::Id),
            ProjectSort::TitleDesc => select
                .order_by_desc(title_nocase())
                .order_by_desc(project::Column::Id),
            ProjectSort::MadeCountAsc => select
                .order_by_asc(project::Column::MadeCount)
                .order_by_asc(project::Column::Id),
            ProjectSort::MadeCountDesc => select
                .order_by_desc(project::Column::MadeCount)
                .order_by_desc(project::Column::Id),
        }
    }
}

/// Title ordering that ignores ASCII case, so "apple" sorts before "Zebra".
fn title_nocase() -> SimpleExpr {
    Expr::cust(r#""projects"."title" COLLATE NOCASE"#)
}

impl FromStr for ProjectSort {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        ProjectSort::ALL
            .into_iter()
            .find(|sort| sort.as_str() == s)
            .ok_or_else(|| TrackerError::validation(format!("a known sort order (got {s:?})")))
    }
}

impl fmt::Display for ProjectSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repository for project-related database operations.
pub struct ProjectRepository;

impl ProjectRepository {
    /// Get a single project by id.
    pub async fn get_by_id<C>(conn: &C, id: i32) -> Result<Option<project::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(project::Entity::find_by_id(id).one(conn).await?)
    }

    /// Get a single project by id, failing with `NotFound`.
    pub async fn fetch<C>(conn: &C, id: i32) -> Result<project::Model>
    where
        C: ConnectionTrait,
    {
        Self::get_by_id(conn, id).await?.or_not_found("Project", id)
    }

    /// Get all projects in the given order.
    pub async fn get_all<C>(conn: &C, sort: ProjectSort) -> Result<Vec<project::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(sort.apply(project::Entity::find()).all(conn).await?)
    }

    /// Search projects whose title or any tag name contains `query`.
    ///
    /// SQLite `LIKE` is case-insensitive for ASCII. Projects without tags are
    /// still matched on their title, and each project appears once.
    pub async fn search<C>(conn: &C, query: &str, sort: ProjectSort) -> Result<Vec<project::Model>>
    where
        C: ConnectionTrait,
    {
        let pattern = contains_pattern(query);

        let tagged = Query::select()
            .column((project_tag::Entity, project_tag::Column::ProjectId))
            .from(project_tag::Entity)
            .inner_join(
                tag::Entity,
                Expr::col((tag::Entity, tag::Column::Id))
                    .equals((project_tag::Entity, project_tag::Column::TagId)),
            )
            .and_where(Expr::col((tag::Entity, tag::Column::Name)).like(pattern.clone()))
            .to_owned();

        let select = project::Entity::find().filter(
            Condition::any()
                .add(project::Column::Title.like(pattern))
                .add(project::Column::Id.in_subquery(tagged)),
        );

        Ok(sort.apply(select).all(conn).await?)
    }

    /// Get the tags attached to a project, ordered by name.
    pub async fn get_tags<C>(conn: &C, project: &project::Model) -> Result<Vec<tag::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(project
            .find_related(tag::Entity)
            .order_by_asc(tag::Column::Name)
            .all(conn)
            .await?)
    }

    /// Update a project in the database.
    pub async fn update<C>(conn: &C, project: project::ActiveModel) -> Result<project::Model>
    where
        C: ConnectionTrait,
    {
        Ok(project.update(conn).await?)
    }

    /// Delete a project row.
    pub async fn delete<C>(conn: &C, project: project::Model) -> Result<()>
    where
        C: ConnectionTrait,
    {
        project.delete(conn).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_round_trips_through_its_key() {
        for sort in ProjectSort::ALL {
            assert_eq!(sort.as_str().parse::<ProjectSort>().unwrap(), sort);
        }
    }

    #[test]
    fn test_unknown_sort_is_rejected() {
        assert!("sideways".parse::<ProjectSort>().is_err());
        assert_eq!(ProjectSort::default(), ProjectSort::Newest);
    }
}
