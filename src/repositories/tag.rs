//! Tag repository for database operations.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

use crate::entities::{project_tag, tag};
use crate::error::Result;

use super::contains_pattern;

/// Repository for tag-related database operations.
pub struct TagRepository;

impl TagRepository {
    /// Get all tags ordered by name.
    pub async fn get_all<C>(conn: &C) -> Result<Vec<tag::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(tag::Entity::find().order_by_asc(tag::Column::Name).all(conn).await?)
    }

    /// Get a single tag by its exact name.
    pub async fn get_by_name<C>(conn: &C, name: &str) -> Result<Option<tag::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(tag::Entity::find().filter(tag::Column::Name.eq(name)).one(conn).await?)
    }

    /// Look a tag up by exact name, creating it when absent.
    ///
    /// The insert ignores a conflicting name, so a row created in between the
    /// statements is picked up by the lookup instead of failing.
    pub async fn find_or_create<C>(conn: &C, name: &str) -> Result<tag::Model>
    where
        C: ConnectionTrait,
    {
        if let Some(existing) = Self::get_by_name(conn, name).await? {
            return Ok(existing);
        }

        let model = tag::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(name.to_string()),
        };
        tag::Entity::insert(model)
            .on_conflict(OnConflict::column(tag::Column::Name).do_nothing().to_owned())
            .exec_without_returning(conn)
            .await?;

        Self::get_by_name(conn, name).await?.ok_or_else(|| {
            crate::error::TrackerError::Constraint(format!("tag {name:?} vanished after insert"))
        })
    }

    /// Tag names containing `query`, case-insensitive.
    pub async fn search_names<C>(conn: &C, query: &str, limit: u64) -> Result<Vec<String>>
    where
        C: ConnectionTrait,
    {
        Ok(tag::Entity::find()
            .select_only()
            .column(tag::Column::Name)
            .filter(tag::Column::Name.like(contains_pattern(query)))
            .order_by_asc(tag::Column::Name)
            .limit(limit)
            .into_tuple::<String>()
            .all(conn)
            .await?)
    }

    /// Attach a tag to a project; attaching twice is a no-op.
    pub async fn attach<C>(conn: &C, project_id: i32, tag_id: i32) -> Result<()>
    where
        C: ConnectionTrait,
    {
        let link = project_tag::ActiveModel {
            project_id: ActiveValue::Set(project_id),
            tag_id: ActiveValue::Set(tag_id),
        };
        project_tag::Entity::insert(link)
            .on_conflict(
                OnConflict::columns([project_tag::Column::ProjectId, project_tag::Column::TagId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(conn)
            .await?;
        Ok(())
    }

    /// Remove every tag association of a project. Tag rows are kept.
    pub async fn detach_all<C>(conn: &C, project_id: i32) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        let result = project_tag::Entity::delete_many()
            .filter(project_tag::Column::ProjectId.eq(project_id))
            .exec(conn)
            .await?;
        Ok(result.rows_affected)
    }
}
