//! Tag normalization.
//!
//! Tag names are matched by exact, case-sensitive string equality after
//! trimming: `"Blue"` and `"blue"` are two different tags.

use log::info;
use sea_orm::{ConnectionTrait, TransactionTrait};

use crate::constants::TAG_SEARCH_LIMIT;
use crate::entities::tag;
use crate::error::Result;
use crate::repositories::{ProjectRepository, TagRepository};

use super::TrackerService;

/// Split the comma-separated tag field of the project forms.
pub fn split_tag_input(input: &str) -> Vec<String> {
    input.split(',').map(str::to_string).collect()
}

/// Trim names, drop empty ones and keep the first occurrence of each.
pub fn normalize_tag_names<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in raw.iter().map(|s| s.as_ref().trim()) {
        if !name.is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Find or create every named tag and attach it to the project.
pub(super) async fn attach_tags<C>(conn: &C, project_id: i32, names: &[String]) -> Result<Vec<tag::Model>>
where
    C: ConnectionTrait,
{
    let mut tags = Vec::with_capacity(names.len());
    for name in names {
        let tag = TagRepository::find_or_create(conn, name).await?;
        TagRepository::attach(conn, project_id, tag.id).await?;
        tags.push(tag);
    }
    Ok(tags)
}

impl TrackerService {
    /// Replace the tags of a project with exactly the normalized `raw_tags`.
    pub async fn set_tags<S: AsRef<str>>(&self, project_id: i32, raw_tags: &[S]) -> Result<Vec<tag::Model>> {
        let names = normalize_tag_names(raw_tags);

        let txn = self.conn().begin().await?;
        ProjectRepository::fetch(&txn, project_id).await?;
        TagRepository::detach_all(&txn, project_id).await?;
        let tags = attach_tags(&txn, project_id, &names).await?;
        txn.commit().await?;

        info!("Project {project_id} tagged with {names:?}");
        Ok(tags)
    }

    /// Tags currently attached to a project.
    pub async fn project_tags(&self, project_id: i32) -> Result<Vec<tag::Model>> {
        let project = ProjectRepository::fetch(self.conn(), project_id).await?;
        ProjectRepository::get_tags(self.conn(), &project).await
    }

    /// Tag names containing `query`, for autocompletion.
    pub async fn search_tags(&self, query: &str) -> Result<Vec<String>> {
        TagRepository::search_names(self.conn(), query.trim(), TAG_SEARCH_LIMIT).await
    }

    /// All known tags, including ones no project uses anymore.
    pub async fn list_tags(&self) -> Result<Vec<tag::Model>> {
        TagRepository::get_all(self.conn()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_dedups() {
        let names = normalize_tag_names(&["Blue", "blue ", "Blue", "  ", ""]);
        assert_eq!(names, vec!["Blue".to_string(), "blue".to_string()]);
    }

    #[test]
    fn test_split_tag_input() {
        let names = normalize_tag_names(&split_tag_input("amigurumi, bear ,, gift"));
        assert_eq!(names, vec!["amigurumi", "bear", "gift"]);
    }
}
