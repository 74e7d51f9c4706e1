use anyhow::{Context, Result};
use log::{debug, info};
use sea_orm::sea_query::{Index, TableCreateStatement};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, PaginatorTrait, Schema};

use crate::entities::{material, material_type, part, project, project_tag, step, tag};

/// Local storage manager for tracker data
#[derive(Clone, Debug)]
pub struct LocalStorage {
    pub conn: DatabaseConnection,
}

impl LocalStorage {
    /// Open (creating if needed) the database at `database_url` and ensure the schema exists
    pub async fn connect(database_url: &str) -> Result<Self> {
        let mut options = ConnectOptions::new(database_url.to_string());
        options.sqlx_logging(false);
        if database_url.contains(":memory:") {
            // Every pooled connection would otherwise see its own empty database
            options.min_connections(1).max_connections(1);
        }

        let conn = Database::connect(options)
            .await
            .with_context(|| format!("Failed to open database: {database_url}"))?;

        let storage = LocalStorage { conn };
        storage.init_schema().await?;
        info!("Database ready at {database_url}");
        Ok(storage)
    }

    /// Initialize a private in-memory database, used by tests and throwaway runs
    pub async fn in_memory() -> Result<Self> {
        Self::connect("sqlite::memory:").await
    }

    /// Initialize database schema from the entity definitions
    async fn init_schema(&self) -> Result<()> {
        // Parents before children so foreign keys resolve
        self.create_table(project::Entity).await?;
        self.create_table(tag::Entity).await?;
        self.create_table(project_tag::Entity).await?;
        self.create_table(material_type::Entity).await?;
        self.create_table(material::Entity).await?;
        self.create_table(part::Entity).await?;
        self.create_table(step::Entity).await?;

        let backend = self.conn.get_database_backend();
        let parts_order = Index::create()
            .name("idx_parts_project_position")
            .table(part::Entity)
            .col(part::Column::ProjectId)
            .col(part::Column::Position)
            .if_not_exists()
            .to_owned();
        self.conn.execute(backend.build(&parts_order)).await?;

        Ok(())
    }

    async fn create_table<E>(&self, entity: E) -> Result<()>
    where
        E: EntityTrait,
    {
        let backend = self.conn.get_database_backend();
        let schema = Schema::new(backend);
        let statement: TableCreateStatement = schema.create_table_from_entity(entity).if_not_exists().to_owned();

        self.conn
            .execute(backend.build(&statement))
            .await
            .with_context(|| format!("Failed to create table {}", entity.table_name()))?;
        debug!("Ensured table {}", entity.table_name());
        Ok(())
    }

    /// Check if the database has any projects
    pub async fn has_data(&self) -> Result<bool> {
        let count = project::Entity::find().count(&self.conn).await?;
        Ok(count > 0)
    }
}
