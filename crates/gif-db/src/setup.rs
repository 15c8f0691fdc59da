//! Database setup and initialization.
//!
//! Entry points call `setup_database()` once at startup with the configured
//! connection string and database name.

use std::time::Duration;

use anyhow::{Context, Result};
use bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Client, Database, IndexModel};
use tracing::info;

use crate::repositories::{NOTIFICATIONS, OTPS, USERS};

/// Connect to MongoDB, verify the server answers, and ensure indexes exist.
///
/// # Example
///
/// ```rust,no_run
/// use gif_db::setup_database;
///
/// # async fn example() -> anyhow::Result<()> {
/// let db = setup_database("mongodb://localhost:27017", "maitech").await?;
/// # Ok(())
/// # }
/// ```
pub async fn setup_database(url: &str, db_name: &str) -> Result<Database> {
    let client = Client::with_uri_str(url)
        .await
        .context("Failed to parse MongoDB connection string")?;
    let db = client.database(db_name);

    db.run_command(doc! { "ping": 1 })
        .await
        .with_context(|| format!("MongoDB did not answer ping for database '{db_name}'"))?;
    info!(target: "gif.db", database = db_name, "Connected to MongoDB");

    ensure_indexes(&db).await?;
    Ok(db)
}

/// Create every index the repositories rely on.
///
/// Safe to call repeatedly: creating an index that already exists with the
/// same options is a no-op on the server.
pub async fn ensure_indexes(db: &Database) -> Result<()> {
    db.collection::<bson::Document>(USERS)
        .create_index(
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
        )
        .await
        .context("Failed to create users.email index")?;

    let notifications = db.collection::<bson::Document>(NOTIFICATIONS);
    notifications
        .create_indexes([
            IndexModel::builder()
                .keys(doc! { "user_id": 1, "created_at": -1 })
                .build(),
            IndexModel::builder()
                .keys(doc! { "type": 1, "related_resource_id": 1 })
                .build(),
        ])
        .await
        .context("Failed to create notifications indexes")?;

    let otps = db.collection::<bson::Document>(OTPS);
    otps.create_indexes([
        IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build(),
        IndexModel::builder()
            .keys(doc! { "expires_at": 1 })
            .options(
                IndexOptions::builder()
                    .expire_after(Duration::from_secs(0))
                    .build(),
            )
            .build(),
    ])
    .await
    .context("Failed to create otps indexes")?;

    info!(target: "gif.db", "Indexes ensured");
    Ok(())
}
