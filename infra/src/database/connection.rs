//! MongoDB client setup

use mongodb::bson::doc;
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Database, IndexModel};
use std::time::Duration;

use dk_shared::DatabaseConfig;

use crate::database::mongo::{UserDocument, USERS_COLLECTION};
use crate::InfrastructureError;

const APP_NAME: &str = "devkit";

/// Handle to the application database
///
/// Cheap to clone; the underlying client owns the connection pool.
#[derive(Clone, Debug)]
pub struct DatabaseConnection {
    client: Client,
    database: Database,
}

impl DatabaseConnection {
    /// Build a client from configuration
    ///
    /// The driver connects lazily, so this only fails on a malformed URL or
    /// options. Call [`ping`](Self::ping) to check reachability.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, InfrastructureError> {
        let mut options = ClientOptions::parse(&config.url).await?;
        options.app_name = Some(APP_NAME.to_string());
        options.max_pool_size = Some(config.max_connections);
        options.min_pool_size = Some(config.min_connections);
        options.connect_timeout = Some(Duration::from_secs(config.connect_timeout));
        options.server_selection_timeout = Some(Duration::from_secs(config.connect_timeout));

        let client = Client::with_options(options)?;
        let database = client.database(&config.name);

        tracing::info!(
            database = %config.name,
            max_connections = config.max_connections,
            event = "database_configured",
            "MongoDB client configured"
        );

        Ok(Self { client, database })
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Round-trip a ping command to the server
    pub async fn ping(&self) -> Result<(), InfrastructureError> {
        self.database.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }

    /// Create the unique indexes the user store relies on
    ///
    /// Idempotent; existing indexes with the same keys are left alone.
    pub async fn ensure_indexes(&self) -> Result<(), InfrastructureError> {
        let users = self.database.collection::<UserDocument>(USERS_COLLECTION);
        let unique = || IndexOptions::builder().unique(true).build();

        users
            .create_indexes(
                vec![
                    IndexModel::builder()
                        .keys(doc! { "email": 1 })
                        .options(unique())
                        .build(),
                    IndexModel::builder()
                        .keys(doc! { "username": 1 })
                        .options(unique())
                        .build(),
                ],
                None,
            )
            .await?;

        tracing::info!(
            collection = USERS_COLLECTION,
            event = "indexes_ensured",
            "Unique indexes ensured"
        );
        Ok(())
    }
}
