use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

use crate::actor_framework::ResourceActor;
use crate::clients::ProductClient;
use crate::config::SystemConfig;
use crate::services::{OrderPlacementService, OrderQueryService};
use crate::store::{Database, StoreClient};

/// The main application system.
///
/// Starts the store actor, wires the clients and services to it, and shuts
/// it down again. Must be created inside a tokio runtime.
pub struct OrderSystem {
    pub product_client: ProductClient,
    pub placement: OrderPlacementService,
    pub queries: OrderQueryService,
    handle: JoinHandle<Database>,
}

impl OrderSystem {
    pub fn new(config: &SystemConfig) -> Self {
        Self::with_database(config, Database::new())
    }

    /// Starts the system on top of existing state.
    pub fn with_database(config: &SystemConfig, database: Database) -> Self {
        info!(
            buffer = config.store_buffer,
            timeout = ?config.store_timeout,
            "Starting order system"
        );
        let (store_actor, resource_client) =
            ResourceActor::new(config.store_buffer, database, config.store_timeout);
        let handle = tokio::spawn(store_actor.run());

        let store = StoreClient::new(resource_client);
        Self {
            product_client: ProductClient::new(store.clone()),
            placement: OrderPlacementService::new(store.clone()),
            queries: OrderQueryService::new(store),
            handle,
        }
    }

    /// Drops every client, waits for the store actor to drain, and returns
    /// the final state.
    ///
    /// Clones of the clients handed out earlier keep the actor alive, so
    /// drop them first.
    pub async fn shutdown(self) -> Result<Database, JoinError> {
        info!("Shutting down system...");
        drop(self.product_client);
        drop(self.placement);
        drop(self.queries);

        match self.handle.await {
            Ok(database) => {
                info!("System shutdown complete.");
                Ok(database)
            }
            Err(e) => {
                error!(error = %e, "Store actor task failed");
                Err(e)
            }
        }
    }
}
