//! # Mock Framework
//!
//! Utilities for testing services without a running store actor.
//!
//! Use [`create_mock_store`] to get a [`StoreClient`] and the receiving end of
//! its channel. Requests then sit on the channel until the test decides what
//! to do with them: run them with [`expect_job`], drop them, or let the
//! caller time out first.

use std::time::Duration;
use tokio::sync::mpsc;

use crate::actor_framework::{Job, ResourceClient, ResourceRequest};
use crate::domain::ProductCreate;
use crate::error::ProductError;
use crate::store::{Database, ProductCatalog, StoreClient};

/// Creates a store client whose requests land on a receiver the test owns.
pub fn create_mock_store(
    buffer_size: usize,
    timeout: Duration,
) -> (StoreClient, mpsc::Receiver<ResourceRequest<Database>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(ResourceClient::new(sender, timeout)), receiver)
}

/// Waits for the next request and hands back its job.
pub async fn expect_job<S>(receiver: &mut mpsc::Receiver<ResourceRequest<S>>) -> Option<Job<S>> {
    match receiver.recv().await {
        Some(ResourceRequest::Execute { job }) => Some(job),
        None => None,
    }
}

/// A database holding the given products, with ids assigned from 1 in order.
pub fn database_with(products: Vec<ProductCreate>) -> Database {
    let mut db = Database::new();
    db.transaction(move |tx| {
        for product in products {
            tx.insert_product(product)?;
        }
        Ok::<_, ProductError>(())
    })
    .expect("seed products");
    db
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::FrameworkError;
    use crate::clients::ProductClient;
    use crate::domain::{CreateOrderRequest, ProductId, ShippingInfo};
    use crate::error::PlacementError;
    use crate::services::OrderPlacementService;
    use rust_decimal::Decimal;

    fn book() -> ProductCreate {
        ProductCreate::new("Book", Decimal::new(1000, 2), 5)
    }

    #[tokio::test]
    async fn test_mock_store_runs_jobs_on_demand() {
        let (store, mut receiver) = create_mock_store(4, Duration::from_secs(1));
        let client = ProductClient::new(store);

        let task = tokio::spawn(async move { client.check_stock(ProductId(1)).await });

        let job = expect_job(&mut receiver).await.expect("Expected a job");
        let mut db = database_with(vec![book()]);
        job(&mut db);

        assert_eq!(task.await.unwrap(), Ok(5));
    }

    #[tokio::test]
    async fn test_timeout_surfaces_as_persistence_failure_and_commits_nothing() {
        let timeout = Duration::from_millis(20);
        let (store, mut receiver) = create_mock_store(4, timeout);
        let placement = OrderPlacementService::new(store);

        let request = CreateOrderRequest::new(ShippingInfo::default()).line(ProductId(1), 3);
        let err = placement.place_order("alice", request).await.unwrap_err();
        assert_eq!(err, PlacementError::PersistenceFailure(FrameworkError::Timeout(timeout)));
        assert!(err.is_retryable());

        // the store gets to the job only after the caller gave up
        let job = expect_job(&mut receiver).await.expect("Expected a job");
        let mut db = database_with(vec![book()]);
        job(&mut db);

        assert_eq!(db.products().get(&ProductId(1)).unwrap().stock, 5);
        assert!(db.orders().is_empty());
    }

    #[tokio::test]
    async fn test_dropped_job_is_reported() {
        let (store, mut receiver) = create_mock_store(4, Duration::from_secs(1));
        let client = ProductClient::new(store);

        let task = tokio::spawn(async move { client.restock(ProductId(1), 1).await });
        drop(expect_job(&mut receiver).await.expect("Expected a job"));

        assert_eq!(task.await.unwrap(), Err(ProductError::Store(FrameworkError::ActorDropped)));
    }

    #[tokio::test]
    async fn test_closed_store_is_reported() {
        let (store, receiver) = create_mock_store(4, Duration::from_secs(1));
        drop(receiver);
        let placement = OrderPlacementService::new(store);

        let request = CreateOrderRequest::default().line(ProductId(1), 1);
        assert_eq!(
            placement.place_order("alice", request).await,
            Err(PlacementError::PersistenceFailure(FrameworkError::ActorClosed))
        );
    }

    #[tokio::test]
    async fn test_unauthenticated_caller_never_reaches_store() {
        let (store, mut receiver) = create_mock_store(4, Duration::from_secs(1));
        let placement = OrderPlacementService::new(store);

        let request = CreateOrderRequest::default().line(ProductId(1), 1);
        assert_eq!(
            placement.place_order("  ", request).await,
            Err(PlacementError::Unauthenticated)
        );

        drop(placement);
        assert!(expect_job(&mut receiver).await.is_none());
    }
}
