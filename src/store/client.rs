use tracing::debug;

use super::database::Database;
use super::unit_of_work::{ChangeSet, UnitOfWork};
use crate::actor_framework::{FrameworkError, ResourceClient};

/// Handle to the store actor. Cheap to clone.
#[derive(Clone)]
pub struct StoreClient {
    inner: ResourceClient<Database>,
}

impl StoreClient {
    pub fn new(inner: ResourceClient<Database>) -> Self {
        Self { inner }
    }

    /// Runs `work` as one unit of work on the store actor.
    ///
    /// The unit of work is staged on the actor and committed only once its
    /// result has been handed back, so a caller that sees a timeout knows
    /// nothing was written. Store faults (actor gone, timeout) are turned
    /// into `E`.
    pub async fn transaction<R, E, F>(&self, work: F) -> Result<R, E>
    where
        R: Send + 'static,
        E: From<FrameworkError> + Send + 'static,
        F: FnOnce(&mut UnitOfWork<'_>) -> Result<R, E> + Send + 'static,
    {
        debug!("Submitting unit of work");
        self.inner
            .call(
                move |db: &Database| match db.stage(work) {
                    Ok((value, changes)) => (Ok(value), Some(changes)),
                    Err(e) => (Err(e), None),
                },
                |db: &mut Database, changes: Option<ChangeSet>| {
                    if let Some(changes) = changes {
                        db.commit(changes);
                    }
                },
            )
            .await?
    }
}
