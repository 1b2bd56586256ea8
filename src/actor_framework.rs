use std::collections::BTreeMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

// =============================================================================
// 1. THE ABSTRACTION (Entities stored in tables)
// =============================================================================

/// Trait that any row type must implement to be stored in a [`Table`].
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Ord + Hash + Copy + Send + Sync + Display + Debug + From<u32>;
    type CreateParams: Send + Debug;
    type UpdateParams: Send + Debug;
    type Error: Send + Debug;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from the ID and creation parameters
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, Self::Error>;

    /// Apply an update in place
    fn on_update(&mut self, update: Self::UpdateParams) -> Result<(), Self::Error>;
}

/// Entities with domain-specific operations beyond create and update.
pub trait Actionable: Entity {
    type Action: Send + Debug;
    type ActionResult: Send + Debug;

    /// Handle a custom domain-specific action
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}

/// Rows of one entity type, keyed by id, with a monotonically increasing id sequence.
#[derive(Debug, Clone)]
pub struct Table<T: Entity> {
    rows: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: Entity> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T: Entity> Table<T> {
    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.rows.get(id)
    }

    /// The id the `offset`-th insert from now would receive. Does not consume it.
    pub fn peek_id(&self, offset: u32) -> T::Id {
        T::Id::from(self.next_id + offset)
    }

    /// Advances the sequence past every id handed out by [`Table::peek_id`].
    pub fn consume_ids(&mut self, count: u32) {
        self.next_id += count;
    }

    /// Inserts or replaces a row.
    pub fn put(&mut self, row: T) {
        self.rows.insert(*row.id(), row);
    }

    pub fn remove(&mut self, id: &T::Id) -> Option<T> {
        self.rows.remove(id)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped the request")]
    ActorDropped,
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

/// Work shipped to the actor. It runs on the actor task with exclusive access
/// to the state and answers through its own captured responder.
pub type Job<S> = Box<dyn FnOnce(&mut S) + Send>;

pub enum ResourceRequest<S> {
    Execute { job: Job<S> },
}

impl<S> Debug for ResourceRequest<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceRequest::Execute { .. } => f.write_str("Execute"),
        }
    }
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Owns a piece of state and applies jobs to it one at a time.
pub struct ResourceActor<S> {
    receiver: mpsc::Receiver<ResourceRequest<S>>,
    state: S,
}

impl<S: Send + 'static> ResourceActor<S> {
    pub fn new(buffer_size: usize, state: S, timeout: Duration) -> (Self, ResourceClient<S>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver, state };
        let client = ResourceClient::new(sender, timeout);
        (actor, client)
    }

    /// Runs until every client is dropped, then hands the state back.
    pub async fn run(mut self) -> S {
        info!("ResourceActor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Execute { job } => job(&mut self.state),
            }
        }
        info!("ResourceActor stopped");
        self.state
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<S> {
    sender: mpsc::Sender<ResourceRequest<S>>,
    timeout: Duration,
}

impl<S> Clone for ResourceClient<S> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            timeout: self.timeout,
        }
    }
}

impl<S: Send + 'static> ResourceClient<S> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<S>>, timeout: Duration) -> Self {
        Self { sender, timeout }
    }

    /// Runs `work` on the actor and waits for its result.
    ///
    /// `work` only reads the state. What it wants written comes back as the
    /// second half of its output and is handed to `apply` once the result has
    /// been delivered to this caller. A caller that stopped waiting (timed
    /// out or dropped) gets nothing and `apply` never runs, so a write is
    /// applied exactly when its result is observed.
    pub async fn call<R, P, F, A>(&self, work: F, apply: A) -> Result<R, FrameworkError>
    where
        R: Send + 'static,
        P: 'static,
        F: FnOnce(&S) -> (R, P) + Send + 'static,
        A: FnOnce(&mut S, P) + Send + 'static,
    {
        let (respond_to, mut response) = oneshot::channel();
        let job: Job<S> = Box::new(move |state: &mut S| {
            if respond_to.is_closed() {
                debug!("Caller gone before execution, skipping job");
                return;
            }
            let (result, pending) = work(&*state);
            if respond_to.send(result).is_ok() {
                apply(state, pending);
            } else {
                debug!("Caller gone before delivery, discarding pending writes");
            }
        });

        debug!("Sending request");
        self.sender
            .send(ResourceRequest::Execute { job })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;

        match tokio::time::timeout(self.timeout, &mut response).await {
            Ok(result) => result.map_err(|_| FrameworkError::ActorDropped),
            Err(_) => {
                // Closing decides the race with the actor: a result sent
                // before this point was applied and is returned, anything
                // later is refused and never applied.
                response.close();
                response.try_recv().map_err(|_| FrameworkError::Timeout(self.timeout))
            }
        }
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
