use std::fmt::{Debug, Display};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

use crate::store::JsonFileStore;

// =============================================================================
// 1. THE ABSTRACTION (Entity trait with hooks and actions)
// =============================================================================

/// Errors surfaced by a [`ResourceActor`] or its client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FrameworkError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error("Invalid item: {0}")]
    Invalid(String),
    #[error("Rejected: {0}")]
    Rejected(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

/// Trait that any record must implement to be managed by [`ResourceActor`].
///
/// Records are identified by an id they carry themselves and are persisted
/// as a whole collection through a [`JsonFileStore`].
pub trait Entity: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    type Id: PartialEq + Clone + Send + Sync + Display + Debug;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;

    fn id(&self) -> &Self::Id;

    /// Checked before a new record is stored. Return `Invalid` to refuse it.
    fn on_create(&mut self) -> Result<(), FrameworkError> {
        Ok(())
    }

    /// Handle a domain-specific action. An `Err` leaves the store untouched.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, FrameworkError>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        item: T,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Owns a file-backed collection and applies requests to it one at a time.
///
/// Each mutating request is a full load, modify, save cycle against the
/// file, so the file stays the source of truth and cycles never interleave.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: JsonFileStore<T>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(buffer_size: usize, store: JsonFileStore<T>) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver, store };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    #[instrument(name = "resource_actor", skip(self), fields(store = %self.store.path().display()))]
    pub async fn run(mut self) {
        info!("ResourceActor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { item, respond_to } => {
                    let _ = respond_to.send(self.handle_create(item).await);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.load_all().await.into_iter().find(|item| item.id() == &id);
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.load_all().await));
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let _ = respond_to.send(self.handle_action(id, action).await);
                }
            }
        }
        info!("ResourceActor stopped");
    }

    #[instrument(fields(id = %item.id()), skip(self, item))]
    async fn handle_create(&mut self, mut item: T) -> Result<T::Id, FrameworkError> {
        debug!("Processing create request");
        let mut items = self.store.load_all().await;
        if items.iter().any(|existing| existing.id() == item.id()) {
            warn!("Refusing to overwrite existing item");
            return Err(FrameworkError::AlreadyExists(item.id().to_string()));
        }
        item.on_create()?;

        let id = item.id().clone();
        items.push(item);
        self.persist(&items).await?;
        info!(items = items.len(), "Item created");
        Ok(id)
    }

    #[instrument(fields(id = %id), skip(self, action))]
    async fn handle_action(
        &mut self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        debug!(?action, "Processing action request");
        let mut items = self.store.load_all().await;
        let Some(item) = items.iter_mut().find(|item| item.id() == &id) else {
            debug!("Item not found");
            return Err(FrameworkError::NotFound(id.to_string()));
        };

        let result = item.handle_action(action)?;
        self.persist(&items).await?;
        Ok(result)
    }

    async fn persist(&self, items: &[T]) -> Result<(), FrameworkError> {
        self.store
            .save_all(items)
            .await
            .map_err(|e| FrameworkError::Storage(e.to_string()))
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn create(&self, item: T) -> Result<T::Id, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Create { item, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Get { id, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::List { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Action { id, action, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Ticket {
        id: String,
        holder: String,
        redeemed: bool,
    }

    #[derive(Debug)]
    enum TicketAction {
        Redeem,
        Transfer(String),
    }

    impl Entity for Ticket {
        type Id = String;
        type Action = TicketAction;
        type ActionResult = bool;

        fn id(&self) -> &String {
            &self.id
        }

        fn on_create(&mut self) -> Result<(), FrameworkError> {
            if self.redeemed {
                return Err(FrameworkError::Invalid("new tickets start unredeemed".into()));
            }
            Ok(())
        }

        fn handle_action(&mut self, action: TicketAction) -> Result<bool, FrameworkError> {
            match action {
                TicketAction::Redeem => {
                    if self.redeemed {
                        Ok(false)
                    } else {
                        self.redeemed = true;
                        Ok(true)
                    }
                }
                TicketAction::Transfer(holder) => {
                    if self.redeemed {
                        return Err(FrameworkError::Rejected(format!("{} already redeemed", self.id)));
                    }
                    self.holder = holder;
                    Ok(true)
                }
            }
        }
    }

    fn ticket(id: &str) -> Ticket {
        Ticket {
            id: id.to_string(),
            holder: "Alice".to_string(),
            redeemed: false,
        }
    }

    fn start(dir: &tempfile::TempDir) -> (ResourceClient<Ticket>, JsonFileStore<Ticket>) {
        let path = dir.path().join("tickets.json");
        let (actor, client) = ResourceActor::new(10, JsonFileStore::new(&path));
        tokio::spawn(actor.run());
        (client, JsonFileStore::new(path))
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_resource_actor_with_actions() {
        let dir = tempfile::tempdir().unwrap();
        let (client, store) = start(&dir);

        // 1. Create
        let id = client.create(ticket("t1")).await.unwrap();
        assert_eq!(id, "t1");

        // 2. Perform Action: Redeem
        let changed = client.perform_action(id.clone(), TicketAction::Redeem).await.unwrap();
        assert!(changed);

        // Verify state, both through the actor and on disk
        let stored = client.get(id.clone()).await.unwrap().unwrap();
        assert!(stored.redeemed);
        assert!(store.load_all().await[0].redeemed);

        // 3. Redeem again (no change)
        let changed_again = client.perform_action(id.clone(), TicketAction::Redeem).await.unwrap();
        assert!(!changed_again);

        // 4. Rejected action leaves the record alone
        let err = client
            .perform_action(id.clone(), TicketAction::Transfer("Bob".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, FrameworkError::Rejected(_)));
        assert_eq!(client.get(id).await.unwrap().unwrap().holder, "Alice");
    }

    #[tokio::test]
    async fn create_refuses_duplicates_and_invalid_items() {
        let dir = tempfile::tempdir().unwrap();
        let (client, _store) = start(&dir);

        client.create(ticket("t1")).await.unwrap();
        let mut dup = ticket("t1");
        dup.holder = "Mallory".into();
        assert_eq!(
            client.create(dup).await,
            Err(FrameworkError::AlreadyExists("t1".into()))
        );

        let mut used = ticket("t2");
        used.redeemed = true;
        assert!(matches!(client.create(used).await, Err(FrameworkError::Invalid(_))));

        let all = client.list().await.unwrap();
        assert_eq!(all, vec![ticket("t1")]);
    }

    #[tokio::test]
    async fn action_on_missing_item_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let (client, store) = start(&dir);

        let err = client
            .perform_action("ghost".into(), TicketAction::Redeem)
            .await
            .unwrap_err();
        assert_eq!(err, FrameworkError::NotFound("ghost".into()));
        assert!(store.load_all().await.is_empty());
        assert_eq!(client.get("ghost".into()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn concurrent_creates_are_all_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let (client, store) = start(&dir);

        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let client = client.clone();
                tokio::spawn(async move { client.create(ticket(&format!("t{i}"))).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(store.load_all().await.len(), 16);
    }

    #[tokio::test]
    async fn client_reports_closed_actor() {
        let (sender, receiver) = mpsc::channel::<ResourceRequest<Ticket>>(1);
        drop(receiver);
        let client = ResourceClient::new(sender);
        assert_eq!(client.list().await, Err(FrameworkError::ActorClosed));
    }
}
