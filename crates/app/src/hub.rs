//! Broadcast hub — the single owner of the subscriber set.
//!
//! All registrations, deregistrations and publishes are turned into
//! [`Command`]s and pushed onto one unbounded queue. [`Hub::run`] drains that
//! queue one command at a time, which gives a total order over membership
//! changes and broadcasts without any lock around the subscriber map.
//!
//! Fan-out never waits on a subscriber: each outbox is bounded and written
//! with `try_send`. A full outbox loses that one message, a closed outbox
//! removes the subscriber.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};

use pulsehub_domain::error::HubError;
use pulsehub_domain::id::{IdSequence, SubscriberId};
use pulsehub_domain::message::Message;

use crate::ports::MessagePublisher;
use crate::subscriber::{Subscriber, Subscription};

/// Requests processed by the hub loop, in arrival order.
#[derive(Debug)]
enum Command {
    Register(Subscriber),
    Deregister(SubscriberId),
    Publish(Message),
    Count(oneshot::Sender<usize>),
    Shutdown,
}

/// The hub's control loop and the state only it may touch.
///
/// Create it with [`Hub::new`], spawn [`Hub::run`] on the runtime, and talk
/// to it through the returned [`HubHandle`].
#[derive(Debug)]
pub struct Hub {
    commands: mpsc::UnboundedReceiver<Command>,
    subscribers: HashMap<SubscriberId, Subscriber>,
}

impl Hub {
    /// Create a hub whose subscriptions get outboxes of `outbox_capacity`
    /// pending messages.
    #[must_use]
    pub fn new(outbox_capacity: usize) -> (Self, HubHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let hub = Self {
            commands: rx,
            subscribers: HashMap::new(),
        };
        let handle = HubHandle {
            commands: tx,
            ids: Arc::new(IdSequence::new()),
            outbox_capacity: outbox_capacity.max(1),
        };
        (hub, handle)
    }

    /// Process commands until [`HubHandle::shutdown`] is called or every
    /// handle has been dropped.
    ///
    /// On exit every outbox is dropped, which ends all open subscriptions.
    pub async fn run(mut self) {
        tracing::debug!("broadcast hub started");
        while let Some(command) = self.commands.recv().await {
            match command {
                Command::Register(subscriber) => self.register(subscriber),
                Command::Deregister(id) => self.deregister(id),
                Command::Publish(message) => self.broadcast(&message),
                Command::Count(reply) => {
                    let _ = reply.send(self.subscribers.len());
                }
                Command::Shutdown => break,
            }
        }
        tracing::info!(
            subscribers = self.subscribers.len(),
            "broadcast hub stopped"
        );
    }

    fn register(&mut self, subscriber: Subscriber) {
        let id = subscriber.id();
        if self.subscribers.insert(id, subscriber).is_some() {
            tracing::warn!(subscriber = %id, "subscriber id registered twice, replacing");
        } else {
            tracing::info!(subscriber = %id, "client connected");
        }
    }

    fn deregister(&mut self, id: SubscriberId) {
        if self.subscribers.remove(&id).is_some() {
            tracing::info!(subscriber = %id, "client disconnected");
        }
    }

    fn broadcast(&mut self, message: &Message) {
        self.subscribers
            .retain(|id, subscriber| match subscriber.outbox().try_send(message.clone()) {
                Ok(()) => true,
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(subscriber = %id, "outbox full, dropping message");
                    true
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::debug!(subscriber = %id, "outbox closed, removing subscriber");
                    false
                }
            });
    }
}

/// Cloneable handle used by transports and publishers to reach the hub.
///
/// Every method only enqueues a request; none of them waits for the hub to
/// process it, except [`HubHandle::subscriber_count`] which needs an answer.
/// Requests issued one after another from any task are processed in that order.
///
/// The request queue is unbounded so callers never wait on the hub. A producer
/// that publishes faster than the loop can fan out makes the queue, and its
/// memory, grow without bound.
#[derive(Debug, Clone)]
pub struct HubHandle {
    commands: mpsc::UnboundedSender<Command>,
    ids: Arc<IdSequence>,
    outbox_capacity: usize,
}

impl HubHandle {
    /// Allocate a subscriber identity that no other subscriber has used.
    #[must_use]
    pub fn next_id(&self) -> SubscriberId {
        self.ids.allocate()
    }

    /// Add `subscriber` to the membership set.
    ///
    /// The subscriber receives every message published after this call.
    /// Its id must not belong to a subscriber that is still registered.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Closed`] if the hub has stopped.
    pub fn register(&self, subscriber: Subscriber) -> Result<(), HubError> {
        self.send(Command::Register(subscriber))
    }

    /// Remove the subscriber with `id`. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Closed`] if the hub has stopped.
    pub fn deregister(&self, id: SubscriberId) -> Result<(), HubError> {
        self.send(Command::Deregister(id))
    }

    /// Fan `message` out to every subscriber registered when the hub gets to it.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Closed`] if the hub has stopped.
    pub fn publish(&self, message: impl Into<Message>) -> Result<(), HubError> {
        self.send(Command::Publish(message.into()))
    }

    /// Register a fresh subscriber and return its receiving end.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Closed`] if the hub has stopped.
    pub fn subscribe(&self) -> Result<Subscription, HubError> {
        let (subscriber, outbox) = Subscriber::new(self.next_id(), self.outbox_capacity);
        let id = subscriber.id();
        self.register(subscriber)?;
        Ok(Subscription::new(id, outbox, self.clone()))
    }

    /// Number of registered subscribers, as seen after every request queued
    /// before this one.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Closed`] if the hub has stopped.
    pub async fn subscriber_count(&self) -> Result<usize, HubError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Count(reply))?;
        rx.await.map_err(|_| HubError::Closed)
    }

    /// Ask the hub to stop. Requests queued before this one are still
    /// processed; everything after fails with [`HubError::Closed`].
    pub fn shutdown(&self) {
        if self.send(Command::Shutdown).is_ok() {
            tracing::info!("broadcast hub shutdown requested");
        }
    }

    /// Whether the hub loop is still accepting requests.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }

    fn send(&self, command: Command) -> Result<(), HubError> {
        self.commands.send(command).map_err(|_| HubError::Closed)
    }
}

impl MessagePublisher for HubHandle {
    fn publish(&self, message: Message) -> impl Future<Output = Result<(), HubError>> + Send {
        let result = HubHandle::publish(self, message);
        async move { result }
    }
}
