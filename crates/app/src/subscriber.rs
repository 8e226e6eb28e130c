//! Subscriber records held by the hub and the matching receiving end.

use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::mpsc;
use tokio_stream::Stream;

use pulsehub_domain::id::SubscriberId;
use pulsehub_domain::message::Message;

use crate::hub::HubHandle;

/// A registered subscriber as seen by the hub: an identity and the sending
/// half of its bounded outbox.
#[derive(Debug)]
pub struct Subscriber {
    id: SubscriberId,
    outbox: mpsc::Sender<Message>,
}

impl Subscriber {
    /// Create a subscriber with an outbox holding at most `capacity` pending
    /// messages (at least one).
    ///
    /// Returns the subscriber, to be handed to the hub, and the receiving
    /// half of its outbox, to be drained by the transport.
    #[must_use]
    pub fn new(id: SubscriberId, capacity: usize) -> (Self, mpsc::Receiver<Message>) {
        let (outbox, rx) = mpsc::channel(capacity.max(1));
        (Self { id, outbox }, rx)
    }

    /// The subscriber's identity.
    #[must_use]
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    pub(crate) fn outbox(&self) -> &mpsc::Sender<Message> {
        &self.outbox
    }
}

/// Transport-side end of a registration.
///
/// Yields the messages fanned out to this subscriber, in publish order.
/// Dropping the subscription deregisters it from the hub, so a transport
/// only has to drop it when its connection goes away.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriberId,
    outbox: mpsc::Receiver<Message>,
    hub: HubHandle,
}

impl Subscription {
    pub(crate) fn new(id: SubscriberId, outbox: mpsc::Receiver<Message>, hub: HubHandle) -> Self {
        Self { id, outbox, hub }
    }

    /// The identity the hub assigned to this subscription.
    #[must_use]
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Wait for the next message.
    ///
    /// Returns `None` once the hub has dropped this subscriber, either
    /// because it shut down or because the subscription was deregistered.
    pub async fn recv(&mut self) -> Option<Message> {
        self.outbox.recv().await
    }
}

impl Stream for Subscription {
    type Item = Message;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().outbox.poll_recv(cx)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        // The hub may already be gone during shutdown; nothing left to clean up then.
        let _ = self.hub.deregister(self.id);
    }
}
