//! Publisher port — hands messages to the broadcast hub.

use std::future::Future;

use pulsehub_domain::error::HubError;
use pulsehub_domain::message::Message;

/// Accepts messages for delivery to all current subscribers.
///
/// Publishing is fire-and-forget: a successful return means the message was
/// accepted, not that any subscriber has read it.
pub trait MessagePublisher {
    /// Publish a message to all current subscribers.
    fn publish(&self, message: Message) -> impl Future<Output = Result<(), HubError>> + Send;
}

impl<T: MessagePublisher + Send + Sync> MessagePublisher for std::sync::Arc<T> {
    fn publish(&self, message: Message) -> impl Future<Output = Result<(), HubError>> + Send {
        (**self).publish(message)
    }
}
