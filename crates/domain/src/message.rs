//! Broadcast message payload.

use std::fmt;
use std::sync::Arc;

/// An opaque, immutable piece of text delivered to subscribers.
///
/// The hub never looks inside a message. Cloning is cheap (reference
/// counted), so fan-out to many subscribers does not copy the payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Message(Arc<str>);

impl Message {
    /// Create a message from any string-like value.
    #[must_use]
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self(text.into())
    }

    /// Borrow the payload.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_share_payload_between_clones() {
        let message = Message::from("hello");
        let copy = message.clone();
        assert!(std::ptr::eq(message.as_str(), copy.as_str()));
    }

    #[test]
    fn should_display_payload_verbatim() {
        let message = Message::from(String::from("a: b"));
        assert_eq!(message.to_string(), "a: b");
    }
}
