//! Reference publisher — announces the wall-clock time at a fixed interval.

use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};

use pulsehub_domain::message::Message;
use pulsehub_domain::time;

use crate::ports::MessagePublisher;

/// Publishes `Current Time: …` every `period` until the hub goes away.
pub struct ClockTicker<P> {
    publisher: P,
    period: Duration,
}

impl<P> ClockTicker<P>
where
    P: MessagePublisher,
{
    /// Create a ticker. `period` must be non-zero.
    #[must_use]
    pub fn new(publisher: P, period: Duration) -> Self {
        Self { publisher, period }
    }

    /// Run until the publisher rejects a message.
    ///
    /// The first message goes out one full period after the call, not
    /// immediately. Ticks missed while the runtime was busy are delayed
    /// rather than fired in a burst.
    pub async fn run(self) {
        let mut interval = tokio::time::interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            let message = Message::from(time::clock_message(time::now_local()));
            if let Err(err) = self.publisher.publish(message).await {
                tracing::info!(%err, "stopping clock ticker");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use pulsehub_domain::error::HubError;

    use super::*;

    /// Accepts `limit` messages, then reports the hub as closed.
    struct RecordingPublisher {
        received: Arc<Mutex<Vec<(Instant, Message)>>>,
        limit: usize,
    }

    impl MessagePublisher for RecordingPublisher {
        async fn publish(&self, message: Message) -> Result<(), HubError> {
            let mut received = self.received.lock().unwrap();
            if received.len() >= self.limit {
                return Err(HubError::Closed);
            }
            received.push((Instant::now(), message));
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn should_publish_clock_messages_once_per_period() {
        let received = Arc::new(Mutex::new(Vec::new()));
        let publisher = RecordingPublisher {
            received: Arc::clone(&received),
            limit: 3,
        };
        let start = Instant::now();

        ClockTicker::new(publisher, Duration::from_secs(2)).run().await;

        let received = received.lock().unwrap();
        assert_eq!(received.len(), 3);
        for (n, (at, message)) in received.iter().enumerate() {
            let expected = Duration::from_secs(2) * u32::try_from(n + 1).unwrap();
            assert_eq!(at.duration_since(start), expected);
            assert!(message.as_str().starts_with("Current Time: "));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn should_stop_when_hub_is_closed() {
        let (hub, handle) = crate::hub::Hub::new(4);
        drop(hub);

        let start = Instant::now();
        ClockTicker::new(handle, Duration::from_millis(500))
            .run()
            .await;

        assert_eq!(start.elapsed(), Duration::from_millis(500));
    }
}
