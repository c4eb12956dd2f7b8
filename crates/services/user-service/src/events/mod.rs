//! Event dispatch for domain events drained from the `User` aggregate.
//!
//! Publishers are called after a successful save with the user's outbox. The
//! outbox entries are dropped only once `publish` has returned `Ok`, so a
//! failed dispatch is sent again on the user's next commit.

use async_trait::async_trait;
use tokio::sync::Mutex;

use common::{AppError, AppResult};
use domain::UserEvent;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Event publisher trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish events in the order they were recorded
    async fn publish(&self, events: &[UserEvent]) -> AppResult<()>;
}

/// Publishes each event as a structured `tracing` record.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventPublisher;

#[async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, events: &[UserEvent]) -> AppResult<()> {
        for event in events {
            let payload =
                serde_json::to_string(event).map_err(|e| AppError::publish(e.to_string()))?;
            tracing::info!(
                event_type = event.event_type(),
                user_id = %event.user_id(),
                occurred_at = %event.occurred_at(),
                payload = %payload,
                "Domain event published"
            );
        }
        Ok(())
    }
}

/// Collects published events in memory.
#[derive(Debug, Default)]
pub struct InMemoryEventPublisher {
    published: Mutex<Vec<UserEvent>>,
}

impl InMemoryEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything published so far
    pub async fn published(&self) -> Vec<UserEvent> {
        self.published.lock().await.clone()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventPublisher {
    async fn publish(&self, events: &[UserEvent]) -> AppResult<()> {
        self.published.lock().await.extend_from_slice(events);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::UserId;
    use tokio_test::{assert_ok, block_on};

    fn activated() -> UserEvent {
        UserEvent::Activated {
            user_id: UserId::new(),
            occurred_at: Utc::now(),
        }
    }

    #[test]
    fn test_tracing_publisher_accepts_events() {
        let publisher = TracingEventPublisher;
        assert_ok!(block_on(publisher.publish(&[activated()])));
        assert_ok!(block_on(publisher.publish(&[])));
    }

    #[tokio::test]
    async fn test_in_memory_publisher_keeps_order() {
        let publisher = InMemoryEventPublisher::new();
        let first = activated();
        let second = activated();

        publisher.publish(&[first.clone()]).await.unwrap();
        publisher.publish(&[second.clone()]).await.unwrap();

        assert_eq!(publisher.published().await, vec![first, second]);
    }
}
