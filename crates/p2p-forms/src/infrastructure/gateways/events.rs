//! Domain event sinks

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::events::DomainEvent;
use crate::error::GatewayError;
use crate::ports::outbound::EventPublisher;

/// Writes each event to the `tracing` pipeline
#[derive(Debug, Default)]
pub struct TracingEventPublisher;

#[async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, events: Vec<DomainEvent>) -> Result<(), GatewayError> {
        for event in events {
            info!(event_type = event.event_type(), form_id = %event.form_id(), "form event");
        }
        Ok(())
    }
}

/// Keeps published events for inspection
#[derive(Debug, Default)]
pub struct InMemoryEventPublisher {
    events: Mutex<Vec<DomainEvent>>,
}

impl InMemoryEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn event_types(&self) -> Vec<&'static str> {
        self.events.lock().await.iter().map(DomainEvent::event_type).collect()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventPublisher {
    async fn publish(&self, events: Vec<DomainEvent>) -> Result<(), GatewayError> {
        self.events.lock().await.extend(events);
        Ok(())
    }
}
