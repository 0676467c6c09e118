//! Event hub
//!
//! Fans clock events out to every connected WebSocket client. The clock
//! has a single event stream, so there is no topic filtering: every
//! registered connection receives every event through its own mpsc
//! channel.

use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use super::messages::ClockEvent;

/// Unique identifier for a WebSocket connection
pub type ConnectionId = String;

/// Fans events out to all registered connections
pub struct EventHub {
    /// Active connections: ConnectionId → channel sender
    connections: Arc<RwLock<HashMap<ConnectionId, mpsc::UnboundedSender<ClockEvent>>>>,
    /// Configuration
    config: HubConfig,
}

/// Configuration for the event hub
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Maximum number of concurrent connections
    pub max_connections: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            max_connections: 64,
        }
    }
}

impl EventHub {
    /// Create a new event hub
    pub fn new(config: HubConfig) -> Self {
        Self {
            connections: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    /// Register a new connection
    ///
    /// Returns the connection ID on success, or an error if the
    /// connection limit has been reached.
    pub async fn register(
        &self,
        sender: mpsc::UnboundedSender<ClockEvent>,
    ) -> Result<ConnectionId, HubError> {
        let mut connections = self.connections.write().await;
        if connections.len() >= self.config.max_connections {
            return Err(HubError::TooManyConnections(self.config.max_connections));
        }

        let id = Uuid::new_v4().to_string();
        connections.insert(id.clone(), sender);

        tracing::info!(connection_id = %id, "WebSocket connected");
        Ok(id)
    }

    /// Unregister a connection
    pub async fn unregister(&self, id: &str) {
        self.connections.write().await.remove(id);
        tracing::info!(connection_id = %id, "WebSocket disconnected");
    }

    /// Send an event to every registered connection
    pub async fn publish(&self, event: ClockEvent) {
        let connections = self.connections.read().await;
        if connections.is_empty() {
            return;
        }

        let mut sent_count = 0;
        for sender in connections.values() {
            if sender.send(event.clone()).is_ok() {
                sent_count += 1;
            }
        }

        tracing::trace!(receivers = sent_count, "Published clock event");
    }

    /// Send an event directly to a specific connection
    pub async fn send_to(&self, id: &str, event: ClockEvent) -> Result<(), HubError> {
        let connections = self.connections.read().await;
        let sender = connections.get(id).ok_or(HubError::ConnectionNotFound)?;

        sender.send(event).map_err(|_| HubError::SendFailed)
    }

    /// Get the current connection count
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }
}

/// Errors that can occur in the event hub
#[derive(Debug, Error)]
pub enum HubError {
    #[error("Too many connections (limit: {0})")]
    TooManyConnections(usize),

    #[error("Connection not found")]
    ConnectionNotFound,

    #[error("Failed to send event")]
    SendFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HubConfig::default();
        assert_eq!(config.max_connections, 64);
    }

    #[tokio::test]
    async fn test_register_unregister() {
        let hub = EventHub::new(HubConfig::default());
        let (tx, _rx) = mpsc::unbounded_channel();

        let id = hub.register(tx).await.unwrap();
        assert!(!id.is_empty());
        assert_eq!(hub.connection_count().await, 1);

        hub.unregister(&id).await;
        assert_eq!(hub.connection_count().await, 0);
    }

    #[tokio::test]
    async fn test_connection_limit() {
        let hub = EventHub::new(HubConfig { max_connections: 2 });

        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        let (tx3, _rx3) = mpsc::unbounded_channel();

        let id1 = hub.register(tx1).await.unwrap();
        let id2 = hub.register(tx2).await.unwrap();
        let result = hub.register(tx3).await;

        assert!(matches!(result, Err(HubError::TooManyConnections(2))));

        hub.unregister(&id1).await;
        hub.unregister(&id2).await;
    }

    #[tokio::test]
    async fn test_publish_reaches_all_connections() {
        let hub = EventHub::new(HubConfig::default());

        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();

        let id1 = hub.register(tx1).await.unwrap();
        let id2 = hub.register(tx2).await.unwrap();

        hub.publish(ClockEvent::Pong).await;

        assert!(rx1.try_recv().is_ok());
        assert!(rx2.try_recv().is_ok());

        hub.unregister(&id1).await;
        hub.unregister(&id2).await;
    }

    #[tokio::test]
    async fn test_send_to_unknown_connection() {
        let hub = EventHub::new(HubConfig::default());

        let result = hub.send_to("no-such-id", ClockEvent::Pong).await;
        assert!(matches!(result, Err(HubError::ConnectionNotFound)));
    }
}
