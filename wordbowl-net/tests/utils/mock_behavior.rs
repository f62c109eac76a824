use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use wordbowl_core::{Envelope, PeerId};
use wordbowl_net::{ClientBehavior, ClientContext, HostBehavior, LinkContext};

/// Events recorded by [`TestHostBehavior`].
#[derive(Debug, Clone)]
pub enum HostEvent {
    Joined(PeerId),
    Message { peer_id: PeerId, envelope: Envelope },
    Left(PeerId),
}

/// Host behavior that records every hook invocation for later assertions.
#[derive(Clone, Default)]
pub struct TestHostBehavior {
    events: Arc<Mutex<Vec<HostEvent>>>,
}

impl TestHostBehavior {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_events(&self) -> Vec<HostEvent> {
        self.events.lock().await.clone()
    }

    /// Wait until at least `count` events were recorded, or give up.
    pub async fn wait_for_events(&self, count: usize, timeout_ms: u64) -> bool {
        let start = std::time::Instant::now();
        let timeout = std::time::Duration::from_millis(timeout_ms);

        loop {
            if self.events.lock().await.len() >= count {
                return true;
            }
            if start.elapsed() > timeout {
                return false;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
    }

    pub async fn has_join(&self, peer_id: &PeerId) -> bool {
        self.events
            .lock()
            .await
            .iter()
            .any(|e| matches!(e, HostEvent::Joined(id) if id == peer_id))
    }

    pub async fn join_count(&self) -> usize {
        self.events
            .lock()
            .await
            .iter()
            .filter(|e| matches!(e, HostEvent::Joined(_)))
            .count()
    }

    pub async fn messages_from(&self, peer_id: &PeerId) -> Vec<Envelope> {
        self.events
            .lock()
            .await
            .iter()
            .filter_map(|e| match e {
                HostEvent::Message {
                    peer_id: id,
                    envelope,
                } if id == peer_id => Some(envelope.clone()),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl HostBehavior for TestHostBehavior {
    async fn on_peer_joined(&self, _ctx: &LinkContext, peer_id: PeerId) {
        tracing::info!(%peer_id, "[TestHostBehavior] on_peer_joined");
        self.events.lock().await.push(HostEvent::Joined(peer_id));
    }

    async fn on_message(&self, _ctx: &LinkContext, peer_id: PeerId, envelope: Envelope) {
        tracing::info!(%peer_id, method = envelope.method(), "[TestHostBehavior] on_message");
        self.events
            .lock()
            .await
            .push(HostEvent::Message { peer_id, envelope });
    }

    async fn on_peer_left(&self, _ctx: &LinkContext, peer_id: PeerId) {
        tracing::info!(%peer_id, "[TestHostBehavior] on_peer_left");
        self.events.lock().await.push(HostEvent::Left(peer_id));
    }
}

/// Client behavior that records channel opens and received envelopes.
#[derive(Clone, Default)]
pub struct TestClientBehavior {
    opens: Arc<Mutex<usize>>,
    messages: Arc<Mutex<Vec<Envelope>>>,
}

impl TestClientBehavior {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn opened(&self) -> bool {
        *self.opens.lock().await > 0
    }

    pub async fn message_count(&self) -> usize {
        self.messages.lock().await.len()
    }

    pub async fn get_messages(&self) -> Vec<Envelope> {
        self.messages.lock().await.clone()
    }

    pub async fn wait_for_messages(&self, count: usize, timeout_ms: u64) -> bool {
        let start = std::time::Instant::now();
        let timeout = std::time::Duration::from_millis(timeout_ms);

        loop {
            if self.messages.lock().await.len() >= count {
                return true;
            }
            if start.elapsed() > timeout {
                return false;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
    }
}

#[async_trait]
impl ClientBehavior for TestClientBehavior {
    async fn on_channel_open(&self, ctx: &ClientContext) {
        tracing::info!(peer_id = %ctx.peer_id(), "[TestClientBehavior] on_channel_open");
        *self.opens.lock().await += 1;
    }

    async fn on_message(&self, _ctx: &ClientContext, envelope: Envelope) {
        tracing::info!(method = envelope.method(), "[TestClientBehavior] on_message");
        self.messages.lock().await.push(envelope);
    }
}
