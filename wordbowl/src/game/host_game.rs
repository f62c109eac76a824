use crate::game::inner::{GameInner, broadcast_sync};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};
use wordbowl_core::{Envelope, Payload, PeerId};
use wordbowl_net::{HostBehavior, LinkContext};

/// Host-side message handling: every inbound message mutates the
/// authoritative state through the dispatch table, then the full state goes
/// back out as SYNC to every open link.
pub(crate) struct HostGame {
    pub(crate) inner: Arc<GameInner>,
}

#[async_trait]
impl HostBehavior for HostGame {
    async fn on_peer_joined(&self, _ctx: &LinkContext, peer_id: PeerId) {
        // the player appears in the state only once its JOIN_GAME arrives
        info!(%peer_id, "channel open, awaiting JOIN_GAME");
    }

    async fn on_message(&self, ctx: &LinkContext, peer_id: PeerId, envelope: Envelope) {
        if matches!(envelope.payload, Payload::Sync(_)) {
            warn!(%peer_id, "SYNC from a client ignored");
            return;
        }

        self.inner.apply_and_publish(&envelope).await;
        broadcast_sync(&self.inner, ctx).await;
    }

    async fn on_peer_left(&self, _ctx: &LinkContext, peer_id: PeerId) {
        // the player entry stays in the state; there is no rejoin protocol
        info!(%peer_id, "peer link closed");
    }
}
