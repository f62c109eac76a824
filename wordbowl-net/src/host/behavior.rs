use crate::host::context::LinkContext;
use async_trait::async_trait;
use wordbowl_core::{Envelope, PeerId};

/// Game-side hooks invoked by the host service loop. Messages arrive
/// already decoded; frames that fail to decode never reach the behavior.
///
/// Hooks run to completion inside the single service loop, so a behavior
/// never observes two of its own invocations interleaved.
#[async_trait]
pub trait HostBehavior: Send + Sync + 'static {
    /// A peer's data channel opened.
    async fn on_peer_joined(&self, ctx: &LinkContext, peer_id: PeerId);

    /// A decoded message arrived from a peer.
    async fn on_message(&self, ctx: &LinkContext, peer_id: PeerId, envelope: Envelope);

    /// A peer's channel closed or its connection dropped.
    async fn on_peer_left(&self, ctx: &LinkContext, peer_id: PeerId);
}
