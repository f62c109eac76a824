use crate::store::types::{JoinRequestSnapshot, SessionDescription};
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;
use wordbowl_core::{PeerId, RoomId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("room {0} not found")]
    RoomNotFound(RoomId),

    #[error("room {0} already exists")]
    RoomExists(RoomId),

    #[error("join request {0} not found")]
    RequestNotFound(PeerId),

    #[error("store backend error: {0}")]
    Backend(String),
}

/// Which side of the exchange a candidate sub-collection belongs to. Each
/// side appends to its own collection and only ever reads the other's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSide {
    Offer,
    Answer,
}

/// The rendezvous document store used to bootstrap peer links.
///
/// Collections are append-only: the `watch_*` feeds replay every existing
/// item as an added event and then deliver live additions. They never
/// deliver update or removal events — `watch_join_request` is the one
/// document-level watch, emitting the current snapshot followed by one
/// snapshot per update. Receivers close when the store goes away.
///
/// Write failures propagate to the caller of the initiating operation and
/// are not retried.
#[async_trait]
pub trait SignalingStore: Send + Sync + 'static {
    async fn create_room(&self, room: &RoomId) -> Result<(), StoreError>;

    async fn room_exists(&self, room: &RoomId) -> Result<bool, StoreError>;

    /// Create an empty join request under the room; the returned id is the
    /// requesting client's assigned peer id.
    async fn create_join_request(&self, room: &RoomId) -> Result<PeerId, StoreError>;

    async fn set_offer(
        &self,
        room: &RoomId,
        request: &PeerId,
        offer: &SessionDescription,
    ) -> Result<(), StoreError>;

    async fn set_answer(
        &self,
        room: &RoomId,
        request: &PeerId,
        answer: &SessionDescription,
    ) -> Result<(), StoreError>;

    async fn append_candidate(
        &self,
        room: &RoomId,
        request: &PeerId,
        side: CandidateSide,
        candidate: &str,
    ) -> Result<(), StoreError>;

    async fn watch_join_requests(
        &self,
        room: &RoomId,
    ) -> Result<mpsc::UnboundedReceiver<PeerId>, StoreError>;

    async fn watch_join_request(
        &self,
        room: &RoomId,
        request: &PeerId,
    ) -> Result<mpsc::UnboundedReceiver<JoinRequestSnapshot>, StoreError>;

    async fn watch_candidates(
        &self,
        room: &RoomId,
        request: &PeerId,
        side: CandidateSide,
    ) -> Result<mpsc::UnboundedReceiver<String>, StoreError>;
}
