use bytes::Bytes;
use std::sync::Arc;
use webrtc::data_channel::RTCDataChannel;
use wordbowl_core::PeerId;

/// Events a peer link emits into its owning service loop.
pub enum TransportEvent {
    /// The game data channel is open and ready for writes.
    ChannelOpen(PeerId, Arc<RTCDataChannel>),
    /// A raw frame arrived on the data channel.
    Message(PeerId, Bytes),
    /// Trickle ICE produced a local candidate to publish via the store.
    CandidateGenerated(PeerId, String),
    /// The channel closed or the connection dropped.
    Disconnected(PeerId),
}
