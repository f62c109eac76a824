pub mod client;
mod error;
pub mod host;
pub mod signaling;
pub mod store;
pub mod transport;

pub use client::{ClientBehavior, ClientContext, ClientService};
pub use error::{HostError, JoinError};
pub use host::{HostBehavior, HostService, LinkContext};
pub use signaling::{allocate_room_id, random_room_id};
pub use store::{
    CandidateSide, JoinRequestSnapshot, MemoryStore, SessionDescription, SignalingStore, StoreError,
};
pub use transport::{PeerLink, TransportConfig, TransportEvent};
