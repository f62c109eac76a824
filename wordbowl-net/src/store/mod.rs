mod capability;
mod memory;
mod types;

pub use capability::{CandidateSide, SignalingStore, StoreError};
pub use memory::MemoryStore;
pub use types::{JoinRequestSnapshot, SessionDescription};
