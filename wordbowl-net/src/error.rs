use crate::store::StoreError;
use thiserror::Error;
use wordbowl_core::RoomId;

#[derive(Debug, Error)]
pub enum HostError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum JoinError {
    #[error("room {0} not found")]
    RoomNotFound(RoomId),

    #[error("client already holds a link to a host")]
    AlreadyJoined,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("transport setup failed: {0}")]
    Transport(#[source] anyhow::Error),

    #[error("signaling ended before the data channel opened")]
    ChannelClosed,
}
