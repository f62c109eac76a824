pub mod game;

pub use game::GameService;
pub use wordbowl_core::{
    Envelope, GamePhase, GameState, Payload, PeerId, PlayWordAction, Player, RoomId, Team,
    TeamColor, TeamId,
};
pub use wordbowl_net::{
    HostError, JoinError, MemoryStore, SignalingStore, StoreError, TransportConfig,
};
