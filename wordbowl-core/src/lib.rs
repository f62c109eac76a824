pub mod model;
pub mod protocol;

pub use model::{
    GAME_CHANNEL_LABEL, GamePhase, GameState, PeerId, PlayWordAction, Player, RoomId, Team,
    TeamColor, TeamId, TurnState, WordDeck,
};
pub use protocol::{Envelope, Payload, apply};
