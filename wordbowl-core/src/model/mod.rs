mod game_state;
mod peer;
mod phase;
mod player;
mod room;
mod team;
mod turn;
mod words;

pub use game_state::GameState;
pub use peer::PeerId;
pub use phase::GamePhase;
pub use player::{PlayWordAction, Player};
pub use room::RoomId;
pub use team::{Team, TeamColor, TeamId};
pub use turn::TurnState;
pub use words::WordDeck;

/// Label of the game data channel; both ends of a peer link must agree on it.
pub const GAME_CHANNEL_LABEL: &str = "game-data";
