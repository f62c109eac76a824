use serde::{Deserialize, Serialize};

/// Phases of a game, in the order the host drives them. After the initial
/// ramp the game cycles `GamePhase -> TeamReady -> PlayingWord -> GamePhase`
/// until the word pool runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    Lobby,
    BeginGame,
    GamePhase,
    TeamReady,
    PlayingWord,
}

impl GamePhase {
    pub fn next(self) -> Self {
        match self {
            Self::Lobby => Self::BeginGame,
            Self::BeginGame => Self::GamePhase,
            Self::GamePhase => Self::TeamReady,
            Self::TeamReady => Self::PlayingWord,
            Self::PlayingWord => Self::GamePhase,
        }
    }
}

impl Default for GamePhase {
    fn default() -> Self {
        Self::Lobby
    }
}
