use crate::model::{GameState, PeerId, PlayWordAction, Player, TeamId};
use serde::{Deserialize, Serialize};

/// One message on a peer link. Serializes to `{method, senderId, data}`;
/// the method tag alone determines the shape of `data`, so a frame whose
/// payload does not match its method fails to decode as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "senderId")]
    pub sender_id: PeerId,
    #[serde(flatten)]
    pub payload: Payload,
}

impl Envelope {
    pub fn new(sender_id: PeerId, payload: Payload) -> Self {
        Self { sender_id, payload }
    }

    pub fn method(&self) -> &'static str {
        self.payload.method()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", content = "data")]
pub enum Payload {
    /// A player announces itself to the host right after its channel opens.
    #[serde(rename = "JOIN_GAME")]
    JoinGame(Player),

    /// Full game-state snapshot, host to clients only. Receivers replace
    /// their local state wholesale.
    #[serde(rename = "SYNC")]
    Sync(GameState),

    #[serde(rename = "JOIN_TEAM")]
    JoinTeam {
        #[serde(rename = "teamId")]
        team_id: TeamId,
        #[serde(rename = "playerId")]
        player_id: PeerId,
    },

    #[serde(rename = "PLAY_WORD")]
    PlayWord {
        #[serde(rename = "type")]
        action: PlayWordAction,
        #[serde(rename = "teamId")]
        team_id: TeamId,
        #[serde(rename = "playerId")]
        player_id: PeerId,
    },

    #[serde(rename = "UPDATE_TURN")]
    UpdateTurn {},

    #[serde(rename = "UPDATE_WORDS")]
    UpdateWords { reset: bool, words: Vec<String> },

    #[serde(rename = "TOGGLE_PAUSE")]
    TogglePause {},

    #[serde(rename = "RESTART")]
    Restart {},
}

impl Payload {
    pub fn method(&self) -> &'static str {
        match self {
            Self::JoinGame(_) => "JOIN_GAME",
            Self::Sync(_) => "SYNC",
            Self::JoinTeam { .. } => "JOIN_TEAM",
            Self::PlayWord { .. } => "PLAY_WORD",
            Self::UpdateTurn {} => "UPDATE_TURN",
            Self::UpdateWords { .. } => "UPDATE_WORDS",
            Self::TogglePause {} => "TOGGLE_PAUSE",
            Self::Restart {} => "RESTART",
        }
    }
}
