use crate::model::peer::PeerId;
use crate::model::team::TeamId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PeerId,
    pub name: String,
    pub is_host: bool,
    pub team_id: Option<TeamId>,
}

impl Player {
    pub fn new(id: PeerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_host: false,
            team_id: None,
        }
    }

    pub fn new_host(name: impl Into<String>) -> Self {
        Self {
            id: PeerId::new(),
            name: name.into(),
            is_host: true,
            team_id: None,
        }
    }
}

/// Outcome of playing the current word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayWordAction {
    Guessed,
    Skipped,
}
