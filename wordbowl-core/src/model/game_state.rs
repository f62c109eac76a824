use crate::model::peer::PeerId;
use crate::model::phase::GamePhase;
use crate::model::player::{PlayWordAction, Player};
use crate::model::team::{Team, TeamColor, TeamId};
use crate::model::turn::TurnState;
use crate::model::words::WordDeck;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// The full game state. Exactly one authoritative copy lives on the host;
/// every client holds a disposable mirror that is replaced wholesale on each
/// SYNC message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub players: Vec<Player>,
    pub teams: Vec<Team>,
    pub phase: GamePhase,
    pub words: WordDeck,
    pub turn: TurnState,
    pub paused: bool,
}

impl GameState {
    /// Append a player, preserving arrival order.
    pub fn add_player(&mut self, player: Player) {
        self.players.push(player);
    }

    /// Create the two fixed teams. Idempotent: later joiners must not reset
    /// existing scores or memberships.
    pub fn init_teams(&mut self) {
        if self.teams.is_empty() {
            self.teams.push(Team::new(TeamColor::Red));
            self.teams.push(Team::new(TeamColor::Blue));
        }
    }

    /// Move a player onto a team, leaving any previous team.
    pub fn join_team(&mut self, team_id: TeamId, player_id: &PeerId) {
        if !self.teams.iter().any(|t| t.id == team_id) {
            warn!(%team_id, "join_team for unknown team ignored");
            return;
        }

        for team in &mut self.teams {
            team.players.retain(|p| p != player_id);
        }
        if let Some(team) = self.teams.iter_mut().find(|t| t.id == team_id) {
            team.players.push(player_id.clone());
        }
        if let Some(player) = self.players.iter_mut().find(|p| &p.id == player_id) {
            player.team_id = Some(team_id);
        }
    }

    /// Resolve the word in play; a guess scores for the given team.
    pub fn play_word(&mut self, action: PlayWordAction, team_id: TeamId) {
        let scored = self.words.play(action);
        if scored {
            match self.teams.iter_mut().find(|t| t.id == team_id) {
                Some(team) => team.score += 1,
                None => warn!(%team_id, "play_word scored for unknown team"),
            }
        }
    }

    pub fn update_words(&mut self, reset: bool, words: &[String]) {
        self.words.update(reset, words);
    }

    /// Prepare turn rotation and put the first word in play.
    pub fn init_round(&mut self) {
        self.turn = TurnState::init(self.teams.len());
        if self.words.current.is_none() {
            self.words.draw_next();
        }
    }

    pub fn advance_turn(&mut self) {
        self.turn.advance(&self.teams);
    }

    pub fn next_phase(&mut self) {
        self.phase = self.phase.next();
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Back to the lobby with the same players and team memberships; scores,
    /// deck, and turn rotation start over.
    pub fn restart(&mut self) {
        for team in &mut self.teams {
            team.score = 0;
        }
        self.words = WordDeck::default();
        self.turn = TurnState::default();
        self.phase = GamePhase::Lobby;
        self.paused = false;
    }
}
