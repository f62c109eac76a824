use crate::model::{GameState, PeerId, PlayWordAction, Player, TeamId};
use crate::protocol::envelope::{Envelope, Payload};

/// Apply one decoded message to the game state. This is the entire dispatch
/// table: an exhaustive match over the payload union, one handler per
/// method. Handlers are pure state transitions; delivery, ordering, and
/// replication live in the services.
pub fn apply(state: &mut GameState, envelope: &Envelope) {
    match &envelope.payload {
        Payload::JoinGame(player) => handle_join_game(state, player),
        Payload::Sync(snapshot) => handle_sync(state, snapshot),
        Payload::JoinTeam { team_id, player_id } => handle_join_team(state, *team_id, player_id),
        Payload::PlayWord {
            action, team_id, ..
        } => handle_play_word(state, *action, *team_id),
        Payload::UpdateTurn {} => handle_update_turn(state),
        Payload::UpdateWords { reset, words } => handle_update_words(state, *reset, words),
        Payload::TogglePause {} => handle_toggle_pause(state),
        Payload::Restart {} => handle_restart(state),
    }
}

fn handle_join_game(state: &mut GameState, player: &Player) {
    state.add_player(player.clone());
    state.init_teams();
}

fn handle_sync(state: &mut GameState, snapshot: &GameState) {
    *state = snapshot.clone();
}

fn handle_join_team(state: &mut GameState, team_id: TeamId, player_id: &PeerId) {
    state.join_team(team_id, player_id);
}

fn handle_play_word(state: &mut GameState, action: PlayWordAction, team_id: TeamId) {
    state.play_word(action, team_id);
}

fn handle_update_turn(state: &mut GameState) {
    state.advance_turn();
}

fn handle_update_words(state: &mut GameState, reset: bool, words: &[String]) {
    state.update_words(reset, words);
}

fn handle_toggle_pause(state: &mut GameState) {
    state.toggle_pause();
}

fn handle_restart(state: &mut GameState) {
    state.restart();
}
