use crate::model::peer::PeerId;
use crate::model::team::Team;
use serde::{Deserialize, Serialize};

/// Round-robin turn rotation: across teams, and within each team across its
/// members. Indices are positions in the ordered team/player lists, so the
/// state stays meaningful after a full-state sync.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnState {
    pub team_index: usize,
    pub player_cursors: Vec<usize>,
}

impl TurnState {
    pub fn init(team_count: usize) -> Self {
        Self {
            team_index: 0,
            player_cursors: vec![0; team_count],
        }
    }

    /// Move to the next team, advancing the finished team's player cursor.
    pub fn advance(&mut self, teams: &[Team]) {
        if teams.is_empty() {
            return;
        }
        if self.player_cursors.len() != teams.len() {
            *self = Self::init(teams.len());
            return;
        }

        let members = teams[self.team_index].players.len();
        if members > 0 {
            self.player_cursors[self.team_index] =
                (self.player_cursors[self.team_index] + 1) % members;
        }
        self.team_index = (self.team_index + 1) % teams.len();
    }

    /// The player whose turn it is, if the active team has any members.
    pub fn current_player<'a>(&self, teams: &'a [Team]) -> Option<&'a PeerId> {
        let team = teams.get(self.team_index)?;
        let cursor = *self.player_cursors.get(self.team_index)?;
        team.players.get(cursor % team.players.len().max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::team::TeamColor;

    fn teams_of(sizes: &[usize]) -> Vec<Team> {
        sizes
            .iter()
            .map(|n| {
                let mut team = Team::new(TeamColor::Red);
                for _ in 0..*n {
                    team.players.push(PeerId::new());
                }
                team
            })
            .collect()
    }

    #[test]
    fn rotation_alternates_teams() {
        let teams = teams_of(&[2, 2]);
        let mut turn = TurnState::init(2);

        assert_eq!(turn.team_index, 0);
        turn.advance(&teams);
        assert_eq!(turn.team_index, 1);
        turn.advance(&teams);
        assert_eq!(turn.team_index, 0);
        // team 0's cursor moved on after its first turn
        assert_eq!(turn.player_cursors[0], 1);
    }

    #[test]
    fn advance_on_empty_teams_is_noop() {
        let mut turn = TurnState::init(0);
        turn.advance(&[]);
        assert_eq!(turn, TurnState::init(0));
    }

    #[test]
    fn current_player_follows_rotation() {
        let teams = teams_of(&[2, 1]);
        let mut turn = TurnState::init(2);

        assert_eq!(turn.current_player(&teams), Some(&teams[0].players[0]));
        turn.advance(&teams);
        assert_eq!(turn.current_player(&teams), Some(&teams[1].players[0]));
        turn.advance(&teams);
        // team 0 is up again with its second member
        assert_eq!(turn.current_player(&teams), Some(&teams[0].players[1]));
    }

    #[test]
    fn current_player_is_none_for_empty_team() {
        let teams = teams_of(&[0, 1]);
        let turn = TurnState::init(2);

        assert_eq!(turn.current_player(&teams), None);
    }

    #[test]
    fn cursor_reset_when_team_count_changes() {
        let teams = teams_of(&[1, 1, 1]);
        let mut turn = TurnState::init(2);

        turn.advance(&teams);
        assert_eq!(turn.player_cursors.len(), 3);
        assert_eq!(turn.team_index, 0);
    }
}
