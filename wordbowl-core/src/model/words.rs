use crate::model::player::PlayWordAction;
use serde::{Deserialize, Serialize};

/// The shared word deck: words waiting to be played, the word currently in
/// play, and the words already guessed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordDeck {
    pub pool: Vec<String>,
    pub current: Option<String>,
    pub played: Vec<String>,
}

impl WordDeck {
    /// Replace or extend the pool of words to play.
    pub fn update(&mut self, reset: bool, words: &[String]) {
        if reset {
            self.pool = words.to_vec();
            self.current = None;
            self.played.clear();
        } else {
            self.pool.extend_from_slice(words);
        }
    }

    /// Make sure a word is in play if any are left.
    pub fn draw_next(&mut self) {
        self.current = if self.pool.is_empty() {
            None
        } else {
            Some(self.pool.remove(0))
        };
    }

    /// Resolve the current word. Returns true when a word was guessed (and
    /// should score); a skipped word goes back to the end of the pool.
    pub fn play(&mut self, action: PlayWordAction) -> bool {
        let Some(word) = self.current.take() else {
            return false;
        };

        let scored = match action {
            PlayWordAction::Guessed => {
                self.played.push(word);
                true
            }
            PlayWordAction::Skipped => {
                self.pool.push(word);
                false
            }
        };

        self.draw_next();
        scored
    }

    pub fn is_exhausted(&self) -> bool {
        self.pool.is_empty() && self.current.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck(words: &[&str]) -> WordDeck {
        let mut deck = WordDeck::default();
        deck.update(true, &words.iter().map(|w| w.to_string()).collect::<Vec<_>>());
        deck.draw_next();
        deck
    }

    #[test]
    fn guessed_word_moves_to_played() {
        let mut deck = deck(&["apple", "pear"]);

        assert!(deck.play(PlayWordAction::Guessed));
        assert_eq!(deck.played, vec!["apple"]);
        assert_eq!(deck.current.as_deref(), Some("pear"));
    }

    #[test]
    fn skipped_word_returns_to_pool() {
        let mut deck = deck(&["apple", "pear"]);

        assert!(!deck.play(PlayWordAction::Skipped));
        assert_eq!(deck.current.as_deref(), Some("pear"));
        assert_eq!(deck.pool, vec!["apple"]);
    }

    #[test]
    fn deck_exhausts_after_all_guesses() {
        let mut deck = deck(&["apple"]);

        deck.play(PlayWordAction::Guessed);
        assert!(deck.is_exhausted());
        assert!(!deck.play(PlayWordAction::Guessed));
    }
}
