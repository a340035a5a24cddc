use crate::model::word::{Word, WordList};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    #[default]
    Random,
    Manual,
}

/// Selection state for one user's interaction sequence.
/// Owned by the UI, handed to the workflow for each generate action and
/// handed back with the results filled in.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub mode: SelectionMode,

    /// Words ticked in manual mode, in the order they were ticked.
    pub picks: WordList,

    /// Words that went into the last request.
    pub selected: WordList,
    pub extra_word: Option<String>,
    pub dialogue: Option<String>,
}

impl Session {
    pub fn is_picked(&self, word: &Word) -> bool {
        self.picks.contains(word)
    }

    pub fn toggle_pick(&mut self, word: &Word) {
        if let Some(pos) = self.picks.iter().position(|p| p == word) {
            self.picks.remove(pos);
        } else {
            self.picks.push(word.clone());
        }
    }

    /// Drops picks that no longer exist in `words`.
    pub fn retain_picks(&mut self, words: &[Word]) {
        self.picks.retain(|p| words.contains(p));
    }

    pub fn clear_result(&mut self) {
        self.selected.clear();
        self.extra_word = None;
        self.dialogue = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(s: &str) -> Word {
        Word::parse(s).unwrap()
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut session = Session::default();
        session.toggle_pick(&w("apple"));
        session.toggle_pick(&w("pear"));
        assert!(session.is_picked(&w("apple")));

        session.toggle_pick(&w("apple"));
        assert_eq!(session.picks, vec![w("pear")]);
    }

    #[test]
    fn retain_drops_deleted_words() {
        let mut session = Session {
            picks: vec![w("apple"), w("pear")],
            ..Default::default()
        };
        session.retain_picks(&[w("pear"), w("plum")]);
        assert_eq!(session.picks, vec![w("pear")]);
    }
}
