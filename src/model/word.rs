use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A registered vocabulary entry: trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Word(String);

/// Ordered words as the user registered them. Order only matters for display.
pub type WordList = Vec<Word>;

impl Word {
    /// Trims `raw`; `None` when nothing is left.
    pub fn parse(raw: &str) -> Option<Word> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Word(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Word {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Word::parse(&value).ok_or_else(|| "word must not be blank".to_string())
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.0
    }
}

/// Drops exact repeats, keeping the first occurrence of each word.
pub fn dedupe(words: WordList) -> WordList {
    let mut seen = HashSet::new();
    words
        .into_iter()
        .filter(|w| seen.insert(w.clone()))
        .collect()
}

pub fn join_words(words: &[Word]) -> String {
    words
        .iter()
        .map(Word::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(s: &str) -> Word {
        Word::parse(s).unwrap()
    }

    #[test]
    fn parse_trims_and_rejects_blank() {
        assert_eq!(w("  apple \n").as_str(), "apple");
        assert!(Word::parse("").is_none());
        assert!(Word::parse(" \t ").is_none());
    }

    #[test]
    fn dedupe_keeps_first_seen_order() {
        let words = vec![w("b"), w("a"), w("b"), w("c"), w("a")];
        assert_eq!(dedupe(words), vec![w("b"), w("a"), w("c")]);
    }

    #[test]
    fn dedupe_is_case_sensitive() {
        let words = vec![w("Apple"), w("apple")];
        assert_eq!(dedupe(words).len(), 2);
    }

    #[test]
    fn serde_rejects_blank_word() {
        let ok: Word = serde_json::from_str("\" pear \"").unwrap();
        assert_eq!(ok.as_str(), "pear");
        assert!(serde_json::from_str::<Word>("\"  \"").is_err());
    }
}
