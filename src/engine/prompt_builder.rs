use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::DialogueConfig;
use crate::model::word::{join_words, Word, WordList};

/// Framing for the assistant side of every generation request.
pub const SYSTEM_DIRECTIVE: &str = "You are a creative writer specializing in funny dialogues.";

/// Candidates for the optional extra word.
pub const ADVANCED_VOCABULARY: &[&str] = &[
    "ubiquitous",
    "serendipity",
    "ephemeral",
    "meticulous",
    "candid",
    "resilient",
    "pragmatic",
    "eloquent",
    "frugal",
    "tenacious",
    "ambivalent",
    "benevolent",
    "conundrum",
    "diligent",
    "facetious",
    "gregarious",
    "impeccable",
    "nonchalant",
    "procrastinate",
    "quintessential",
];

const WORD_LIST_OPEN: &str = "<words>";
const WORD_LIST_CLOSE: &str = "</words>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Tom,
    Lisa,
}

impl Speaker {
    pub fn name(self) -> &'static str {
        match self {
            Speaker::Tom => "Tom",
            Speaker::Lisa => "Lisa",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub min: u32,
    pub max: u32,
}

impl LineRange {
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            min: a.min(b).max(1),
            max: a.max(b).max(1),
        }
    }
}

/// Everything one prompt is built from. The random choices are made here so
/// that turning a request into text is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueRequest {
    pub words: WordList,
    pub extra_word: Option<String>,
    pub first_speaker: Speaker,
    pub lines: LineRange,
}

impl DialogueRequest {
    pub fn new<R: Rng + ?Sized>(words: WordList, options: &DialogueConfig, rng: &mut R) -> Self {
        let first_speaker = if rng.gen_bool(0.5) {
            Speaker::Tom
        } else {
            Speaker::Lisa
        };

        let extra_word = if options.extra_vocabulary {
            pick_extra_word(&words, rng)
        } else {
            None
        };

        Self {
            words,
            extra_word,
            first_speaker,
            lines: LineRange::new(options.min_lines, options.max_lines),
        }
    }
}

/// One advanced word not already in `selected` (case-insensitive).
pub fn pick_extra_word<R: Rng + ?Sized>(selected: &[Word], rng: &mut R) -> Option<String> {
    let candidates: Vec<&str> = ADVANCED_VOCABULARY
        .iter()
        .copied()
        .filter(|c| !selected.iter().any(|w| w.as_str().eq_ignore_ascii_case(c)))
        .collect();

    candidates.choose(rng).map(|c| c.to_string())
}

/// Formats a `DialogueRequest` as the user message. No I/O, no randomness.
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn build(request: &DialogueRequest) -> String {
        let mut prompt = String::new();

        push_persona(&mut prompt);
        push_word_list(&mut prompt, &request.words, request.extra_word.as_deref());
        push_shape(&mut prompt, request.first_speaker, request.lines);
        push_output_format(&mut prompt);

        prompt
    }
}

fn push_persona(prompt: &mut String) {
    prompt.push_str(
        "Create a short and funny conversation between a playful man named Tom \
and a cute, sociable girl named Lisa.\n\
Both are friends working at the same company. Both are witty and often come up with clever remarks.\n\
Sometimes Lisa complains or teases people with playful, naughty jokes.\n\n",
    );
}

/// The only place selected words are written into the prompt.
fn push_word_list(prompt: &mut String, words: &[Word], extra: Option<&str>) {
    prompt.push_str("The conversation must naturally include each word listed between the tags exactly once:\n");
    prompt.push_str(WORD_LIST_OPEN);
    prompt.push('\n');
    prompt.push_str(&join_words(words));
    prompt.push('\n');
    prompt.push_str(WORD_LIST_CLOSE);
    prompt.push_str("\n\n");

    if let Some(extra) = extra {
        prompt.push_str("Also use this advanced word exactly once and define it with the others:\n");
        prompt.push_str(extra);
        prompt.push_str("\n\n");
    }
}

fn push_shape(prompt: &mut String, first: Speaker, lines: LineRange) {
    prompt.push_str(&format!("{} speaks first.\n", first.name()));
    prompt.push_str(&format!(
        "Make it friendly and humorous, {}-{} lines long. The topic can be anything.\n\n",
        lines.min, lines.max
    ));
}

fn push_output_format(prompt: &mut String) {
    prompt.push_str(
        "Output format:\n\
1. The English conversation, under the heading \"### English\".\n\
2. A fluent Japanese translation right below it, under the heading \"### Japanese\".\n\
3. A simple Japanese definition for every listed word, under the heading \"### Meanings\".\n\
Keep the three parts clearly separated.\n",
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn words(items: &[&str]) -> WordList {
        items.iter().filter_map(|s| Word::parse(s)).collect()
    }

    fn request(items: &[&str]) -> DialogueRequest {
        DialogueRequest {
            words: words(items),
            extra_word: None,
            first_speaker: Speaker::Tom,
            lines: LineRange::new(4, 6),
        }
    }

    /// Case-sensitive occurrences of `needle` not glued to other word characters.
    fn bounded_count(haystack: &str, needle: &str) -> usize {
        let is_word = |c: char| c.is_alphanumeric() || c == '_';
        haystack
            .match_indices(needle)
            .filter(|(at, _)| {
                let before = haystack[..*at].chars().next_back();
                let after = haystack[at + needle.len()..].chars().next();
                !before.is_some_and(is_word) && !after.is_some_and(is_word)
            })
            .count()
    }

    /// Text between the word-list tags.
    fn word_list_section(prompt: &str) -> &str {
        let start = prompt.find(WORD_LIST_OPEN).unwrap() + WORD_LIST_OPEN.len();
        let end = prompt.find(WORD_LIST_CLOSE).unwrap();
        &prompt[start..end]
    }

    /// The prompt with the word-list section cut out.
    fn outside_word_list(prompt: &str) -> String {
        let start = prompt.find(WORD_LIST_OPEN).unwrap();
        let end = prompt.find(WORD_LIST_CLOSE).unwrap() + WORD_LIST_CLOSE.len();
        format!("{}{}", &prompt[..start], &prompt[end..])
    }

    #[test]
    fn selected_words_appear_exactly_once() {
        let prompt = PromptBuilder::build(&request(&["serendipity", "kick off", "mango"]));
        for word in ["serendipity", "kick off", "mango"] {
            assert_eq!(bounded_count(&prompt, word), 1, "{word} in {prompt}");
        }
        assert_eq!(word_list_section(&prompt).trim(), "serendipity, kick off, mango");
    }

    #[test]
    fn words_shared_with_the_template_are_listed_once() {
        let items = ["witty", "Lisa", "company", "topic", "jokes"];
        let prompt = PromptBuilder::build(&request(&items));
        let section = word_list_section(&prompt);

        for word in items {
            assert_eq!(bounded_count(section, word), 1, "{word} in {section}");
            // Elsewhere the word only shows up as part of the fixed template.
            assert!(bounded_count(&prompt, word) > 1);
        }
    }

    #[test]
    fn selection_only_changes_the_word_list() {
        let plain = PromptBuilder::build(&request(&["apple"]));
        let colliding = PromptBuilder::build(&request(&["witty", "Lisa", "company"]));
        assert_eq!(outside_word_list(&plain), outside_word_list(&colliding));
    }

    #[test]
    fn build_is_deterministic() {
        let req = request(&["apple", "pear"]);
        assert_eq!(PromptBuilder::build(&req), PromptBuilder::build(&req));
    }

    #[test]
    fn directives_come_in_order() {
        let prompt = PromptBuilder::build(&request(&["apple"]));
        let english = prompt.find("### English").unwrap();
        let japanese = prompt.find("### Japanese").unwrap();
        let meanings = prompt.find("### Meanings").unwrap();
        assert!(english < japanese && japanese < meanings);
        assert!(prompt.contains("4-6 lines long"));
        assert!(prompt.contains("Tom speaks first."));
    }

    #[test]
    fn line_range_and_opener_follow_request() {
        let req = DialogueRequest {
            first_speaker: Speaker::Lisa,
            lines: LineRange::new(8, 5),
            ..request(&["apple"])
        };
        let prompt = PromptBuilder::build(&req);
        assert!(prompt.contains("5-8 lines long"));
        assert!(prompt.contains("Lisa speaks first."));
    }

    #[test]
    fn extra_word_is_embedded_when_present() {
        let req = DialogueRequest {
            extra_word: Some("ubiquitous".into()),
            ..request(&["apple"])
        };
        let prompt = PromptBuilder::build(&req);
        assert_eq!(bounded_count(&prompt, "ubiquitous"), 1);
    }

    #[test]
    fn extra_word_skips_selected_words() {
        let mut selected: Vec<&str> = ADVANCED_VOCABULARY.to_vec();
        let left_out = selected.pop().unwrap();
        let selected = words(&selected);
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..50 {
            assert_eq!(pick_extra_word(&selected, &mut rng).as_deref(), Some(left_out));
        }
    }

    #[test]
    fn extra_word_none_when_all_taken() {
        let selected: Vec<String> = ADVANCED_VOCABULARY.iter().map(|w| w.to_uppercase()).collect();
        let selected: WordList = selected.iter().filter_map(|s| Word::parse(s)).collect();
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(pick_extra_word(&selected, &mut rng), None);
    }

    #[test]
    fn request_honours_options() {
        let mut rng = StdRng::seed_from_u64(5);
        let options = DialogueConfig {
            min_lines: 5,
            max_lines: 8,
            extra_vocabulary: true,
            ..Default::default()
        };
        let req = DialogueRequest::new(words(&["apple"]), &options, &mut rng);
        assert_eq!(req.lines, LineRange { min: 5, max: 8 });
        assert!(req.extra_word.is_some());

        let plain = DialogueRequest::new(words(&["apple"]), &DialogueConfig::default(), &mut rng);
        assert!(plain.extra_word.is_none());
    }

    #[test]
    fn both_speakers_get_to_open() {
        let mut rng = StdRng::seed_from_u64(9);
        let openers: Vec<Speaker> = (0..100)
            .map(|_| DialogueRequest::new(words(&["a"]), &DialogueConfig::default(), &mut rng).first_speaker)
            .collect();
        assert!(openers.contains(&Speaker::Tom));
        assert!(openers.contains(&Speaker::Lisa));
    }

    proptest! {
        #[test]
        fn every_selected_word_is_listed_once(
            picked in proptest::collection::btree_set("[A-Za-z]{1,12}", 1..8),
        ) {
            let items: Vec<&str> = picked.iter().map(String::as_str).collect();
            let prompt = PromptBuilder::build(&request(&items));
            let section = word_list_section(&prompt);
            for word in &items {
                prop_assert_eq!(bounded_count(section, word), 1);
            }
            prop_assert_eq!(
                outside_word_list(&prompt),
                outside_word_list(&PromptBuilder::build(&request(&["apple"])))
            );
        }
    }
}
