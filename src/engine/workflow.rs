use rand::Rng;
use tracing::{info, warn};

use crate::config::DialogueConfig;
use crate::engine::generator::{DialogueGenerator, GenerationOutcome};
use crate::engine::llm_client::TextGenerator;
use crate::engine::prompt_builder::{DialogueRequest, PromptBuilder};
use crate::engine::selection::{select_manual, select_random, SelectionError};
use crate::model::session::{SelectionMode, Session};
use crate::model::word::{join_words, Word};

/// Select, compose, call. One blocking round trip per `run`.
pub struct DialogueWorkflow<G> {
    generator: DialogueGenerator<G>,
    options: DialogueConfig,
}

impl<G: TextGenerator> DialogueWorkflow<G> {
    pub fn new(generator: DialogueGenerator<G>, options: DialogueConfig) -> Self {
        Self { generator, options }
    }

    pub fn options(&self) -> &DialogueConfig {
        &self.options
    }

    /// Fills `session` with the selection and the generated text.
    ///
    /// A selection that cannot be made is refused before anything is sent:
    /// the session keeps its previous result and the service is not called.
    pub fn run<R: Rng + ?Sized>(
        &self,
        session: &mut Session,
        words: &[Word],
        rng: &mut R,
    ) -> Result<GenerationOutcome, SelectionError> {
        let selected = match session.mode {
            SelectionMode::Random => select_random(words, self.options.random_pick_count, rng),
            SelectionMode::Manual => select_manual(&session.picks),
        }
        .inspect_err(|e| warn!(error = %e, mode = ?session.mode, "selection refused"))?;

        info!(words = %join_words(&selected), "generating dialogue");

        let request = DialogueRequest::new(selected, &self.options, rng);
        let prompt = PromptBuilder::build(&request);
        let outcome = self.generator.generate(&prompt);

        session.selected = request.words;
        session.extra_word = request.extra_word;
        session.dialogue = Some(outcome.text.clone());

        Ok(outcome)
    }
}
