use tracing::{info, warn};

use crate::config::GenerationConfig;
use crate::engine::llm_client::{CompletionRequest, TextGenerator};
use crate::engine::prompt_builder::SYSTEM_DIRECTIVE;

/// Shown in place of a dialogue when the service call fails.
pub const FAILURE_PLACEHOLDER: &str = "Dialogue generation failed.";

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl From<&GenerationConfig> for GenerationParams {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self::from(&GenerationConfig::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    /// Trimmed model output, or `FAILURE_PLACEHOLDER`.
    pub text: String,
    /// User-facing description of what went wrong, if anything did.
    pub failure: Option<String>,
}

impl GenerationOutcome {
    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }
}

/// Sends prompts to the injected service. Never returns an error: a failed
/// call becomes the placeholder text plus a message.
pub struct DialogueGenerator<G> {
    client: G,
    params: GenerationParams,
}

impl<G: TextGenerator> DialogueGenerator<G> {
    pub fn new(client: G, params: GenerationParams) -> Self {
        Self { client, params }
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    pub fn generate(&self, prompt: &str) -> GenerationOutcome {
        let request = CompletionRequest {
            model: self.params.model.clone(),
            system: SYSTEM_DIRECTIVE.to_string(),
            user: prompt.to_string(),
            max_tokens: self.params.max_tokens,
            temperature: self.params.temperature,
        };

        match self.client.complete(&request) {
            Ok(text) => {
                info!(model = %self.params.model, chars = text.len(), "dialogue generated");
                GenerationOutcome {
                    text: text.trim().to_string(),
                    failure: None,
                }
            }
            Err(e) => {
                warn!(error = %format!("{e:#}"), "dialogue generation failed");
                GenerationOutcome {
                    text: FAILURE_PLACEHOLDER.to_string(),
                    failure: Some(format!("Dialogue generation error: {e:#}")),
                }
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fakes::{FailingGenerator, ScriptedGenerator};
    use super::*;

    #[test]
    fn response_is_trimmed() {
        let fake = ScriptedGenerator::replying("\n  Tom: Hi!\nLisa: Hey.  \n");
        let generator = DialogueGenerator::new(fake, GenerationParams::default());

        let outcome = generator.generate("prompt");
        assert_eq!(outcome.text, "Tom: Hi!\nLisa: Hey.");
        assert!(!outcome.is_failure());
    }

    #[test]
    fn request_carries_fixed_parameters() {
        let fake = ScriptedGenerator::replying("ok");
        let params = GenerationParams {
            model: "local-model".into(),
            max_tokens: 300,
            temperature: 0.3,
        };
        let generator = DialogueGenerator::new(fake.clone(), params);
        generator.generate("the prompt");

        let sent = fake.last.lock().unwrap().clone().unwrap();
        assert_eq!(sent.system, SYSTEM_DIRECTIVE);
        assert_eq!(sent.user, "the prompt");
        assert_eq!(sent.model, "local-model");
        assert_eq!(sent.max_tokens, 300);
        assert_eq!(sent.temperature, 0.3);
    }

    #[test]
    fn transport_error_becomes_placeholder() {
        let generator = DialogueGenerator::new(FailingGenerator, GenerationParams::default());

        let outcome = generator.generate("prompt");
        assert_eq!(outcome.text, FAILURE_PLACEHOLDER);
        assert!(outcome.failure.unwrap().contains("connection refused"));
    }
}
