use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, error, info, warn};

use crate::config::{AppConfig, GenerationConfig};
use crate::engine::generator::{DialogueGenerator, GenerationParams};
use crate::engine::llm_client::TextGenerator;
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::engine::workflow::DialogueWorkflow;
use crate::model::message::Notice;
use crate::model::session::Session;
use crate::model::word::WordList;
use crate::store::{RegisterOutcome, RemoveOutcome, SaveOutcome, StoreError, WordStore};

pub type ClientFactory<G> = Box<dyn Fn(&GenerationConfig) -> G + Send>;

/// Serves UI commands one at a time. The store is re-read for every command;
/// nothing about the word list survives between commands.
pub struct Engine<G> {
    rx: Receiver<EngineCommand>,
    tx: Sender<EngineResponse>,
    config: AppConfig,
    store: WordStore,
    workflow: DialogueWorkflow<G>,
    make_client: ClientFactory<G>,
    rng: StdRng,
}

impl<G: TextGenerator> Engine<G> {
    pub fn new(
        rx: Receiver<EngineCommand>,
        tx: Sender<EngineResponse>,
        config: AppConfig,
        make_client: ClientFactory<G>,
    ) -> Self {
        let store = WordStore::from_config(&config.store);
        let workflow = build_workflow(&config, &make_client);

        Self {
            rx,
            tx,
            config,
            store,
            workflow,
            make_client,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn run(&mut self) {
        while let Ok(cmd) = self.rx.recv() {
            self.handle(cmd);
        }
        debug!("engine channel closed");
    }

    pub fn handle(&mut self, cmd: EngineCommand) {
        match cmd {
            EngineCommand::Refresh => self.send_words(),

            EngineCommand::Register(raw) => {
                let mut words = self.load_words();
                match self.store.register(&raw, &mut words) {
                    Ok(RegisterOutcome::Added(word, _)) => {
                        self.notify(Notice::Success(format!("'{word}' registered!")));
                    }
                    Ok(RegisterOutcome::Duplicate(word, _)) => {
                        self.notify(Notice::Info(format!("'{word}' is already registered.")));
                    }
                    Ok(RegisterOutcome::Blank) => debug!("ignoring blank word"),
                    Err(e) => self.store_failed(e),
                }
                self.send_words();
            }

            EngineCommand::Remove { index, word } => {
                let mut words = self.load_words();
                if words.get(index) != Some(&word) {
                    info!(index, word = %word, "remove ignored, list changed since it was shown");
                    self.notify(Notice::Info(format!("'{word}' is no longer at that position.")));
                    self.send_words();
                    return;
                }

                match self.store.remove(index, &mut words) {
                    Ok(RemoveOutcome::Removed(word, SaveOutcome::Saved { .. })) => {
                        self.notify(Notice::Success(format!("'{word}' deleted.")));
                    }
                    Ok(RemoveOutcome::Removed(word, SaveOutcome::RefusedEmpty)) => {
                        self.notify(Notice::Warning(format!(
                            "'{word}' is the last word; an empty list is never saved, so it was kept."
                        )));
                    }
                    Ok(RemoveOutcome::OutOfRange { index, len }) => {
                        info!(index, len, "remove ignored, index out of range");
                        self.notify(Notice::Info("That word is no longer in the list.".into()));
                    }
                    Err(e) => self.store_failed(e),
                }
                self.send_words();
            }

            EngineCommand::Generate(session) => self.generate(session),

            EngineCommand::Export(destination) => self.export(&destination),

            EngineCommand::TestConnection => {
                let client = (self.make_client)(&self.config.generation);
                match client.test_connection() {
                    Ok(status) => self.notify(Notice::Success(status)),
                    Err(e) => {
                        warn!(error = %format!("{e:#}"), "connection check failed");
                        self.notify(Notice::Error(format!("Connection failed: {e:#}")));
                    }
                }
            }

            EngineCommand::Reconfigure(config) => {
                info!(store = %config.store.path.display(), model = %config.generation.model, "reconfiguring");
                self.store = WordStore::from_config(&config.store);
                self.workflow = build_workflow(&config, &self.make_client);
                self.config = config;
                self.send_words();
            }
        }
    }

    fn generate(&mut self, mut session: Session) {
        let words = self.load_words();

        match self.workflow.run(&mut session, &words, &mut self.rng) {
            Ok(outcome) => {
                if let Some(failure) = outcome.failure {
                    self.notify(Notice::Error(failure));
                }
                self.respond(EngineResponse::Generated(session));
            }
            Err(e) => {
                self.notify(Notice::Warning(e.to_string()));
                self.respond(EngineResponse::GenerateSkipped);
            }
        }
    }

    fn export(&mut self, destination: &Path) {
        let words = self.load_words();
        if words.is_empty() {
            self.notify(Notice::Warning("No words to export.".into()));
            return;
        }

        match self.store.export(&words, destination) {
            Ok(()) => self.notify(Notice::Success(format!(
                "Exported {} words to {}.",
                words.len(),
                destination.display()
            ))),
            Err(e) => self.store_failed(e),
        }
    }

    /// Fresh read; a bad file is reported and read as empty.
    fn load_words(&mut self) -> WordList {
        match self.store.try_load() {
            Ok(words) => words,
            Err(e) => {
                warn!(error = %e, "treating word list as empty");
                self.notify(Notice::Warning(format!("{e}. Treating the list as empty.")));
                Vec::new()
            }
        }
    }

    fn send_words(&mut self) {
        let words = self.load_words();
        self.respond(EngineResponse::Words(words));
    }

    fn store_failed(&mut self, e: StoreError) {
        error!(error = %e, "store operation failed");
        self.notify(Notice::Error(e.to_string()));
    }

    fn notify(&self, notice: Notice) {
        self.respond(EngineResponse::Notice(notice));
    }

    fn respond(&self, response: EngineResponse) {
        let _ = self.tx.send(response);
    }
}

fn build_workflow<G: TextGenerator>(
    config: &AppConfig,
    make_client: &ClientFactory<G>,
) -> DialogueWorkflow<G> {
    let generator = DialogueGenerator::new(
        make_client(&config.generation),
        GenerationParams::from(&config.generation),
    );
    DialogueWorkflow::new(generator, config.dialogue.clone())
}

/// Starts an engine on its own thread and returns its channel ends.
pub fn spawn<G: TextGenerator + 'static>(
    config: AppConfig,
    make_client: ClientFactory<G>,
) -> (Sender<EngineCommand>, Receiver<EngineResponse>) {
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();

    std::thread::spawn(move || {
        let mut engine = Engine::new(cmd_rx, resp_tx, config, make_client);
        engine.run();
    });

    (cmd_tx, resp_rx)
}
