use std::path::PathBuf;

use crate::config::AppConfig;
use crate::model::message::Notice;
use crate::model::session::Session;
use crate::model::word::{Word, WordList};

pub enum EngineCommand {
    /// Re-read the store.
    Refresh,
    Register(String),
    /// Delete `word`, expected at `index` in the list the UI was showing.
    Remove { index: usize, word: Word },
    Generate(Session),
    Export(PathBuf),
    TestConnection,
    Reconfigure(AppConfig),
}

#[derive(Debug)]
pub enum EngineResponse {
    Words(WordList),
    Notice(Notice),

    /// The session handed over with `Generate`, results filled in.
    Generated(Session),

    /// `Generate` finished without a result (refused selection).
    GenerateSkipped,
}
