//! The on-disk word list.
//!
//! Every mutating call rewrites the whole file from the list it is given;
//! nothing is buffered or cached between calls. Absence of the file is an
//! empty list. Saving an empty list is refused so an accidental wipe cannot
//! truncate existing data.

pub mod record;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::model::word::{dedupe, Word, WordList};

pub const DEFAULT_BACKUP_KEEP: usize = 10;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not read word list {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("word list {path} is corrupt (line {line}: {reason})")]
    Parse {
        path: PathBuf,
        line: usize,
        reason: &'static str,
    },

    #[error("could not write word list {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("could not back up word list to {path}: {source}")]
    Backup { path: PathBuf, source: io::Error },

    #[error("could not export word list to {path}: {source}")]
    Export { path: PathBuf, source: io::Error },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { backup: Option<PathBuf> },
    /// Nothing to write; the file on disk was left alone.
    RefusedEmpty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    Added(Word, SaveOutcome),
    /// Already present and the store deduplicates; the list was still persisted.
    Duplicate(Word, SaveOutcome),
    /// Blank input; nothing persisted.
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed(Word, SaveOutcome),
    OutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone)]
pub struct WordStore {
    path: PathBuf,
    backup_on_write: bool,
    /// Backups kept beside the file; 0 keeps every one.
    backup_keep: usize,
    dedupe: bool,
}

impl WordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            backup_on_write: true,
            backup_keep: DEFAULT_BACKUP_KEEP,
            dedupe: true,
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(&config.path)
            .with_backup(config.backup_on_write)
            .with_backup_keep(config.backup_keep)
            .with_dedupe(config.dedupe)
    }

    pub fn with_backup(mut self, enabled: bool) -> Self {
        self.backup_on_write = enabled;
        self
    }

    pub fn with_backup_keep(mut self, keep: usize) -> Self {
        self.backup_keep = keep;
        self
    }

    pub fn with_dedupe(mut self, enabled: bool) -> Self {
        self.dedupe = enabled;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file, failing on unreadable or corrupt content.
    pub fn try_load(&self) -> Result<WordList, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        record::parse_words(&text).map_err(|e| StoreError::Parse {
            path: self.path.clone(),
            line: e.line,
            reason: e.reason,
        })
    }

    /// Reads the file; an unreadable or corrupt file is logged and read as empty.
    pub fn load(&self) -> WordList {
        self.try_load().unwrap_or_else(|e| {
            warn!(error = %e, "treating word list as empty");
            Vec::new()
        })
    }

    /// Replaces the file with `words`, in order.
    pub fn save(&self, words: &[Word]) -> Result<SaveOutcome, StoreError> {
        if words.is_empty() {
            warn!(path = %self.path.display(), "refusing to save an empty word list");
            return Ok(SaveOutcome::RefusedEmpty);
        }

        let backup = if self.backup_on_write {
            self.backup()?
        } else {
            None
        };

        self.write_atomic(&record::encode_words(words))
            .map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;

        info!(path = %self.path.display(), count = words.len(), "word list saved");
        Ok(SaveOutcome::Saved { backup })
    }

    /// Appends `raw` (trimmed) to `words` and persists the result.
    pub fn register(&self, raw: &str, words: &mut WordList) -> Result<RegisterOutcome, StoreError> {
        let Some(word) = Word::parse(raw) else {
            return Ok(RegisterOutcome::Blank);
        };

        let duplicate = self.dedupe && words.contains(&word);
        words.push(word.clone());
        if self.dedupe {
            *words = dedupe(std::mem::take(words));
        }

        let saved = self.save(words)?;
        if duplicate {
            Ok(RegisterOutcome::Duplicate(word, saved))
        } else {
            Ok(RegisterOutcome::Added(word, saved))
        }
    }

    /// Removes the word at `index` and persists the result.
    /// An out-of-range index changes nothing, on disk or in memory.
    pub fn remove(&self, index: usize, words: &mut WordList) -> Result<RemoveOutcome, StoreError> {
        if index >= words.len() {
            return Ok(RemoveOutcome::OutOfRange {
                index,
                len: words.len(),
            });
        }

        let removed = words.remove(index);
        let saved = self.save(words)?;
        Ok(RemoveOutcome::Removed(removed, saved))
    }

    /// Writes `words` as plain text, one per line, to `destination`.
    pub fn export(&self, words: &[Word], destination: &Path) -> Result<(), StoreError> {
        let mut text = String::new();
        for word in words {
            text.push_str(word.as_str());
            text.push('\n');
        }

        fs::write(destination, text).map_err(|source| StoreError::Export {
            path: destination.to_path_buf(),
            source,
        })?;

        info!(path = %destination.display(), count = words.len(), "word list exported");
        Ok(())
    }

    fn backup(&self) -> Result<Option<PathBuf>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let backup_path = self.backup_path();
        fs::copy(&self.path, &backup_path).map_err(|source| StoreError::Backup {
            path: backup_path.clone(),
            source,
        })?;

        info!(backup = %backup_path.display(), "word list backed up");
        self.prune_backups();
        Ok(Some(backup_path))
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "wordlist".to_string())
    }

    fn backup_path(&self) -> PathBuf {
        let stamp = Local::now().format("%Y%m%d-%H%M%S%.3f");
        self.path
            .with_file_name(format!("{}.{stamp}.bak", self.file_name()))
    }

    /// Deletes all but the newest `backup_keep` backups of this file.
    /// Stamps are fixed-width, so name order is age order.
    fn prune_backups(&self) {
        if self.backup_keep == 0 {
            return;
        }

        let prefix = format!("{}.", self.file_name());
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "could not list backups");
                return;
            }
        };

        let mut backups: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .map(|n| n.to_string_lossy())
                    .is_some_and(|n| n.starts_with(&prefix) && n.ends_with(".bak"))
            })
            .collect();
        backups.sort();

        let excess = backups.len().saturating_sub(self.backup_keep);
        for old in &backups[..excess] {
            match fs::remove_file(old) {
                Ok(()) => debug!(backup = %old.display(), "old backup removed"),
                Err(e) => warn!(backup = %old.display(), error = %e, "could not remove old backup"),
            }
        }
    }

    fn write_atomic(&self, contents: &str) -> io::Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let mut temp = NamedTempFile::new_in(parent)?;
        temp.write_all(contents.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}
