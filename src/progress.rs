use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tutor::Topic;

/// File name used by [`JsonFileStore`] when none is given.
pub const PROGRESS_FILE_NAME: &str = "aiTutorProgress.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read progress from {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to write progress to {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("Progress at {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicProgress {
    pub completed: bool,
    pub quiz_score: Option<u32>,
}

/// Completion records keyed by subject id, then topic id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Progress {
    subjects: BTreeMap<String, BTreeMap<String, TopicProgress>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Locked,
    Unlocked,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicStatus {
    pub status: Status,
    pub score: Option<u32>,
}

impl Progress {
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    pub fn record_completion(&mut self, subject_id: &str, topic_id: &str, score: u32) {
        self.subjects
            .entry(subject_id.to_string())
            .or_default()
            .insert(topic_id.to_string(), TopicProgress {
                completed: true,
                quiz_score: Some(score),
            });
    }

    pub fn topic(&self, subject_id: &str, topic_id: &str) -> Option<&TopicProgress> {
        self.subjects.get(subject_id)?.get(topic_id)
    }

    /// Every recorded topic as (subject id, topic id, progress), sorted.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &TopicProgress)> {
        self.subjects.iter().flat_map(|(subject, topics)| {
            topics
                .iter()
                .map(move |(topic, progress)| (subject.as_str(), topic.as_str(), progress))
        })
    }

    /// Completed topics report their score; everything else is unlocked.
    pub fn topic_status(&self, subject_id: &str, topic_id: &str) -> TopicStatus {
        match self.topic(subject_id, topic_id) {
            Some(topic) if topic.completed => TopicStatus {
                status: Status::Completed,
                score: topic.quiz_score,
            },
            _ => TopicStatus {
                status: Status::Unlocked,
                score: None,
            },
        }
    }

    /// Index of the first topic still to do, highlighted as "next".
    pub fn active_topic_index(&self, subject_id: &str, topics: &[Topic]) -> Option<usize> {
        topics
            .iter()
            .position(|topic| self.topic_status(subject_id, &topic.id).status == Status::Unlocked)
    }
}

/// Persistence port for learner progress.
pub trait ProgressStore {
    fn load(&self) -> Result<Progress, StoreError>;
    fn save(&mut self, progress: &Progress) -> Result<(), StoreError>;
}

/// Stores progress as a JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A store named [`PROGRESS_FILE_NAME`] inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(PROGRESS_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for JsonFileStore {
    /// A missing file is an empty progress record.
    fn load(&self) -> Result<Progress, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Progress::default()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&content).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&mut self, progress: &Progress) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(progress)
            .map_err(|e| write_err(io::Error::other(e)))?;
        fs::write(&self.path, json).map_err(write_err)
    }
}

/// Keeps progress in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    saved: Option<Progress>,
}

impl MemoryStore {
    pub fn saved(&self) -> Option<&Progress> {
        self.saved.as_ref()
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> Result<Progress, StoreError> {
        Ok(self.saved.clone().unwrap_or_default())
    }

    fn save(&mut self, progress: &Progress) -> Result<(), StoreError> {
        self.saved = Some(progress.clone());
        Ok(())
    }
}

/// In-memory progress backed by a store.
///
/// The in-memory copy is authoritative for the session: store failures are
/// logged and otherwise ignored.
#[derive(Debug)]
pub struct ProgressTracker<S> {
    store: S,
    progress: Progress,
}

impl<S: ProgressStore> ProgressTracker<S> {
    pub fn open(store: S) -> Self {
        let progress = store.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to load progress, starting fresh");
            Progress::default()
        });
        Self { store, progress }
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn topic_status(&self, subject_id: &str, topic_id: &str) -> TopicStatus {
        self.progress.topic_status(subject_id, topic_id)
    }

    pub fn record_completion(&mut self, subject_id: &str, topic_id: &str, score: u32) {
        self.progress.record_completion(subject_id, topic_id, score);
        if let Err(e) = self.store.save(&self.progress) {
            tracing::warn!(error = %e, "failed to save progress");
        }
    }
}
