use std::fmt;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::entities::{AnalysisError, AnalysisResult},
    history::entities::HistoryEntry,
};

/// Lifecycle of the current analysis attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttemptState {
    #[default]
    Idle,
    KeyMissing,
    Analyzing,
    Succeeded,
    Failed,
}

impl AttemptState {
    pub fn is_settled(&self) -> bool {
        !matches!(self, AttemptState::Analyzing)
    }
}

impl fmt::Display for AttemptState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AttemptState::Idle => "idle",
            AttemptState::KeyMissing => "key-missing",
            AttemptState::Analyzing => "analyzing",
            AttemptState::Succeeded => "succeeded",
            AttemptState::Failed => "failed",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttemptFailure {
    /// The model declined the image; its message is shown verbatim.
    Rejected(AnalysisError),
    Error(CoreError),
}

impl AttemptFailure {
    pub fn message(&self) -> String {
        match self {
            AttemptFailure::Rejected(rejection) => rejection.error.clone(),
            AttemptFailure::Error(e) => e.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    Succeeded(AnalysisResult),
    Failed(AttemptFailure),
    /// No credential was available; nothing was sent.
    KeyMissing,
}

impl AttemptOutcome {
    pub fn state(&self) -> AttemptState {
        match self {
            AttemptOutcome::Succeeded(_) => AttemptState::Succeeded,
            AttemptOutcome::Failed(_) => AttemptState::Failed,
            AttemptOutcome::KeyMissing => AttemptState::KeyMissing,
        }
    }
}

/// Secondary channel: what happened to the history write.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryWrite {
    Persisted(HistoryEntry),
    NotPersisted { entry: HistoryEntry, reason: CoreError },
    /// Only successful attempts are recorded.
    Skipped,
}

impl HistoryWrite {
    pub fn entry(&self) -> Option<&HistoryEntry> {
        match self {
            HistoryWrite::Persisted(entry) | HistoryWrite::NotPersisted { entry, .. } => {
                Some(entry)
            }
            HistoryWrite::Skipped => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttemptReport {
    pub outcome: AttemptOutcome,
    pub history: HistoryWrite,
}
