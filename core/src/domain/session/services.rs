use std::sync::{Arc, Mutex, PoisonError};

use tracing::instrument;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    credential::{entities::ResolvedCredential, ports::CredentialService},
    food_analysis::{
        entities::{AnalysisReply, ImageUpload},
        ports::{FoodAnalysisService, LLMClient},
    },
    history::ports::HistoryService,
    session::{
        entities::{AttemptFailure, AttemptOutcome, AttemptReport, AttemptState, HistoryWrite},
        ports::AnalysisSessionService,
    },
    storage::ports::KeyValueStore,
};

pub const SUCCESS_MESSAGE: &str = "Analysis complete!";
pub const KEY_MISSING_MESSAGE: &str = "API key required";

/// Holds the attempt slot while an attempt runs. A dropped, unsettled attempt
/// is recorded as failed so the slot never stays busy.
struct AttemptGuard {
    state: Arc<Mutex<AttemptState>>,
    settled: bool,
}

impl AttemptGuard {
    fn settle(mut self, outcome: AttemptState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = outcome;
        self.settled = true;
    }
}

impl Drop for AttemptGuard {
    fn drop(&mut self) {
        if !self.settled {
            *self.state.lock().unwrap_or_else(PoisonError::into_inner) = AttemptState::Failed;
        }
    }
}

enum AttemptStart {
    Ready(AttemptGuard, ResolvedCredential),
    KeyMissing,
}

impl<KV, LLM> Service<KV, LLM>
where
    KV: KeyValueStore,
    LLM: LLMClient,
{
    /// Claims the attempt slot. The key is resolved under the same lock, so an
    /// attempt without a key goes straight to `KeyMissing`.
    fn start_attempt(&self) -> Result<AttemptStart, CoreError> {
        let mut current = self
            .attempt_state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !current.is_settled() {
            return Err(CoreError::AttemptInProgress);
        }

        let Some(credential) = self.resolve_credential() else {
            *current = AttemptState::KeyMissing;
            return Ok(AttemptStart::KeyMissing);
        };
        *current = AttemptState::Analyzing;

        let guard = AttemptGuard {
            state: Arc::clone(&self.attempt_state),
            settled: false,
        };
        Ok(AttemptStart::Ready(guard, credential))
    }
}

impl<KV, LLM> AnalysisSessionService for Service<KV, LLM>
where
    KV: KeyValueStore,
    LLM: LLMClient,
{
    #[instrument(skip_all, fields(file_name = %image.file_name()))]
    async fn run_attempt(&self, image: ImageUpload) -> Result<AttemptReport, CoreError> {
        let start = self.start_attempt().inspect_err(|_| {
            tracing::warn!("rejected attempt, another analysis is running");
        })?;

        let AttemptStart::Ready(guard, credential) = start else {
            tracing::info!("no API key available, skipping analysis");
            self.notifications.info(KEY_MISSING_MESSAGE);
            return Ok(AttemptReport {
                outcome: AttemptOutcome::KeyMissing,
                history: HistoryWrite::Skipped,
            });
        };

        let reply = self.analyze(&image, credential.value()).await;

        let report = match reply {
            Ok(AnalysisReply::Result(result)) => {
                let commit = self.commit_to_history(result.clone(), &image.to_data_url());
                let history = match commit.durable {
                    Ok(()) => HistoryWrite::Persisted(commit.entry),
                    Err(reason) => HistoryWrite::NotPersisted {
                        entry: commit.entry,
                        reason,
                    },
                };
                AttemptReport {
                    outcome: AttemptOutcome::Succeeded(result),
                    history,
                }
            }
            Ok(AnalysisReply::Rejected(rejection)) => AttemptReport {
                outcome: AttemptOutcome::Failed(AttemptFailure::Rejected(rejection)),
                history: HistoryWrite::Skipped,
            },
            Err(e) => {
                if e.is_contract() {
                    tracing::error!(error = ?e, "analysis reply unusable");
                } else {
                    tracing::warn!(error = ?e, "analysis request failed");
                }
                AttemptReport {
                    outcome: AttemptOutcome::Failed(AttemptFailure::Error(e)),
                    history: HistoryWrite::Skipped,
                }
            }
        };

        guard.settle(report.outcome.state());
        match &report.outcome {
            AttemptOutcome::Succeeded(_) => self.notifications.success(SUCCESS_MESSAGE),
            AttemptOutcome::Failed(failure) => self.notifications.error(failure.message()),
            AttemptOutcome::KeyMissing => self.notifications.info(KEY_MISSING_MESSAGE),
        }

        tracing::info!(state = %report.outcome.state(), "attempt settled");
        Ok(report)
    }

    fn attempt_state(&self) -> AttemptState {
        *self
            .attempt_state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
