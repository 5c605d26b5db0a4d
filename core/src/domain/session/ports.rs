use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::entities::ImageUpload,
    session::entities::{AttemptReport, AttemptState},
};

pub trait AnalysisSessionService: Send + Sync {
    /// Runs one attempt end to end.
    ///
    /// Analysis failures are part of the report. The only error returned is
    /// `AttemptInProgress` when another attempt has not settled yet.
    fn run_attempt(
        &self,
        image: ImageUpload,
    ) -> impl Future<Output = Result<AttemptReport, CoreError>> + Send;

    fn attempt_state(&self) -> AttemptState;
}
