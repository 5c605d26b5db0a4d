use std::{path::Path, process::ExitCode};

use nutrilens_core::{
    application::NutrilensService,
    domain::session::{AnalysisSessionService, AttemptOutcome, HistoryWrite},
    infrastructure::image::load_image,
};

use crate::{
    commands::EXIT_KEY_MISSING,
    render::{self, AnalyzeOutput},
};

pub async fn run(service: &NutrilensService, image: &Path, json: bool) -> anyhow::Result<ExitCode> {
    let upload = load_image(image).inspect_err(|e| {
        if e.is_validation() {
            tracing::debug!(error = %e, path = %image.display(), "image rejected");
        } else {
            tracing::warn!(error = %e, path = %image.display(), "image could not be read");
        }
    })?;

    let mut notifications = service.notifications().subscribe();
    let report = service.run_attempt(upload).await?;

    while let Some(notification) = notifications.try_recv() {
        eprintln!("{}", render::format_notification(&notification));
    }

    match &report.outcome {
        AttemptOutcome::Succeeded(result) => {
            let entry = report.history.entry();
            if json {
                let output = AnalyzeOutput {
                    result,
                    history_id: entry.map(|entry| entry.id.as_str()),
                    saved_to_history: matches!(report.history, HistoryWrite::Persisted(_)),
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print!("{}", render::format_result(result));
                match &report.history {
                    HistoryWrite::Persisted(entry) => println!("\nSaved to history as {}", entry.id),
                    HistoryWrite::NotPersisted { reason, .. } => {
                        println!("\nNot saved to history: {reason}")
                    }
                    HistoryWrite::Skipped => {}
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        AttemptOutcome::Failed(_) => Ok(ExitCode::FAILURE),
        AttemptOutcome::KeyMissing => {
            eprintln!("Set one with `nutrilens key set <KEY>` or the GEMINI_API_KEY variable.");
            Ok(ExitCode::from(EXIT_KEY_MISSING))
        }
    }
}
