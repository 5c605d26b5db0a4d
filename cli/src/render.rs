use chrono::DateTime;
use nutrilens_core::domain::{
    common::truncate_chars,
    credential::{CredentialSource, CredentialStatus},
    food_analysis::entities::AnalysisResult,
    history::HistoryEntry,
    notification::{Notification, NotificationKind},
    theme::ColorTheme,
};
use serde::Serialize;

const SUMMARY_PREVIEW_CHARS: usize = 48;

/// Machine-readable output of `analyze --json`.
#[derive(Debug, Serialize)]
pub struct AnalyzeOutput<'a> {
    pub result: &'a AnalysisResult,
    pub history_id: Option<&'a str>,
    pub saved_to_history: bool,
}

pub fn format_result(result: &AnalysisResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<28} {:<18} {:>8} {:>9} {:>9} {:>7} {:>9}\n",
        "FOOD", "PORTION", "KCAL", "PROTEIN", "CARBS", "FAT", "FIBER"
    ));
    for food in &result.foods {
        out.push_str(&format!(
            "{:<28} {:<18} {:>8.0} {:>8.1}g {:>8.1}g {:>6.1}g {:>8.1}g\n",
            truncate_chars(&food.name, 28),
            truncate_chars(&food.estimated_portion, 18),
            food.calories,
            food.protein_g,
            food.carbs_g,
            food.fat_g,
            food.fiber_g,
        ));
    }

    let total = &result.total_nutrition;
    out.push_str(&format!(
        "{:<28} {:<18} {:>8.0} {:>8.1}g {:>8.1}g {:>6.1}g {:>8.1}g\n",
        "TOTAL", "", total.calories, total.protein_g, total.carbs_g, total.fat_g, total.fiber_g,
    ));
    out.push_str(&format!(
        "\nConfidence: {:.0}%\n{}\n",
        result.confidence_score * 100.0,
        result.analysis_summary
    ));
    out
}

pub fn format_timestamp(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|time| time.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

pub fn format_history_list(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "No analyses yet.\n".to_string();
    }

    let mut out = format!("{:<36}  {:<20}  {:>6}  {}\n", "ID", "WHEN", "KCAL", "SUMMARY");
    for entry in entries {
        out.push_str(&format!(
            "{:<36}  {:<20}  {:>6.0}  {}\n",
            entry.id,
            format_timestamp(entry.timestamp),
            entry.result.total_nutrition.calories,
            truncate_chars(&entry.result.analysis_summary, SUMMARY_PREVIEW_CHARS),
        ));
    }
    out
}

pub fn format_history_entry(entry: &HistoryEntry) -> String {
    format!(
        "{} ({})\n\n{}",
        entry.id,
        format_timestamp(entry.timestamp),
        format_result(&entry.result)
    )
}

/// Removing an unknown id is a no-op, so say so instead of claiming a removal.
pub fn format_removal(id: &str, found: bool) -> String {
    if found {
        format!("Removed {id}\n")
    } else {
        format!("No history entry with id {id}\n")
    }
}

pub fn format_notification(notification: &Notification) -> String {
    let tag = match notification.kind {
        NotificationKind::Success => "ok",
        NotificationKind::Error => "error",
        NotificationKind::Info => "info",
    };
    format!("[{tag}] {}", notification.message)
}

pub fn format_credential_status(status: &CredentialStatus) -> String {
    let (Some(source), Some(preview)) = (status.source, status.preview.as_deref()) else {
        return "No API key configured. Set one with `nutrilens key set <KEY>` or GEMINI_API_KEY.\n"
            .to_string();
    };

    let origin = match source {
        CredentialSource::Injected => "provided by the environment, read-only",
        CredentialSource::Stored => "stored locally, editable",
    };
    format!("API key {preview} ({origin})\n")
}

pub fn format_theme_list(current: ColorTheme) -> String {
    ColorTheme::ALL
        .into_iter()
        .map(|theme| {
            let marker = if theme == current { "*" } else { " " };
            format!("{marker} {:<8} {}\n", theme.as_str(), theme.accent_color())
        })
        .collect()
}
