use crate::domain::{
    food_analysis::entities::AnalysisResult,
    history::entities::{HistoryCommit, HistoryEntry},
};

/// Bounded, newest-first log of past analyses.
///
/// No operation fails: storage problems are logged and the caller keeps going.
pub trait HistoryService: Send + Sync {
    fn list_history(&self) -> Vec<HistoryEntry>;

    fn get_history_entry(&self, id: &str) -> Option<HistoryEntry>;

    fn add_to_history(&self, result: AnalysisResult, image_data: &str) -> HistoryEntry;

    /// Like `add_to_history`, but reports whether the write reached storage.
    fn commit_to_history(&self, result: AnalysisResult, image_data: &str) -> HistoryCommit;

    fn remove_history_entry(&self, id: &str);

    fn clear_history(&self);
}
