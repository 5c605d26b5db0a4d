use serde::{Deserialize, Serialize};

use crate::domain::{
    common::{entities::app_errors::CoreError, generate_timestamp, generate_uuid_v7},
    food_analysis::entities::AnalysisResult,
};

/// A past successful analysis. Never mutated once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
    /// Self-contained `data:` URL of the analysed image.
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub result: AnalysisResult,
}

impl HistoryEntry {
    pub fn new(result: AnalysisResult, image_url: impl Into<String>) -> Self {
        let (now, _) = generate_timestamp();
        Self {
            id: generate_uuid_v7().to_string(),
            timestamp: now.timestamp_millis(),
            image_url: image_url.into(),
            result,
        }
    }
}

/// Outcome of a history write: the entry always exists, durability may not.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryCommit {
    pub entry: HistoryEntry,
    pub durable: Result<(), CoreError>,
}
