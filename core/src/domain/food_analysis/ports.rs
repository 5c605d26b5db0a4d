use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::{
        entities::{AnalysisReply, ImageUpload},
        value_objects::GenerationSettings,
    },
};

/// Request for one multimodal generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageGenerationRequest {
    pub prompt: String,
    pub mime_type: String,
    /// Bare base64, no data-URL prefix.
    pub image_base64: String,
    pub settings: GenerationSettings,
}

/// Transport to the remote vision/language model.
///
/// Implementations issue exactly one call, classify HTTP failures and return
/// the reply's text part untouched.
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    fn generate_with_image(
        &self,
        credential: &str,
        request: ImageGenerationRequest,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

pub trait FoodAnalysisService: Send + Sync {
    /// Sends `image` for analysis. Returns the decoded reply; never touches
    /// local state.
    fn analyze(
        &self,
        image: &ImageUpload,
        credential: &str,
    ) -> impl Future<Output = Result<AnalysisReply, CoreError>> + Send;
}
