use tracing::instrument;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    food_analysis::{
        entities::{AnalysisReply, ImageUpload},
        ports::{FoodAnalysisService, ImageGenerationRequest, LLMClient},
        reply::decode_reply,
        value_objects::GenerationSettings,
    },
    prompt::build_analysis_prompt,
    storage::ports::KeyValueStore,
};

impl<KV, LLM> FoodAnalysisService for Service<KV, LLM>
where
    KV: KeyValueStore,
    LLM: LLMClient,
{
    #[instrument(skip_all, fields(file_name = %image.file_name(), media_type = %image.media_type(), size = image.size()))]
    async fn analyze(
        &self,
        image: &ImageUpload,
        credential: &str,
    ) -> Result<AnalysisReply, CoreError> {
        let request = ImageGenerationRequest {
            prompt: build_analysis_prompt().to_string(),
            mime_type: image.media_type().as_str().to_string(),
            image_base64: image.to_base64(),
            settings: GenerationSettings::default(),
        };

        let raw_response = self
            .llm_client
            .generate_with_image(credential, request)
            .await?;

        let reply = decode_reply(&raw_response)?;
        match &reply {
            AnalysisReply::Result(result) => {
                tracing::info!(foods = result.foods.len(), "analysis decoded")
            }
            AnalysisReply::Rejected(rejection) => {
                tracing::info!(reason = %rejection.error, "model declined the image")
            }
        }

        Ok(reply)
    }
}
