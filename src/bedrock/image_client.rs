use crate::{
    codec::decode_image,
    config::ImageGenerationConfig,
    error::{BedrockError, Result},
    logger,
    models::{GenerationRequest, ImageGenerationResponse, TitanImageRequest, TitanImageResponse},
};
use std::sync::Arc;

use super::ModelInvoker;

#[derive(Clone)]
pub struct ImageClient {
    invoker: Arc<dyn ModelInvoker>,
    model_id: String,
}

impl ImageClient {
    pub fn new(invoker: Arc<dyn ModelInvoker>, model_id: impl Into<String>) -> Self {
        Self {
            invoker,
            model_id: model_id.into(),
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn supported_models() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            (
                "amazon.titan-image-generator-v2:0",
                "Titan Image Generator G1 v2",
                "Amazon",
            ),
            (
                "amazon.titan-image-generator-v1",
                "Titan Image Generator G1",
                "Amazon",
            ),
        ]
    }

    pub async fn generate_from_text(
        &self,
        prompt: &str,
        config: &ImageGenerationConfig,
    ) -> Result<ImageGenerationResponse> {
        let request = GenerationRequest::TextToImage {
            prompt: prompt.to_string(),
        };
        self.generate(&request, config).await
    }

    /// Inpainting. Source and mask are expected to share pixel dimensions;
    /// the service enforces that, not this client.
    pub async fn edit_with_mask(
        &self,
        source: Vec<u8>,
        mask: Vec<u8>,
        prompt: &str,
        config: &ImageGenerationConfig,
    ) -> Result<ImageGenerationResponse> {
        let request = GenerationRequest::Inpaint {
            prompt: prompt.to_string(),
            image: source,
            mask,
        };
        self.generate(&request, config).await
    }

    pub async fn create_variation(
        &self,
        sources: Vec<Vec<u8>>,
        prompt: &str,
        config: &ImageGenerationConfig,
    ) -> Result<ImageGenerationResponse> {
        let request = GenerationRequest::Vary {
            prompt: prompt.to_string(),
            images: sources,
        };
        self.generate(&request, config).await
    }

    /// Outpainting: the mask marks the region to synthesize around the source.
    pub async fn extend_image(
        &self,
        source: Vec<u8>,
        mask: Vec<u8>,
        prompt: &str,
        config: &ImageGenerationConfig,
    ) -> Result<ImageGenerationResponse> {
        let request = GenerationRequest::Outpaint {
            prompt: prompt.to_string(),
            image: source,
            mask,
        };
        self.generate(&request, config).await
    }

    /// Sends one request and decodes every returned image. An empty or
    /// missing `images` field is not an error: the response is just empty.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        config: &ImageGenerationConfig,
    ) -> Result<ImageGenerationResponse> {
        let task = request.task_type();
        let payload = TitanImageRequest::build(request, config)?;
        let request_json = serde_json::to_vec(&payload)
            .map_err(|e| BedrockError::SerializationError(e.to_string()))?;

        log::info!(
            "Generating {} image(s) ({}) with model: {}",
            config.number_of_images,
            task.slug(),
            self.model_id
        );

        let response_bytes = {
            let _timer = logger::timer(&format!("{} via {}", task.slug(), self.model_id));
            self.invoker
                .invoke(&self.model_id, request_json)
                .await
                .map_err(|e| {
                    log::error!("Error running {}: {}", task.slug(), e);
                    e
                })?
        };

        let titan_response: TitanImageResponse = serde_json::from_slice(&response_bytes)
            .map_err(|e| BedrockError::ResponseError(e.to_string()))?;

        if let Some(remote_error) = &titan_response.error {
            log::warn!("Model {} reported: {}", self.model_id, remote_error);
        }

        let images = titan_response
            .images
            .unwrap_or_default()
            .iter()
            .map(|encoded| decode_image(encoded))
            .collect::<Result<Vec<_>>>()?;

        if images.is_empty() {
            log::warn!("No images returned for {}", task.slug());
        } else {
            log::debug!("Decoded {} image(s) for {}", images.len(), task.slug());
        }

        Ok(ImageGenerationResponse {
            images,
            model: self.model_id.clone(),
        })
    }
}
