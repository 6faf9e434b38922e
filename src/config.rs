use serde::Serialize;
use std::env;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_IMAGE_MODEL: &str = "amazon.titan-image-generator-v2:0";

#[derive(Debug, Clone)]
pub struct BedrockConfig {
    pub region: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub model_id: Option<String>,
}

impl Default for BedrockConfig {
    fn default() -> Self {
        BedrockConfig {
            region: None,
            access_key: None,
            secret_key: None,
            model_id: None,
        }
    }
}

impl BedrockConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let region = env::var("AWS_REGION")
            .or_else(|_| env::var("AWS_DEFAULT_REGION"))
            .ok();
        let access_key = env::var("AWS_ACCESS_KEY_ID").ok();
        let secret_key = env::var("AWS_SECRET_ACCESS_KEY").ok();
        let model_id = env::var("TITAN_MODEL_ID").ok();

        BedrockConfig {
            region,
            access_key,
            secret_key,
            model_id,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_credentials(
        mut self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.access_key = Some(access_key.into());
        self.secret_key = Some(secret_key.into());
        self
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    pub fn region(&self) -> &str {
        self.region.as_deref().unwrap_or(DEFAULT_REGION)
    }

    pub fn model_id(&self) -> &str {
        self.model_id.as_deref().unwrap_or(DEFAULT_IMAGE_MODEL)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageQuality {
    Standard,
    Premium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OutpaintingMode {
    Default,
    Precise,
}

/// Per-call generation parameters shared by every task mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageGenerationConfig {
    pub number_of_images: u32,
    pub height: u32,
    pub width: u32,
    pub cfg_scale: f32,
    pub seed: Option<u32>,
    pub quality: Option<ImageQuality>,
    pub negative_text: Option<String>,
    pub outpainting_mode: Option<OutpaintingMode>,
}

impl Default for ImageGenerationConfig {
    fn default() -> Self {
        Self {
            number_of_images: 1,
            height: 1024,
            width: 1024,
            cfg_scale: 8.0,
            seed: None,
            quality: None,
            negative_text: None,
            outpainting_mode: None,
        }
    }
}

impl ImageGenerationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_number_of_images(mut self, count: u32) -> Self {
        self.number_of_images = count;
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_cfg_scale(mut self, cfg_scale: f32) -> Self {
        self.cfg_scale = cfg_scale;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_quality(mut self, quality: ImageQuality) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn with_negative_text(mut self, text: impl Into<String>) -> Self {
        self.negative_text = Some(text.into());
        self
    }

    pub fn with_outpainting_mode(mut self, mode: OutpaintingMode) -> Self {
        self.outpainting_mode = Some(mode);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_defaults() {
        let config = ImageGenerationConfig::default();
        assert_eq!(config.number_of_images, 1);
        assert_eq!(config.height, 1024);
        assert_eq!(config.width, 1024);
        assert_eq!(config.cfg_scale, 8.0);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_bedrock_config_fallbacks() {
        let config = BedrockConfig::new();
        assert_eq!(config.region(), "us-east-1");
        assert_eq!(config.model_id(), "amazon.titan-image-generator-v2:0");

        let config = config
            .with_region("us-west-2")
            .with_model("amazon.titan-image-generator-v1");
        assert_eq!(config.region(), "us-west-2");
        assert_eq!(config.model_id(), "amazon.titan-image-generator-v1");
    }

    #[test]
    fn test_builder_overrides() {
        let config = ImageGenerationConfig::new()
            .with_size(512, 768)
            .with_number_of_images(3)
            .with_seed(42)
            .with_cfg_scale(6.5);
        assert_eq!((config.width, config.height), (512, 768));
        assert_eq!(config.number_of_images, 3);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.cfg_scale, 6.5);
    }
}
