use crate::{
    codec::encode_image,
    config::{ImageGenerationConfig, ImageQuality, OutpaintingMode},
    error::{BedrockError, Result},
    output::save_image,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    TextImage,
    Inpainting,
    ImageVariation,
    Outpainting,
}

impl TaskType {
    /// Short name used in log lines and output file names.
    pub fn slug(&self) -> &'static str {
        match self {
            TaskType::TextImage => "text-to-image",
            TaskType::Inpainting => "inpainting",
            TaskType::ImageVariation => "image-variation",
            TaskType::Outpainting => "outpainting",
        }
    }
}

/// One generation call. The variant fixes which reference images must be supplied.
#[derive(Debug, Clone)]
pub enum GenerationRequest {
    TextToImage {
        prompt: String,
    },
    Inpaint {
        prompt: String,
        image: Vec<u8>,
        mask: Vec<u8>,
    },
    Vary {
        prompt: String,
        images: Vec<Vec<u8>>,
    },
    Outpaint {
        prompt: String,
        image: Vec<u8>,
        mask: Vec<u8>,
    },
}

impl GenerationRequest {
    pub fn task_type(&self) -> TaskType {
        match self {
            GenerationRequest::TextToImage { .. } => TaskType::TextImage,
            GenerationRequest::Inpaint { .. } => TaskType::Inpainting,
            GenerationRequest::Vary { .. } => TaskType::ImageVariation,
            GenerationRequest::Outpaint { .. } => TaskType::Outpainting,
        }
    }

    pub fn prompt(&self) -> &str {
        match self {
            GenerationRequest::TextToImage { prompt }
            | GenerationRequest::Inpaint { prompt, .. }
            | GenerationRequest::Vary { prompt, .. }
            | GenerationRequest::Outpaint { prompt, .. } => prompt,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextToImageParams {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_text: Option<String>,
}

/// Params block shared by inpainting and outpainting.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaskedImageParams {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_text: Option<String>,
    pub image: String,
    pub mask_image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_painting_mode: Option<OutpaintingMode>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageVariationParams {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_text: Option<String>,
    pub images: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitanGenerationConfig {
    pub number_of_images: u32,
    pub height: u32,
    pub width: u32,
    pub cfg_scale: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<ImageQuality>,
}

impl From<&ImageGenerationConfig> for TitanGenerationConfig {
    fn from(config: &ImageGenerationConfig) -> Self {
        Self {
            number_of_images: config.number_of_images,
            height: config.height,
            width: config.width,
            cfg_scale: config.cfg_scale,
            seed: config.seed,
            quality: config.quality,
        }
    }
}

/// Request body for `InvokeModel` against the Titan image models.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitanImageRequest {
    pub task_type: TaskType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_to_image_params: Option<TextToImageParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_painting_params: Option<MaskedImageParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_variation_params: Option<ImageVariationParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_painting_params: Option<MaskedImageParams>,
    pub image_generation_config: TitanGenerationConfig,
}

impl TitanImageRequest {
    pub fn build(request: &GenerationRequest, config: &ImageGenerationConfig) -> Result<Self> {
        let text = request.prompt().to_string();
        let negative_text = config.negative_text.clone();

        let mut body = Self {
            task_type: request.task_type(),
            text_to_image_params: None,
            in_painting_params: None,
            image_variation_params: None,
            out_painting_params: None,
            image_generation_config: config.into(),
        };

        match request {
            GenerationRequest::TextToImage { prompt } => {
                if prompt.trim().is_empty() {
                    return Err(BedrockError::RequestError(
                        "Text-to-image prompt must not be empty".into(),
                    ));
                }
                body.text_to_image_params = Some(TextToImageParams {
                    text,
                    negative_text,
                });
            }
            GenerationRequest::Inpaint { image, mask, .. } => {
                body.in_painting_params = Some(MaskedImageParams {
                    text,
                    negative_text,
                    image: encode_image(image),
                    mask_image: encode_image(mask),
                    out_painting_mode: None,
                });
            }
            GenerationRequest::Vary { images, .. } => {
                if images.is_empty() {
                    return Err(BedrockError::RequestError(
                        "Image variation needs at least one reference image".into(),
                    ));
                }
                body.image_variation_params = Some(ImageVariationParams {
                    text,
                    negative_text,
                    images: images.iter().map(|image| encode_image(image)).collect(),
                });
            }
            GenerationRequest::Outpaint { image, mask, .. } => {
                body.out_painting_params = Some(MaskedImageParams {
                    text,
                    negative_text,
                    image: encode_image(image),
                    mask_image: encode_image(mask),
                    out_painting_mode: config.outpainting_mode,
                });
            }
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
pub struct TitanImageResponse {
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ImageGenerationResponse {
    /// Decoded images in the order the service returned them. May be empty.
    pub images: Vec<Vec<u8>>,
    pub model: String,
}

impl ImageGenerationResponse {
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn first(&self) -> Option<&[u8]> {
        self.images.first().map(Vec::as_slice)
    }

    /// Takes the first image, treating an empty response as `NoImageProduced`.
    pub fn into_first(self) -> Result<Vec<u8>> {
        self.images
            .into_iter()
            .next()
            .ok_or(BedrockError::NoImageProduced)
    }

    /// Writes the first image to `path`. Returns `None` without touching the
    /// filesystem when the response holds no images.
    pub async fn save_first(&self, path: impl AsRef<Path>) -> Result<Option<PathBuf>> {
        match self.first() {
            Some(bytes) => {
                let path = path.as_ref();
                save_image(bytes, path).await?;
                Ok(Some(path.to_path_buf()))
            }
            None => {
                log::warn!("Response from {} contained no images, nothing saved", self.model);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn body(request: &GenerationRequest, config: &ImageGenerationConfig) -> Value {
        serde_json::to_value(TitanImageRequest::build(request, config).unwrap()).unwrap()
    }

    fn all_modes() -> Vec<GenerationRequest> {
        vec![
            GenerationRequest::TextToImage {
                prompt: "a lake".into(),
            },
            GenerationRequest::Inpaint {
                prompt: "a lake".into(),
                image: vec![1, 2, 3],
                mask: vec![4, 5, 6],
            },
            GenerationRequest::Vary {
                prompt: "a lake".into(),
                images: vec![vec![7, 8, 9]],
            },
            GenerationRequest::Outpaint {
                prompt: "a lake".into(),
                image: vec![1, 2, 3],
                mask: vec![4, 5, 6],
            },
        ]
    }

    #[test]
    fn test_task_type_and_default_config_for_every_mode() {
        let expected = ["TEXT_IMAGE", "INPAINTING", "IMAGE_VARIATION", "OUTPAINTING"];
        for (request, task) in all_modes().iter().zip(expected) {
            let value = body(request, &ImageGenerationConfig::default());
            assert_eq!(value["taskType"], task);
            assert_eq!(
                value["imageGenerationConfig"],
                json!({"numberOfImages": 1, "height": 1024, "width": 1024, "cfgScale": 8.0})
            );
        }
    }

    #[test]
    fn test_config_overrides_reach_the_wire() {
        let config = ImageGenerationConfig::new()
            .with_size(512, 768)
            .with_number_of_images(2)
            .with_cfg_scale(6.5)
            .with_seed(42)
            .with_quality(ImageQuality::Premium);
        let value = body(&all_modes()[0], &config);
        assert_eq!(
            value["imageGenerationConfig"],
            json!({
                "numberOfImages": 2,
                "height": 768,
                "width": 512,
                "cfgScale": 6.5,
                "seed": 42,
                "quality": "premium"
            })
        );
    }

    #[test]
    fn test_only_the_matching_params_block_is_sent() {
        let value = body(&all_modes()[0], &ImageGenerationConfig::default());
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert_eq!(value["textToImageParams"], json!({"text": "a lake"}));
    }

    #[test]
    fn test_masked_modes_carry_image_and_mask() {
        let modes = all_modes();
        for (request, key) in [(&modes[1], "inPaintingParams"), (&modes[3], "outPaintingParams")] {
            let value = body(request, &ImageGenerationConfig::default());
            assert_eq!(value[key]["image"], encode_image(&[1, 2, 3]));
            assert_eq!(value[key]["maskImage"], encode_image(&[4, 5, 6]));
            assert_eq!(value[key]["text"], "a lake");
        }
    }

    #[test]
    fn test_variation_sends_exactly_the_references() {
        let request = GenerationRequest::Vary {
            prompt: "red shirt".into(),
            images: vec![vec![1], vec![2, 2]],
        };
        let value = body(&request, &ImageGenerationConfig::default());
        assert_eq!(
            value["imageVariationParams"]["images"],
            json!([encode_image(&[1]), encode_image(&[2, 2])])
        );
    }

    #[test]
    fn test_outpainting_mode_and_negative_text() {
        let config = ImageGenerationConfig::new()
            .with_outpainting_mode(OutpaintingMode::Precise)
            .with_negative_text("people");
        let value = body(&all_modes()[3], &config);
        assert_eq!(value["outPaintingParams"]["outPaintingMode"], "PRECISE");
        assert_eq!(value["outPaintingParams"]["negativeText"], "people");

        // inpainting ignores the outpainting mode
        let value = body(&all_modes()[1], &config);
        assert!(value["inPaintingParams"].get("outPaintingMode").is_none());
    }

    #[test]
    fn test_rejects_empty_prompt_and_empty_variation() {
        let empty_prompt = GenerationRequest::TextToImage { prompt: "  ".into() };
        assert!(matches!(
            TitanImageRequest::build(&empty_prompt, &ImageGenerationConfig::default()),
            Err(BedrockError::RequestError(_))
        ));

        let no_refs = GenerationRequest::Vary {
            prompt: "x".into(),
            images: vec![],
        };
        assert!(matches!(
            TitanImageRequest::build(&no_refs, &ImageGenerationConfig::default()),
            Err(BedrockError::RequestError(_))
        ));
    }

    #[test]
    fn test_masked_modes_allow_empty_prompt() {
        let modes = [
            GenerationRequest::Inpaint {
                prompt: String::new(),
                image: vec![1],
                mask: vec![2],
            },
            GenerationRequest::Outpaint {
                prompt: String::new(),
                image: vec![1],
                mask: vec![2],
            },
            GenerationRequest::Vary {
                prompt: String::new(),
                images: vec![vec![1]],
            },
        ];
        for (request, key) in modes
            .iter()
            .zip(["inPaintingParams", "outPaintingParams", "imageVariationParams"])
        {
            let value = body(request, &ImageGenerationConfig::default());
            assert_eq!(value[key]["text"], "");
        }
    }

    #[test]
    fn test_response_tolerates_missing_images() {
        let parsed: TitanImageResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.images.is_none());

        let parsed: TitanImageResponse =
            serde_json::from_str(r#"{"images": null, "error": "blocked"}"#).unwrap();
        assert!(parsed.images.is_none());
        assert_eq!(parsed.error.as_deref(), Some("blocked"));
    }

    #[test]
    fn test_into_first_on_empty_response() {
        let response = ImageGenerationResponse {
            images: vec![],
            model: "m".into(),
        };
        assert!(matches!(
            response.into_first(),
            Err(BedrockError::NoImageProduced)
        ));
    }
}
