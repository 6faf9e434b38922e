//! Async client for the Amazon Titan Image Generator on AWS Bedrock.
//!
//! Four task modes share one request path: text-to-image, inpainting,
//! image variation and outpainting. Images go out and come back as base64
//! inside the JSON envelope; [`ImageClient`] hands callers raw bytes.

pub mod bedrock;
pub mod codec;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod output;

pub use bedrock::{BedrockClient, BedrockInvoker, ImageClient, ModelInvoker};
pub use config::{BedrockConfig, ImageGenerationConfig, ImageQuality, OutpaintingMode};
pub use error::{BedrockError, Result};
pub use models::{GenerationRequest, ImageGenerationResponse, TaskType};
