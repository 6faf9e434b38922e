pub mod image_client;
pub mod invoker;

use crate::{
    config::BedrockConfig,
    error::{BedrockError, Result},
};
use aws_config::BehaviorVersion;
use aws_sdk_bedrockruntime::Client;
use std::sync::Arc;

pub use image_client::ImageClient;
pub use invoker::{BedrockInvoker, ModelInvoker};

#[derive(Clone)]
pub struct BedrockClient {
    image_client: ImageClient,
}

impl BedrockClient {
    /// Builds an SDK client for the configured region. Explicit credentials
    /// win; otherwise the default AWS credential chain is used.
    pub async fn new(bedrock_config: BedrockConfig) -> Result<Self> {
        if bedrock_config.access_key.is_some() != bedrock_config.secret_key.is_some() {
            return Err(BedrockError::ConfigError(
                "Access key and secret key must be set together".into(),
            ));
        }

        let region =
            aws_sdk_bedrockruntime::config::Region::new(bedrock_config.region().to_string());

        let aws_config = if let (Some(access_key), Some(secret_key)) =
            (&bedrock_config.access_key, &bedrock_config.secret_key)
        {
            aws_config::defaults(BehaviorVersion::latest())
                .credentials_provider(aws_sdk_bedrockruntime::config::Credentials::new(
                    access_key,
                    secret_key,
                    None,
                    None,
                    "titan-imagegen",
                ))
                .region(region)
                .load()
                .await
        } else {
            aws_config::defaults(BehaviorVersion::latest())
                .region(region)
                .load()
                .await
        };

        let invoker = BedrockInvoker::new(Client::new(&aws_config));

        Ok(Self {
            image_client: ImageClient::new(Arc::new(invoker), bedrock_config.model_id()),
        })
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }
}
