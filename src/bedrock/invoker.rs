use crate::error::{BedrockError, Result};
use async_trait::async_trait;
use aws_sdk_bedrockruntime::{error::ProvideErrorMetadata, primitives::Blob, Client};

/// Transport seam between the image client and the remote model endpoint.
///
/// Takes a serialized JSON body, returns the raw JSON response body.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    async fn invoke(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>>;
}

#[derive(Clone)]
pub struct BedrockInvoker {
    client: Client,
}

impl BedrockInvoker {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ModelInvoker for BedrockInvoker {
    async fn invoke(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>> {
        let response = self
            .client
            .invoke_model()
            .model_id(model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| {
                log::debug!("AWS SDK InvokeModel error details: {:?}", e);

                if let Some(service_error) = e.as_service_error() {
                    BedrockError::service(
                        service_error.code(),
                        service_error.message().unwrap_or("no message"),
                    )
                } else {
                    BedrockError::service(None, format!("AWS SDK error: {}", e))
                }
            })?;

        Ok(response.body.into_inner())
    }
}
