//! Replicate backend — submit a prediction, then poll until it reaches a
//! terminal status. No overall deadline: the loop runs until the prediction
//! succeeds, fails, or is canceled upstream.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::image::{ImageError, ImageGenerator};

const REPLICATE_API_URL: &str = "https://api.replicate.com";
/// SDXL version pin. Bump deliberately — output style shifts between versions.
const MODEL_VERSION: &str = "39ed52f2a78e934b3ba6e2a89f5b1c712de7dfea535525255b1aa35c5565e08b";
const POLL_INTERVAL: Duration = Duration::from_secs(1);
const IMAGE_SIZE: u32 = 768;

#[derive(Debug, Serialize)]
struct PredictionRequest<'a> {
    version: &'a str,
    input: PredictionInput<'a>,
}

#[derive(Debug, Serialize)]
struct PredictionInput<'a> {
    prompt: &'a str,
    width: u32,
    height: u32,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    id: String,
    status: String,
    #[serde(default)]
    output: Option<Vec<String>>,
    #[serde(default)]
    error: Option<String>,
}

pub struct ReplicateClient {
    client: Client,
    api_token: String,
    base_url: String,
}

impl ReplicateClient {
    pub fn new(api_token: String) -> Self {
        Self::with_base_url(api_token, REPLICATE_API_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(api_token: String, base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .expect("Failed to build HTTP client"),
            api_token,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn submit(&self, prompt: &str) -> Result<Prediction, ImageError> {
        let url = format!("{}/v1/predictions", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("authorization", format!("Token {}", self.api_token))
            .header("content-type", "application/json")
            .json(&PredictionRequest {
                version: MODEL_VERSION,
                input: PredictionInput {
                    prompt,
                    width: IMAGE_SIZE,
                    height: IMAGE_SIZE,
                },
            })
            .send()
            .await?;

        Self::parse_prediction(response).await
    }

    async fn poll(&self, id: &str) -> Result<Prediction, ImageError> {
        let url = format!("{}/v1/predictions/{id}", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("authorization", format!("Token {}", self.api_token))
            .send()
            .await?;

        Self::parse_prediction(response).await
    }

    async fn parse_prediction(response: reqwest::Response) -> Result<Prediction, ImageError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ImageError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }
}

/// Pulls the image URL out of a succeeded prediction's output list.
fn extract_url(output: Option<Vec<String>>) -> Result<String, ImageError> {
    output
        .and_then(|urls| urls.into_iter().next())
        .filter(|u| !u.trim().is_empty())
        .ok_or(ImageError::MissingUrl)
}

#[async_trait::async_trait]
impl ImageGenerator for ReplicateClient {
    async fn generate(&self, prompt: &str) -> Result<String, ImageError> {
        let mut prediction = self.submit(prompt).await?;

        loop {
            match prediction.status.as_str() {
                "succeeded" => return extract_url(prediction.output),
                "failed" | "canceled" => {
                    return Err(ImageError::Failed(
                        prediction
                            .error
                            .unwrap_or_else(|| format!("prediction {}", prediction.status)),
                    ));
                }
                other => {
                    debug!("Prediction {} still {other}, polling again", prediction.id);
                    tokio::time::sleep(POLL_INTERVAL).await;
                    prediction = self.poll(&prediction.id).await?;
                }
            }
        }
    }

    fn name(&self) -> &'static str {
        "replicate"
    }
}
