//! Runware backend — one synchronous call per image.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::image::{ImageError, ImageGenerator};

const RUNWARE_API_URL: &str = "https://api.runware.ai";
const IMAGE_MODEL: &str = "stable-diffusion-xl";
const IMAGE_SIZE: u32 = 768;

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    prompt: &'a str,
    width: u32,
    height: u32,
    model: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    images: Vec<String>,
}

pub struct RunwareClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl RunwareClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, RUNWARE_API_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait::async_trait]
impl ImageGenerator for RunwareClient {
    async fn generate(&self, prompt: &str) -> Result<String, ImageError> {
        let url = format!("{}/v1/image/generation", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&GenerationRequest {
                prompt,
                width: IMAGE_SIZE,
                height: IMAGE_SIZE,
                model: IMAGE_MODEL,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ImageError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerationResponse = response.json().await?;
        body.images
            .into_iter()
            .next()
            .filter(|u| !u.trim().is_empty())
            .ok_or(ImageError::MissingUrl)
    }

    fn name(&self) -> &'static str {
        "runware"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn generate_returns_first_image_url() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/image/generation"))
            .and(header("authorization", "Bearer img-key"))
            .and(body_partial_json(serde_json::json!({
                "width": 768,
                "height": 768,
                "model": "stable-diffusion-xl"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "images": ["https://img.runware.ai/generated/abc.png"]
            })))
            .mount(&server)
            .await;

        let client = RunwareClient::with_base_url("img-key".to_string(), &server.uri());
        let url = client
            .generate("a misty mountain at dawn")
            .await
            .expect("should succeed");
        assert_eq!(url, "https://img.runware.ai/generated/abc.png");
    }

    #[tokio::test]
    async fn generate_errors_when_no_images_returned() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/image/generation"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "images": [] })),
            )
            .mount(&server)
            .await;

        let client = RunwareClient::with_base_url("img-key".to_string(), &server.uri());
        let err = client.generate("anything").await.unwrap_err();
        assert!(matches!(err, ImageError::MissingUrl));
    }

    #[tokio::test]
    async fn generate_surfaces_api_errors() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/image/generation"))
            .respond_with(ResponseTemplate::new(402).set_body_string("insufficient credits"))
            .mount(&server)
            .await;

        let client = RunwareClient::with_base_url("img-key".to_string(), &server.uri());
        let err = client.generate("anything").await.unwrap_err();
        match err {
            ImageError::Api { status, message } => {
                assert_eq!(status, 402);
                assert_eq!(message, "insufficient credits");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
