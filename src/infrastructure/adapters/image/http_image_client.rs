//! HTTP Image Client - 调用外部图片生成服务
//!
//! 外部 API:
//! POST http://localhost:8300/api/image/generate
//! Request: {"prompt": "..."}  (JSON)
//! Response: {"url": "http://..."}  (JSON)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{ImageGenError, ImageGenPort, ImageRequest, ImageResponse};

#[derive(Debug, Serialize)]
struct ImageHttpRequest {
    prompt: String,
}

#[derive(Debug, Deserialize)]
struct ImageHttpResponse {
    url: String,
}

/// HTTP Image 客户端配置
#[derive(Debug, Clone)]
pub struct HttpImageClientConfig {
    /// 图片生成服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpImageClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8300".to_string(),
            timeout_secs: 180,
        }
    }
}

impl HttpImageClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP Image 客户端
pub struct HttpImageClient {
    client: Client,
    config: HttpImageClientConfig,
}

impl HttpImageClient {
    pub fn new(config: HttpImageClientConfig) -> Result<Self, ImageGenError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ImageGenError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn generate_url(&self) -> String {
        format!("{}/api/image/generate", self.config.base_url)
    }
}

#[async_trait]
impl ImageGenPort for HttpImageClient {
    async fn generate(&self, request: ImageRequest) -> Result<ImageResponse, ImageGenError> {
        let body = ImageHttpRequest {
            prompt: request.prompt,
        };

        tracing::debug!(
            url = %self.generate_url(),
            prompt = %body.prompt,
            "Sending image generation request"
        );

        let response = self
            .client
            .post(&self.generate_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ImageGenError::Timeout
                } else if e.is_connect() {
                    ImageGenError::NetworkError(format!("Cannot connect to image service: {}", e))
                } else {
                    ImageGenError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ImageGenError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let parsed: ImageHttpResponse = response
            .json()
            .await
            .map_err(|e| ImageGenError::InvalidResponse(format!("Invalid JSON: {}", e)))?;

        if parsed.url.is_empty() {
            return Err(ImageGenError::InvalidResponse(
                "Image service returned empty URL".to_string(),
            ));
        }

        tracing::info!(image_url = %parsed.url, "Image generation completed");

        Ok(ImageResponse { url: parsed.url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = HttpImageClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8300");
        assert_eq!(config.timeout_secs, 180);
    }

    #[test]
    fn test_response_parsing() {
        let parsed: ImageHttpResponse =
            serde_json::from_str(r#"{"url": "http://cdn.local/img/42.png"}"#).unwrap();
        assert_eq!(parsed.url, "http://cdn.local/img/42.png");
    }
}
