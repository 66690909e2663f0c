//! HTTP Sound Client - 调用外部音效/音乐生成服务
//!
//! 外部 API:
//! POST http://localhost:8200/api/sound/generate
//! Request: {"prompt": "...", "kind": "effect" | "ambient"}  (JSON)
//! Response: audio binary (WAV 或 MP3), metadata in headers

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{SoundGenError, SoundGenPort, SoundRequest, SoundResponse};

/// 生成请求体 (JSON)
#[derive(Debug, Serialize)]
struct SoundHttpRequest {
    prompt: String,
    kind: &'static str,
}

/// HTTP Sound 客户端配置
#[derive(Debug, Clone)]
pub struct HttpSoundClientConfig {
    /// 生成服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpSoundClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8200".to_string(),
            timeout_secs: 120,
        }
    }
}

impl HttpSoundClientConfig {
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

/// HTTP Sound 客户端
pub struct HttpSoundClient {
    client: Client,
    config: HttpSoundClientConfig,
}

impl HttpSoundClient {
    pub fn new(config: HttpSoundClientConfig) -> Result<Self, SoundGenError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SoundGenError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn generate_url(&self) -> String {
        format!("{}/api/sound/generate", self.config.base_url)
    }
}

#[async_trait]
impl SoundGenPort for HttpSoundClient {
    async fn generate(&self, request: SoundRequest) -> Result<SoundResponse, SoundGenError> {
        let body = SoundHttpRequest {
            prompt: request.prompt,
            kind: request.kind.as_str(),
        };

        tracing::debug!(
            url = %self.generate_url(),
            kind = body.kind,
            prompt = %body.prompt,
            "Sending sound generation request"
        );

        let response = self
            .client
            .post(&self.generate_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SoundGenError::Timeout
                } else if e.is_connect() {
                    SoundGenError::NetworkError(format!("Cannot connect to sound service: {}", e))
                } else {
                    SoundGenError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SoundGenError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let duration_ms = response
            .headers()
            .get("X-Sound-Duration-Ms")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());

        let audio_data = response
            .bytes()
            .await
            .map_err(|e| SoundGenError::InvalidResponse(format!("Failed to read audio: {}", e)))?
            .to_vec();

        if audio_data.is_empty() {
            return Err(SoundGenError::InvalidResponse(
                "Sound service returned empty audio".to_string(),
            ));
        }

        tracing::info!(
            kind = body.kind,
            duration_ms = ?duration_ms,
            audio_size = audio_data.len(),
            "Sound generation completed"
        );

        Ok(SoundResponse {
            audio_data,
            duration_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::SoundKind;

    #[test]
    fn test_config_default() {
        let config = HttpSoundClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8200");
        assert_eq!(config.timeout_secs, 120);
    }

    #[test]
    fn test_request_body_kind_serialization() {
        let body = SoundHttpRequest {
            prompt: "distant thunder".to_string(),
            kind: SoundKind::Effect.as_str(),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("\"kind\":\"effect\""));

        let body = SoundHttpRequest {
            prompt: "slow rain on tin roof".to_string(),
            kind: SoundKind::Ambient.as_str(),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("\"kind\":\"ambient\""));
    }
}
