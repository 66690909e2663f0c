//! HTTP Speech Client - 调用外部 TTS HTTP 服务
//!
//! 实现 SpeechEnginePort trait，通过 HTTP 调用外部 TTS 服务
//!
//! 外部 TTS API:
//! POST http://localhost:8000/api/tts/synthesize
//! Request: {"text": "...", "voice_id": "...", "style_hint": "..."}  (JSON)
//! Response: audio/wav binary, metadata in headers

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{SpeechEnginePort, SpeechError, SpeechRequest, SpeechResponse};

/// TTS 合成请求体 (JSON)
#[derive(Debug, Serialize)]
struct SpeechHttpRequest {
    /// 要合成的台词文本
    text: String,
    /// 音色池中的固定音色 ID
    voice_id: String,
    /// 语气提示（来自剧本的括号注释）
    #[serde(skip_serializing_if = "Option::is_none")]
    style_hint: Option<String>,
}

/// HTTP Speech 客户端配置
#[derive(Debug, Clone)]
pub struct HttpSpeechClientConfig {
    /// TTS 服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 重试次数
    pub max_retries: u32,
}

impl Default for HttpSpeechClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 120,
            max_retries: 1,
        }
    }
}

impl HttpSpeechClientConfig {
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

    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }
}

/// HTTP Speech 客户端
///
/// 通过 HTTP 调用外部 TTS 服务。网络错误和超时会按配置重试，
/// 服务端明确返回的错误（4xx/5xx）不重试。
pub struct HttpSpeechClient {
    client: Client,
    config: HttpSpeechClientConfig,
}

impl HttpSpeechClient {
    /// 创建新的 HTTP Speech 客户端
    pub fn new(config: HttpSpeechClientConfig) -> Result<Self, SpeechError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SpeechError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 使用默认配置创建客户端
    pub fn with_default_config() -> Result<Self, SpeechError> {
        Self::new(HttpSpeechClientConfig::default())
    }

    fn synthesize_url(&self) -> String {
        format!("{}/api/tts/synthesize", self.config.base_url)
    }

    fn health_url(&self) -> String {
        format!("{}/health", self.config.base_url)
    }

    async fn synthesize_once(
        &self,
        body: &SpeechHttpRequest,
    ) -> Result<SpeechResponse, SpeechError> {
        let response = self
            .client
            .post(&self.synthesize_url())
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SpeechError::Timeout
                } else if e.is_connect() {
                    SpeechError::NetworkError(format!("Cannot connect to TTS service: {}", e))
                } else {
                    SpeechError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SpeechError::VoiceNotFound(body.voice_id.clone()));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SpeechError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        // 从 headers 提取元数据
        let headers = response.headers();
        let duration_ms = headers
            .get("X-TTS-Duration-Ms")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        let sample_rate = headers
            .get("X-TTS-Sample-Rate")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());

        // 音频字节直接在响应体里
        let audio_data = response
            .bytes()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to read audio: {}", e)))?
            .to_vec();

        if audio_data.is_empty() {
            return Err(SpeechError::InvalidResponse(
                "TTS service returned empty audio".to_string(),
            ));
        }

        Ok(SpeechResponse {
            audio_data,
            duration_ms,
            sample_rate,
        })
    }
}

#[async_trait]
impl SpeechEnginePort for HttpSpeechClient {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechResponse, SpeechError> {
        let body = SpeechHttpRequest {
            text: request.text,
            voice_id: request.voice_id,
            style_hint: request.style_hint,
        };

        tracing::debug!(
            url = %self.synthesize_url(),
            text_len = body.text.len(),
            voice_id = %body.voice_id,
            "Sending TTS synthesize request"
        );

        let mut attempt = 0u32;
        loop {
            match self.synthesize_once(&body).await {
                Ok(response) => {
                    tracing::info!(
                        voice_id = %body.voice_id,
                        duration_ms = ?response.duration_ms,
                        audio_size = response.audio_data.len(),
                        "TTS synthesis completed"
                    );
                    return Ok(response);
                }
                Err(e @ (SpeechError::Timeout | SpeechError::NetworkError(_)))
                    if attempt < self.config.max_retries =>
                {
                    attempt += 1;
                    tracing::warn!(
                        attempt = attempt,
                        max_retries = self.config.max_retries,
                        error = %e,
                        "TTS request failed, retrying"
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(&self.health_url())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = HttpSpeechClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout_secs, 120);
        assert_eq!(config.max_retries, 1);
    }

    #[test]
    fn test_config_builder() {
        let config = HttpSpeechClientConfig::new("http://example.com:9000")
            .with_timeout(60)
            .with_max_retries(3);
        assert_eq!(config.base_url, "http://example.com:9000");
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_style_hint_omitted_when_absent() {
        let body = SpeechHttpRequest {
            text: "Hello".to_string(),
            voice_id: "vx-char-01".to_string(),
            style_hint: None,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(!json.contains("style_hint"));
    }
}
