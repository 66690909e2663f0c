//! Speech Engine Port - TTS 推理引擎抽象
//!
//! 定义语音合成的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

/// TTS 错误
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Voice not found: {0}")]
    VoiceNotFound(String),
}

/// 语音合成请求
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    /// 要合成的台词文本
    pub text: String,
    /// 音色 ID（音色池中的固定身份）
    pub voice_id: String,
    /// 括号注释（语气提示），透传给 TTS 服务
    pub style_hint: Option<String>,
}

/// 语音合成响应
#[derive(Debug, Clone)]
pub struct SpeechResponse {
    /// 合成的音频数据（压缩容器，原样透传）
    pub audio_data: Vec<u8>,
    /// 音频时长（毫秒），服务可能不提供
    pub duration_ms: Option<u64>,
    /// 采样率
    pub sample_rate: Option<u32>,
}

/// Speech Engine Port
///
/// 外部 TTS 服务的抽象接口
#[async_trait]
pub trait SpeechEnginePort: Send + Sync {
    /// 合成一条台词
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechResponse, SpeechError>;

    /// 检查 TTS 服务是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
