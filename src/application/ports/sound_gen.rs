//! Sound Generation Port - 音效/氛围音乐生成抽象

use async_trait::async_trait;
use thiserror::Error;

/// 音效生成错误
#[derive(Debug, Error)]
pub enum SoundGenError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 生成类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundKind {
    /// 短促音效（关门声、雷声等）
    Effect,
    /// 压在台词之下的氛围音乐
    Ambient,
}

impl SoundKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Effect => "effect",
            Self::Ambient => "ambient",
        }
    }
}

/// 音效生成请求
#[derive(Debug, Clone)]
pub struct SoundRequest {
    /// 生成提示词
    pub prompt: String,
    /// 类别（影响下游模型选择）
    pub kind: SoundKind,
}

/// 音效生成响应
#[derive(Debug, Clone)]
pub struct SoundResponse {
    /// 生成的音频数据（压缩容器）
    pub audio_data: Vec<u8>,
    /// 时长（毫秒），服务可能不提供
    pub duration_ms: Option<u64>,
}

/// Sound Generation Port
#[async_trait]
pub trait SoundGenPort: Send + Sync {
    /// 按提示词生成一段音效或音乐
    async fn generate(&self, request: SoundRequest) -> Result<SoundResponse, SoundGenError>;
}
