//! Image Generation Port - 故事板图片生成抽象

use async_trait::async_trait;
use thiserror::Error;

/// 图片生成错误
#[derive(Debug, Error)]
pub enum ImageGenError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 图片生成请求
#[derive(Debug, Clone)]
pub struct ImageRequest {
    /// 画面提示词（由场景标题 + 动作描述拼接）
    pub prompt: String,
}

/// 图片生成响应
#[derive(Debug, Clone)]
pub struct ImageResponse {
    /// 生成结果的可访问 URL
    pub url: String,
}

/// Image Generation Port
#[async_trait]
pub trait ImageGenPort: Send + Sync {
    /// 生成一帧故事板图片
    async fn generate(&self, request: ImageRequest) -> Result<ImageResponse, ImageGenError>;
}
