//! Audio Codec Port - 音频编解码抽象
//!
//! 混音引擎的输入是 base64 编码的压缩音频片段，输出是
//! 16-bit PCM WAV 容器。解码实现在 infrastructure/adapters 层。

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::mixdown::ClipBuffer;

/// 编解码错误
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Invalid base64: {0}")]
    InvalidBase64(String),

    #[error("Decoding error: {0}")]
    DecodingError(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}

/// Audio Codec Port
#[async_trait]
pub trait AudioCodecPort: Send + Sync {
    /// 解码 base64 音频为样本缓冲
    async fn decode_base64(&self, audio_base64: &str) -> Result<ClipBuffer, CodecError>;

    /// 把样本缓冲编码为 16-bit PCM WAV
    fn encode_wav(&self, clip: &ClipBuffer) -> Result<Vec<u8>, CodecError>;
}
