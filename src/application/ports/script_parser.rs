//! Script Parser Port - LLM 剧本解析抽象
//!
//! 把原始剧本/散文文本切分为场景、带说话者归属的台词行，
//! 以及音效/音乐提示。具体实现在 infrastructure/adapters 层。

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::script::Storyboard;

/// 剧本解析错误
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid script: {0}")]
    InvalidScript(String),
}

/// Script Parser Port
#[async_trait]
pub trait ScriptParserPort: Send + Sync {
    /// 解析原始文本为故事板
    async fn parse(&self, text: &str) -> Result<Storyboard, ParseError>;
}
