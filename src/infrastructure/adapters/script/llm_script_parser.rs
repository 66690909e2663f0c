//! LLM Script Parser - 通过 chat-completions 接口解析剧本
//!
//! 把原始剧本/散文发给 LLM 服务，要求其返回严格 JSON：
//! {"scenes": [...], "dialogueLines": [...], "sfxCues": [...], "musicCues": [...]}
//! 解析结果在 Storyboard 聚合根处统一校验序号与排序不变量。

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{ParseError, ScriptParserPort};
use crate::domain::script::{DialogueLine, MusicCue, Scene, SfxCue, Storyboard};

const SYSTEM_PROMPT: &str = "\
You are a screenplay and prose analyst. Split the input text into scenes and \
attributed dialogue lines for audio narration.

Rules:
- Every scene has a zero-based `index` matching its position, a `heading`, and an `action` description.
- Every piece of narration or description becomes a dialogue line spoken by \"NARRATOR\".
- Character dialogue keeps the character name in UPPERCASE as `character`.
- Lines carry `sceneIndex` and a zero-based `lineIndex` within their scene, in reading order.
- Parenthetical tone hints (e.g. \"(whispering)\") go in `parenthetical`, not in `text`.
- Suggest at most one sfx cue and one music cue per scene where the text clearly implies one; \
cues carry `sceneIndex`, a generation `prompt`, and a `startTime` offset in seconds.

Respond with ONLY a JSON object of this exact shape, no prose, no markdown fences:
{\"scenes\": [], \"dialogueLines\": [], \"sfxCues\": [], \"musicCues\": []}";

/// chat-completions 请求体
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

/// chat-completions 响应体（只取需要的字段）
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// LLM 返回的故事板 JSON 形状
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParsedScript {
    scenes: Vec<Scene>,
    #[serde(default)]
    dialogue_lines: Vec<DialogueLine>,
    #[serde(default)]
    sfx_cues: Vec<SfxCue>,
    #[serde(default)]
    music_cues: Vec<MusicCue>,
}

/// LLM 解析器配置
#[derive(Debug, Clone)]
pub struct LlmScriptParserConfig {
    /// LLM 服务基础 URL
    pub base_url: String,
    /// 模型名称
    pub model: String,
    /// API Key（走内网网关时可为空）
    pub api_key: Option<String>,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for LlmScriptParserConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8100".to_string(),
            model: "resonance-parser".to_string(),
            api_key: None,
            timeout_secs: 180,
        }
    }
}

/// LLM Script Parser
pub struct LlmScriptParser {
    client: Client,
    config: LlmScriptParserConfig,
}

impl LlmScriptParser {
    pub fn new(config: LlmScriptParserConfig) -> Result<Self, ParseError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ParseError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.config.base_url)
    }

    /// 剥掉模型偶尔带上的 markdown 代码栅栏
    fn strip_fences(content: &str) -> &str {
        let trimmed = content.trim();
        let trimmed = trimmed
            .strip_prefix("```json")
            .or_else(|| trimmed.strip_prefix("```"))
            .unwrap_or(trimmed);
        trimmed.strip_suffix("```").unwrap_or(trimmed).trim()
    }

    fn parse_content(content: &str) -> Result<Storyboard, ParseError> {
        let parsed: ParsedScript = serde_json::from_str(Self::strip_fences(content))
            .map_err(|e| ParseError::InvalidResponse(format!("Malformed storyboard JSON: {}", e)))?;

        Storyboard::new(
            parsed.scenes,
            parsed.dialogue_lines,
            parsed.sfx_cues,
            parsed.music_cues,
        )
        .map_err(|e| ParseError::InvalidScript(e.to_string()))
    }
}

#[async_trait]
impl ScriptParserPort for LlmScriptParser {
    async fn parse(&self, text: &str) -> Result<Storyboard, ParseError> {
        let body = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: text.to_string(),
                },
            ],
            temperature: 0.0,
        };

        tracing::debug!(
            url = %self.completions_url(),
            model = %self.config.model,
            text_len = text.len(),
            "Sending script parse request"
        );

        let mut request = self.client.post(&self.completions_url()).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ParseError::Timeout
            } else if e.is_connect() {
                ParseError::NetworkError(format!("Cannot connect to LLM service: {}", e))
            } else {
                ParseError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ParseError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| ParseError::InvalidResponse(format!("Invalid JSON: {}", e)))?;

        let content = chat
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| ParseError::InvalidResponse("No choices in response".to_string()))?;

        let storyboard = Self::parse_content(content)?;

        tracing::info!(
            scene_count = storyboard.scenes().len(),
            line_count = storyboard.lines().len(),
            sfx_count = storyboard.sfx_cues().len(),
            music_count = storyboard.music_cues().len(),
            "Script parsed"
        );

        Ok(storyboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_CONTENT: &str = r#"{
        "scenes": [
            {"index": 0, "heading": "INT. KITCHEN - NIGHT", "action": "Rain against the window."},
            {"index": 1, "heading": "EXT. STREET - NIGHT", "action": ""}
        ],
        "dialogueLines": [
            {"sceneIndex": 0, "lineIndex": 0, "character": "NARRATOR", "text": "The rain had not stopped."},
            {"sceneIndex": 0, "lineIndex": 1, "character": "MARA", "text": "We can't stay here.", "parenthetical": "whispering"},
            {"sceneIndex": 1, "lineIndex": 0, "character": "NARRATOR", "text": "Outside, the street was empty."}
        ],
        "sfxCues": [
            {"sceneIndex": 0, "prompt": "rain on glass", "startTime": 0.0}
        ],
        "musicCues": []
    }"#;

    #[test]
    fn test_parse_valid_content() {
        let board = LlmScriptParser::parse_content(VALID_CONTENT).unwrap();
        assert_eq!(board.scenes().len(), 2);
        assert_eq!(board.lines().len(), 3);
        assert_eq!(board.sfx_cues().len(), 1);
        assert_eq!(
            board.lines()[1].parenthetical.as_deref(),
            Some("whispering")
        );
    }

    #[test]
    fn test_parse_content_with_markdown_fences() {
        let fenced = format!("```json\n{}\n```", VALID_CONTENT);
        let board = LlmScriptParser::parse_content(&fenced).unwrap();
        assert_eq!(board.scenes().len(), 2);
    }

    #[test]
    fn test_parse_malformed_json() {
        let result = LlmScriptParser::parse_content("this is not json");
        assert!(matches!(result, Err(ParseError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_invalid_storyboard_rejected() {
        // 场景序号与位置不一致
        let content = r#"{
            "scenes": [{"index": 3, "heading": "X", "action": ""}],
            "dialogueLines": [], "sfxCues": [], "musicCues": []
        }"#;
        let result = LlmScriptParser::parse_content(content);
        assert!(matches!(result, Err(ParseError::InvalidScript(_))));
    }

    #[test]
    fn test_missing_cue_arrays_default_empty() {
        let content = r#"{
            "scenes": [{"index": 0, "heading": "INT. HALL - DAY", "action": ""}],
            "dialogueLines": [
                {"sceneIndex": 0, "lineIndex": 0, "character": "NARRATOR", "text": "..."}
            ]
        }"#;
        let board = LlmScriptParser::parse_content(content).unwrap();
        assert!(board.sfx_cues().is_empty());
        assert!(board.music_cues().is_empty());
    }
}
