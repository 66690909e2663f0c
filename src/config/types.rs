//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// LLM 剧本解析配置
    #[serde(default)]
    pub llm: LlmConfig,

    /// TTS 引擎配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 音效/音乐生成配置
    #[serde(default)]
    pub sound: SoundGenConfig,

    /// 故事板图片生成配置
    #[serde(default)]
    pub image: ImageGenConfig,

    /// 混音配置
    #[serde(default)]
    pub mix: MixConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 公开访问的 Base URL（用于拼接混音音频下载地址）
    /// 如果未设置，则使用 http://{host}:{port}
    #[serde(default)]
    pub base_url: Option<String>,

    /// 静态文件服务配置
    #[serde(default)]
    pub static_files: StaticFilesConfig,
}

/// 静态文件服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct StaticFilesConfig {
    /// 是否启用静态文件服务
    #[serde(default = "default_static_enabled")]
    pub enabled: bool,

    /// 静态文件目录
    #[serde(default = "default_static_dir")]
    pub dir: PathBuf,

    /// URL 路径前缀（如 "/" 表示根路径托管）
    #[serde(default = "default_static_path")]
    pub path: String,
}

fn default_static_enabled() -> bool {
    false
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("web")
}

fn default_static_path() -> String {
    "/".to_string()
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: default_static_enabled(),
            dir: default_static_dir(),
            path: default_static_path(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: None,
            static_files: StaticFilesConfig::default(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 获取公开的 Base URL
    pub fn public_base_url(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| {
            let host = if self.host == "0.0.0.0" {
                "localhost"
            } else {
                &self.host
            };
            format!("http://{}:{}", host, self.port)
        })
    }
}

/// LLM 剧本解析配置
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// LLM 服务基础 URL（chat-completions 风格接口）
    #[serde(default = "default_llm_url")]
    pub url: String,

    /// 模型名称
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// API Key（可为空，走网关时不需要）
    #[serde(default)]
    pub api_key: Option<String>,

    /// 请求超时时间（秒）
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

fn default_llm_url() -> String {
    "http://localhost:8100".to_string()
}

fn default_llm_model() -> String {
    "resonance-parser".to_string()
}

fn default_llm_timeout() -> u64 {
    180
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            url: default_llm_url(),
            model: default_llm_model(),
            api_key: None,
            timeout_secs: default_llm_timeout(),
        }
    }
}

/// TTS 引擎配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    /// TTS 服务基础 URL
    #[serde(default = "default_tts_url")]
    pub url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_tts_timeout")]
    pub timeout_secs: u64,

    /// 最大重试次数
    #[serde(default)]
    pub max_retries: u32,
}

fn default_tts_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_tts_timeout() -> u64 {
    120
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            url: default_tts_url(),
            timeout_secs: default_tts_timeout(),
            max_retries: 0,
        }
    }
}

/// 音效/音乐生成配置
#[derive(Debug, Clone, Deserialize)]
pub struct SoundGenConfig {
    /// 音效生成服务基础 URL
    #[serde(default = "default_sound_url")]
    pub url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_sound_timeout")]
    pub timeout_secs: u64,

    /// 是否生成音效
    #[serde(default = "default_true")]
    pub sfx_enabled: bool,

    /// 是否生成氛围音乐
    #[serde(default = "default_true")]
    pub music_enabled: bool,
}

fn default_sound_url() -> String {
    "http://localhost:8200".to_string()
}

fn default_sound_timeout() -> u64 {
    120
}

fn default_true() -> bool {
    true
}

impl Default for SoundGenConfig {
    fn default() -> Self {
        Self {
            url: default_sound_url(),
            timeout_secs: default_sound_timeout(),
            sfx_enabled: default_true(),
            music_enabled: default_true(),
        }
    }
}

/// 故事板图片生成配置
#[derive(Debug, Clone, Deserialize)]
pub struct ImageGenConfig {
    /// 图片生成服务基础 URL
    #[serde(default = "default_image_url")]
    pub url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_image_timeout")]
    pub timeout_secs: u64,

    /// 是否生成故事板图片
    #[serde(default)]
    pub enabled: bool,
}

fn default_image_url() -> String {
    "http://localhost:8300".to_string()
}

fn default_image_timeout() -> u64 {
    180
}

impl Default for ImageGenConfig {
    fn default() -> Self {
        Self {
            url: default_image_url(),
            timeout_secs: default_image_timeout(),
            enabled: false,
        }
    }
}

/// 混音配置
///
/// 注意：行间隔/场景间隔/响度常量是产品调校值，固定在 domain 层，
/// 不开放配置。这里只有与部署相关的参数。
#[derive(Debug, Clone, Deserialize)]
pub struct MixConfig {
    /// 单次请求允许的最大台词数
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,

    /// 混音请求体大小限制（字节）
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

fn default_max_lines() -> usize {
    500
}

fn default_max_body_size() -> usize {
    100 * 1024 * 1024 // 100 MB，台词音频以 base64 内联
}

impl Default for MixConfig {
    fn default() -> Self {
        Self {
            max_lines: default_max_lines(),
            max_body_size: default_max_body_size(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5080);
        assert_eq!(config.tts.url, "http://localhost:8000");
        assert_eq!(config.llm.url, "http://localhost:8100");
        assert!(!config.image.enabled);
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:5080");
    }

    #[test]
    fn test_public_base_url_falls_back_to_localhost() {
        let config = ServerConfig::default();
        assert_eq!(config.public_base_url(), "http://localhost:5080");
    }
}
