//! Configuration Module
//!
//! 配置类型定义与多源加载

mod loader;
mod types;

pub use loader::{load_config, load_config_from_path, print_config, ConfigError};
pub use types::{
    AppConfig, ImageGenConfig, LlmConfig, LogConfig, MixConfig, ServerConfig, SoundGenConfig,
    StaticFilesConfig, TtsConfig,
};
