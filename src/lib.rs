//! Resonance - 剧本转多音色有声混音系统
//!
//! 把剧本/散文文本转换为多角色朗读 + 音效 + 氛围音乐的单轨混音，
//! 可选生成分镜故事板图片。
//!
//! 领域层 (domain/):
//! - Script Context: 场景/台词数据模型
//! - Voice Context: 音色池与角色分配（首次出现顺序，纯函数，无全局状态）
//! - Timeline: 台词时间轴排布（0.12s 行间隔 / 0.5s 场景间隔）
//! - Mixdown: 响度归一化 + 离线合成渲染
//!
//! 应用层 (application/):
//! - Ports: 出站端口（ScriptParser, SpeechEngine, SoundGen, ImageGen,
//!   AudioCodec, MixStore, SpeechCache）
//! - Commands: 生成故事板 / 渲染混音 / 释放混音
//! - Queries: 获取混音音频 / 列出音色池
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API (axum)
//! - Adapters: LLM 剧本解析、TTS、音效/音乐生成、图片生成、音频编解码
//! - Memory: 混音存储与语音缓存（纯内存，无持久化）

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
