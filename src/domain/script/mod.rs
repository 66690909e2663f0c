//! Script Context - 剧本数据模型
//!
//! 由 LLM 解析服务产出，一经产出不可变

mod aggregate;
mod entities;
mod errors;

pub use aggregate::Storyboard;
pub use entities::{DialogueLine, MusicCue, Scene, SceneImage, SfxCue};
pub use errors::ScriptError;
