//! Application Layer
//!
//! CQRS 命令/查询处理器与出站端口

pub mod bundle;
pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

pub use bundle::StoryboardBundle;
pub use commands::handlers::{
    GenerateConfig, GenerateStoryboardHandler, ReleaseMixHandler, RenderMixHandler,
    RenderMixResponse,
};
pub use commands::{GenerateStoryboard, ReleaseMix, RenderMix};
pub use error::ApplicationError;
pub use ports::*;
pub use queries::handlers::{GetMixAudioHandler, ListVoicesHandler, MixAudio};
pub use queries::{GetMixAudioQuery, ListVoicesQuery};
