//! Command Handlers

mod mix_handlers;
mod storyboard_handlers;

pub use mix_handlers::{ReleaseMixHandler, RenderMixHandler, RenderMixResponse};
pub use storyboard_handlers::{GenerateConfig, GenerateStoryboardHandler};
