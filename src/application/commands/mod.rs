//! Application Commands

pub mod handlers;

mod mix_commands;
mod storyboard_commands;

pub use mix_commands::{ReleaseMix, RenderMix};
pub use storyboard_commands::GenerateStoryboard;
