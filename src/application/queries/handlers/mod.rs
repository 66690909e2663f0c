//! Query Handlers

mod mix_handlers;
mod voice_handlers;

pub use mix_handlers::{GetMixAudioHandler, MixAudio};
pub use voice_handlers::ListVoicesHandler;
