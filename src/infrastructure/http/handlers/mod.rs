//! HTTP Handlers

mod mix;
mod ping;
mod storyboard;
mod voice;

pub use mix::*;
pub use ping::*;
pub use storyboard::*;
pub use voice::*;
