//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod codec;
pub mod image;
pub mod script;
pub mod sound;
pub mod speech;

pub use codec::SymphoniaCodec;
pub use image::{HttpImageClient, HttpImageClientConfig};
pub use script::{LlmScriptParser, LlmScriptParserConfig};
pub use sound::{HttpSoundClient, HttpSoundClientConfig};
pub use speech::{FakeSpeechClient, FakeSpeechClientConfig, HttpSpeechClient, HttpSpeechClientConfig};
