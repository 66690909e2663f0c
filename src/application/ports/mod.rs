//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_codec;
mod image_gen;
mod mix_store;
mod script_parser;
mod sound_gen;
mod speech_cache;
mod speech_engine;

pub use audio_codec::{AudioCodecPort, CodecError};
pub use image_gen::{ImageGenError, ImageGenPort, ImageRequest, ImageResponse};
pub use mix_store::{MixStorePort, RenderedMix};
pub use script_parser::{ParseError, ScriptParserPort};
pub use sound_gen::{SoundGenError, SoundGenPort, SoundKind, SoundRequest, SoundResponse};
pub use speech_cache::{generate_speech_cache_key, SpeechCachePort};
pub use speech_engine::{SpeechEnginePort, SpeechError, SpeechRequest, SpeechResponse};
