//! 音频编解码适配器

mod symphonia_codec;

pub use symphonia_codec::SymphoniaCodec;
