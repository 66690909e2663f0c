//! 音效/音乐生成适配器

mod http_sound_client;

pub use http_sound_client::{HttpSoundClient, HttpSoundClientConfig};
