//! In-Memory State
//!
//! 进程内状态：混音存储与语音缓存。无持久化，进程退出即清空。

mod mix_store;
mod speech_cache;

pub use mix_store::InMemoryMixStore;
pub use speech_cache::InMemorySpeechCache;
