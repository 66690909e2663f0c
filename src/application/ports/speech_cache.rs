//! Speech Cache Port - 语音片段进程内缓存
//!
//! 同一 (音色, 文本) 的台词在一个进程生命周期内只合成一次

use std::sync::Arc;

/// 生成缓存 key：音色 + 文本内容的 MD5
pub fn generate_speech_cache_key(voice_id: &str, text: &str) -> String {
    let digest = md5::compute(format!("{}:{}", voice_id, text));
    format!("{:x}", digest)
}

/// Speech Cache Port
pub trait SpeechCachePort: Send + Sync {
    /// 查询缓存
    fn get(&self, key: &str) -> Option<Arc<Vec<u8>>>;

    /// 写入缓存
    fn put(&self, key: String, audio_data: Vec<u8>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_stable() {
        let a = generate_speech_cache_key("vx-char-01", "你好");
        let b = generate_speech_cache_key("vx-char-01", "你好");
        assert_eq!(a, b);
    }

    #[test]
    fn test_cache_key_differs_by_voice_and_text() {
        let a = generate_speech_cache_key("vx-char-01", "你好");
        let b = generate_speech_cache_key("vx-char-02", "你好");
        let c = generate_speech_cache_key("vx-char-01", "再见");
        assert_ne!(a, b);
        assert_ne!(a, c);
    }
}
