//! In-Memory Speech Cache
//!
//! MD5 内容寻址的语音片段缓存。超出容量上限时整体清空——
//! 生成周期之间缓存命中才有价值，跨周期丢失只是重新合成。

use dashmap::DashMap;
use std::sync::Arc;

use crate::application::ports::SpeechCachePort;

/// 默认缓存条目上限
const DEFAULT_MAX_ENTRIES: usize = 4096;

/// 内存语音缓存
pub struct InMemorySpeechCache {
    entries: DashMap<String, Arc<Vec<u8>>>,
    max_entries: usize,
}

impl InMemorySpeechCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_ENTRIES)
    }

    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            max_entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for InMemorySpeechCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechCachePort for InMemorySpeechCache {
    fn get(&self, key: &str) -> Option<Arc<Vec<u8>>> {
        self.entries.get(key).map(|e| e.clone())
    }

    fn put(&self, key: String, audio_data: Vec<u8>) {
        if self.entries.len() >= self.max_entries {
            tracing::debug!(
                entries = self.entries.len(),
                "Speech cache full, clearing"
            );
            self.entries.clear();
        }
        self.entries.insert(key, Arc::new(audio_data));
    }
}
