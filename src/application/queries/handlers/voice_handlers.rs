//! Voice Query Handlers

use crate::domain::voice::{VoicePool, VoiceProfile};

/// ListVoices Handler - 列出音色池目录
pub struct ListVoicesHandler {
    voice_pool: VoicePool,
}

impl ListVoicesHandler {
    pub fn new(voice_pool: VoicePool) -> Self {
        Self { voice_pool }
    }

    pub fn handle(&self) -> Vec<VoiceProfile> {
        self.voice_pool.all().into_iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_voices_includes_full_pool() {
        let handler = ListVoicesHandler::new(VoicePool::default());
        let voices = handler.handle();
        // 旁白 + 6 角色 + 溢出
        assert_eq!(voices.len(), 8);
        assert!(voices.iter().any(|v| v.voice_id == "vx-narrator-01"));
        assert!(voices.iter().any(|v| v.voice_id == "vx-overflow-01"));
    }
}
