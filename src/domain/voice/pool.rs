//! Voice Context - 音色池
//!
//! 不变量:
//! - 恰好一个旁白音色
//! - 六个角色槽位（非溢出角色上限）
//! - 一个溢出音色，第七个及之后的说话者共用

use serde::{Deserialize, Serialize};

/// 角色槽位数量上限（不含旁白与溢出音色）
pub const CHARACTER_SLOTS: usize = 6;

/// 一个可用于语音合成的音色身份
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceProfile {
    /// 下游 TTS 服务的音色 ID
    pub voice_id: String,
    /// 展示名称
    pub voice_name: String,
    /// 音色描述
    pub description: String,
}

impl VoiceProfile {
    fn new(voice_id: &str, voice_name: &str, description: &str) -> Self {
        Self {
            voice_id: voice_id.to_string(),
            voice_name: voice_name.to_string(),
            description: description.to_string(),
        }
    }
}

/// 音色池：旁白 + 角色槽位 + 溢出音色的固定目录
#[derive(Debug, Clone)]
pub struct VoicePool {
    narrator: VoiceProfile,
    characters: Vec<VoiceProfile>,
    overflow: VoiceProfile,
}

impl VoicePool {
    pub fn new(
        narrator: VoiceProfile,
        characters: Vec<VoiceProfile>,
        overflow: VoiceProfile,
    ) -> Self {
        debug_assert!(characters.len() <= CHARACTER_SLOTS);
        Self {
            narrator,
            characters,
            overflow,
        }
    }

    pub fn narrator(&self) -> &VoiceProfile {
        &self.narrator
    }

    /// 第 n 个首次出现的角色对应的音色；槽位用尽后返回溢出音色
    pub fn character_slot(&self, n: usize) -> &VoiceProfile {
        self.characters.get(n).unwrap_or(&self.overflow)
    }

    pub fn characters(&self) -> &[VoiceProfile] {
        &self.characters
    }

    pub fn overflow(&self) -> &VoiceProfile {
        &self.overflow
    }

    /// 池中全部音色（旁白、角色槽位、溢出），用于 /api/voices 列表
    pub fn all(&self) -> Vec<&VoiceProfile> {
        let mut voices = Vec::with_capacity(self.characters.len() + 2);
        voices.push(&self.narrator);
        voices.extend(self.characters.iter());
        voices.push(&self.overflow);
        voices
    }
}

impl Default for VoicePool {
    fn default() -> Self {
        Self::new(
            VoiceProfile::new("vx-narrator-01", "Calloway", "沉稳的中性旁白"),
            vec![
                VoiceProfile::new("vx-char-01", "Marlowe", "低沉男声，年长角色"),
                VoiceProfile::new("vx-char-02", "Isolde", "明亮女声，主角"),
                VoiceProfile::new("vx-char-03", "Briggs", "粗粝男声，反派/配角"),
                VoiceProfile::new("vx-char-04", "Senna", "柔和女声，年轻角色"),
                VoiceProfile::new("vx-char-05", "Orren", "轻快男声，喜剧角色"),
                VoiceProfile::new("vx-char-06", "Vesper", "低哑女声，神秘角色"),
            ],
            VoiceProfile::new("vx-overflow-01", "Chorus", "所有超出槽位的说话者共用"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pool_shape() {
        let pool = VoicePool::default();
        assert_eq!(pool.characters().len(), CHARACTER_SLOTS);
        // 旁白 + 6 角色 + 溢出
        assert_eq!(pool.all().len(), CHARACTER_SLOTS + 2);
    }

    #[test]
    fn test_character_slot_overflow() {
        let pool = VoicePool::default();
        assert_eq!(pool.character_slot(0).voice_id, "vx-char-01");
        assert_eq!(pool.character_slot(5).voice_id, "vx-char-06");
        assert_eq!(pool.character_slot(6).voice_id, "vx-overflow-01");
        assert_eq!(pool.character_slot(99).voice_id, "vx-overflow-01");
    }
}
