//! Voice Context - 角色音色分配
//!
//! 纯函数：不可变音色池 + 首次出现顺序的说话者列表 → 分配表。
//! 旁白永远在表中；角色按首次出现顺序占用槽位；槽位用尽后共用溢出音色。

use std::collections::HashMap;

use super::pool::{VoicePool, VoiceProfile};

/// 旁白的规范说话者 key
pub const NARRATOR_KEY: &str = "NARRATOR";

/// 说话者 → 音色的分配表
#[derive(Debug, Clone)]
pub struct VoiceAssignment {
    by_speaker: HashMap<String, VoiceProfile>,
    narrator: VoiceProfile,
}

impl VoiceAssignment {
    /// 查询说话者的音色；未知说话者回落到旁白音色
    pub fn voice_for(&self, speaker: &str) -> &VoiceProfile {
        self.by_speaker
            .get(&normalize_speaker(speaker))
            .unwrap_or(&self.narrator)
    }

    /// 分配表内容（规范化 key → 音色），供 bundle 输出
    pub fn entries(&self) -> &HashMap<String, VoiceProfile> {
        &self.by_speaker
    }
}

/// 说话者 key 规范化：去首尾空白 + ASCII 大写
fn normalize_speaker(name: &str) -> String {
    name.trim().to_ascii_uppercase()
}

/// 按首次出现顺序分配音色
///
/// # 参数
/// - `pool` - 不可变音色池
/// - `speakers` - 首次出现顺序的说话者名单（可含重复，重复项忽略）
pub fn assign_voices<'a, I>(pool: &VoicePool, speakers: I) -> VoiceAssignment
where
    I: IntoIterator<Item = &'a str>,
{
    let mut by_speaker: HashMap<String, VoiceProfile> = HashMap::new();

    // 旁白永远在表中
    by_speaker.insert(NARRATOR_KEY.to_string(), pool.narrator().clone());

    let mut next_slot = 0usize;
    for speaker in speakers {
        let key = normalize_speaker(speaker);
        if key.is_empty() || by_speaker.contains_key(&key) {
            continue;
        }
        by_speaker.insert(key, pool.character_slot(next_slot).clone());
        next_slot += 1;
    }

    VoiceAssignment {
        by_speaker,
        narrator: pool.narrator().clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrator_always_present() {
        let pool = VoicePool::default();
        let assignment = assign_voices(&pool, std::iter::empty());
        assert_eq!(
            assignment.voice_for("narrator").voice_id,
            pool.narrator().voice_id
        );
    }

    #[test]
    fn test_first_seen_order() {
        let pool = VoicePool::default();
        let assignment = assign_voices(&pool, ["ALICE", "BOB", "ALICE", "EVE"]);
        assert_eq!(assignment.voice_for("ALICE").voice_id, "vx-char-01");
        assert_eq!(assignment.voice_for("BOB").voice_id, "vx-char-02");
        // 重复的 ALICE 不占用新槽位
        assert_eq!(assignment.voice_for("EVE").voice_id, "vx-char-03");
    }

    #[test]
    fn test_overflow_shared_after_six_characters() {
        let pool = VoicePool::default();
        let speakers = ["A", "B", "C", "D", "E", "F", "G", "H"];
        let assignment = assign_voices(&pool, speakers);
        assert_eq!(assignment.voice_for("F").voice_id, "vx-char-06");
        // 第七个及以后共用溢出音色
        assert_eq!(assignment.voice_for("G").voice_id, "vx-overflow-01");
        assert_eq!(assignment.voice_for("H").voice_id, "vx-overflow-01");
    }

    #[test]
    fn test_speaker_key_normalized() {
        let pool = VoicePool::default();
        let assignment = assign_voices(&pool, ["  alice "]);
        assert_eq!(assignment.voice_for("ALICE").voice_id, "vx-char-01");
        assert_eq!(assignment.voice_for("Alice").voice_id, "vx-char-01");
    }

    #[test]
    fn test_unknown_speaker_falls_back_to_narrator() {
        let pool = VoicePool::default();
        let assignment = assign_voices(&pool, ["ALICE"]);
        assert_eq!(
            assignment.voice_for("GHOST").voice_id,
            pool.narrator().voice_id
        );
    }

    #[test]
    fn test_explicit_narrator_in_speakers_keeps_narrator_voice() {
        let pool = VoicePool::default();
        let assignment = assign_voices(&pool, ["NARRATOR", "ALICE"]);
        // NARRATOR 已在表中，不占用角色槽位
        assert_eq!(
            assignment.voice_for("NARRATOR").voice_id,
            pool.narrator().voice_id
        );
        assert_eq!(assignment.voice_for("ALICE").voice_id, "vx-char-01");
    }
}
