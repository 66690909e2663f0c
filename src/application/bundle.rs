//! Storyboard Bundle - 生成路由与混音路由共享的 JSON 形状
//!
//! 生成管线产出该结构，混音引擎原样消费它；线上统一 camelCase。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::script::{DialogueLine, MusicCue, Scene, SceneImage, SfxCue};
use crate::domain::voice::VoiceProfile;

/// 一次生成周期的完整产物
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryboardBundle {
    /// 有序场景列表
    pub scenes: Vec<Scene>,
    /// 按 (scene_index, line_index) 有序的台词
    pub dialogue_lines: Vec<DialogueLine>,
    /// base64 台词音频，与 dialogue_lines 一一对应同序；
    /// 合成失败的行为空字符串（混音时替换为静音占位）
    pub lines_audio: Vec<String>,
    /// 音效提示（含音频）
    #[serde(default)]
    pub sfx_list: Vec<SfxCue>,
    /// 氛围音乐提示（含音频）
    #[serde(default)]
    pub music_list: Vec<MusicCue>,
    /// 权威场景起始时间；提供时优先于混音时推导的值
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_start_times: Option<Vec<f64>>,
    /// 说话者 → 音色分配表
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub voices: HashMap<String, VoiceProfile>,
    /// 故事板图片（可选功能）
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<SceneImage>,
}

impl StoryboardBundle {
    /// 基本形状校验：台词音频与台词一一对应
    pub fn validate(&self) -> Result<(), String> {
        if self.lines_audio.len() != self.dialogue_lines.len() {
            return Err(format!(
                "linesAudio length {} does not match dialogueLines length {}",
                self.lines_audio.len(),
                self.dialogue_lines.len()
            ));
        }
        if let Some(starts) = &self.scene_start_times {
            if starts.len() != self.scenes.len() {
                return Err(format!(
                    "sceneStartTimes length {} does not match scenes length {}",
                    starts.len(),
                    self.scenes.len()
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_bundle() -> StoryboardBundle {
        StoryboardBundle {
            scenes: vec![Scene {
                index: 0,
                heading: "INT. ROOM".to_string(),
                action: String::new(),
            }],
            dialogue_lines: vec![DialogueLine {
                scene_index: 0,
                line_index: 0,
                character: "NARRATOR".to_string(),
                text: "hello".to_string(),
                parenthetical: None,
            }],
            lines_audio: vec![String::new()],
            sfx_list: vec![],
            music_list: vec![],
            scene_start_times: None,
            voices: HashMap::new(),
            images: vec![],
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(minimal_bundle().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_misaligned_audio() {
        let mut bundle = minimal_bundle();
        bundle.lines_audio.push(String::new());
        assert!(bundle.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_misaligned_scene_starts() {
        let mut bundle = minimal_bundle();
        bundle.scene_start_times = Some(vec![0.0, 1.0]);
        assert!(bundle.validate().is_err());
    }

    #[test]
    fn test_wire_format_camel_case() {
        let json = serde_json::to_value(minimal_bundle()).unwrap();
        assert!(json.get("dialogueLines").is_some());
        assert!(json.get("linesAudio").is_some());
        assert!(json.get("sfxList").is_some());
        // None 的权威时间不出现在线上
        assert!(json.get("sceneStartTimes").is_none());
    }

    #[test]
    fn test_deserialize_minimal_external_shape() {
        // 外部协作方只需提供核心字段
        let json = r#"{
            "scenes": [{"index": 0, "heading": "EXT. STREET"}],
            "dialogueLines": [],
            "linesAudio": []
        }"#;
        let bundle: StoryboardBundle = serde_json::from_str(json).unwrap();
        assert!(bundle.validate().is_ok());
        assert!(bundle.sfx_list.is_empty());
    }
}
