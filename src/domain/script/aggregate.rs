//! Script Context - Storyboard 聚合根
//!
//! 不变量:
//! - 场景序号与列表位置一致（0 起连续）
//! - 每条台词的 scene_index 指向已有场景
//! - 台词按 (scene_index, line_index) 单调递增排列

use super::entities::{DialogueLine, MusicCue, Scene, SfxCue};
use super::errors::ScriptError;

/// 故事板聚合根：解析后的完整剧本
#[derive(Debug, Clone)]
pub struct Storyboard {
    scenes: Vec<Scene>,
    lines: Vec<DialogueLine>,
    sfx_cues: Vec<SfxCue>,
    music_cues: Vec<MusicCue>,
}

impl Storyboard {
    /// 创建并验证故事板
    pub fn new(
        scenes: Vec<Scene>,
        lines: Vec<DialogueLine>,
        sfx_cues: Vec<SfxCue>,
        music_cues: Vec<MusicCue>,
    ) -> Result<Self, ScriptError> {
        if scenes.is_empty() {
            return Err(ScriptError::Empty);
        }

        for (position, scene) in scenes.iter().enumerate() {
            if scene.index != position {
                return Err(ScriptError::SceneIndexMismatch {
                    position,
                    index: scene.index,
                });
            }
        }

        let mut prev: Option<(usize, usize)> = None;
        for (position, line) in lines.iter().enumerate() {
            if line.scene_index >= scenes.len() {
                return Err(ScriptError::UnknownScene {
                    scene_index: line.scene_index,
                    line_index: position,
                });
            }
            let key = (line.scene_index, line.line_index);
            if let Some(p) = prev {
                if key <= p {
                    return Err(ScriptError::LinesOutOfOrder { position });
                }
            }
            prev = Some(key);
        }

        Ok(Self {
            scenes,
            lines,
            sfx_cues,
            music_cues,
        })
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn lines(&self) -> &[DialogueLine] {
        &self.lines
    }

    pub fn sfx_cues(&self) -> &[SfxCue] {
        &self.sfx_cues
    }

    pub fn music_cues(&self) -> &[MusicCue] {
        &self.music_cues
    }

    /// 说话者列表，按首次出现顺序去重（旁白也包含在内）
    pub fn speakers_in_order(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for line in &self.lines {
            let name = line.character.as_str();
            if !seen.iter().any(|s| s.eq_ignore_ascii_case(name)) {
                seen.push(name);
            }
        }
        seen
    }

    /// 拆出内部数据（供生成管线填充音频后组装 bundle）
    pub fn into_parts(self) -> (Vec<Scene>, Vec<DialogueLine>, Vec<SfxCue>, Vec<MusicCue>) {
        (self.scenes, self.lines, self.sfx_cues, self.music_cues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(index: usize) -> Scene {
        Scene {
            index,
            heading: format!("SCENE {}", index),
            action: String::new(),
        }
    }

    fn line(scene_index: usize, line_index: usize, character: &str) -> DialogueLine {
        DialogueLine {
            scene_index,
            line_index,
            character: character.to_string(),
            text: "...".to_string(),
            parenthetical: None,
        }
    }

    #[test]
    fn test_valid_storyboard() {
        let board = Storyboard::new(
            vec![scene(0), scene(1)],
            vec![line(0, 0, "NARRATOR"), line(0, 1, "ALICE"), line(1, 0, "BOB")],
            vec![],
            vec![],
        );
        assert!(board.is_ok());
    }

    #[test]
    fn test_empty_scenes_rejected() {
        let board = Storyboard::new(vec![], vec![], vec![], vec![]);
        assert_eq!(board.unwrap_err(), ScriptError::Empty);
    }

    #[test]
    fn test_unknown_scene_rejected() {
        let board = Storyboard::new(vec![scene(0)], vec![line(3, 0, "ALICE")], vec![], vec![]);
        assert!(matches!(
            board.unwrap_err(),
            ScriptError::UnknownScene { scene_index: 3, .. }
        ));
    }

    #[test]
    fn test_out_of_order_lines_rejected() {
        let board = Storyboard::new(
            vec![scene(0), scene(1)],
            vec![line(1, 0, "BOB"), line(0, 0, "ALICE")],
            vec![],
            vec![],
        );
        assert!(matches!(
            board.unwrap_err(),
            ScriptError::LinesOutOfOrder { position: 1 }
        ));
    }

    #[test]
    fn test_scene_index_mismatch_rejected() {
        let board = Storyboard::new(vec![scene(0), scene(5)], vec![], vec![], vec![]);
        assert!(matches!(
            board.unwrap_err(),
            ScriptError::SceneIndexMismatch { position: 1, index: 5 }
        ));
    }

    #[test]
    fn test_speakers_first_seen_order() {
        let board = Storyboard::new(
            vec![scene(0), scene(1)],
            vec![
                line(0, 0, "NARRATOR"),
                line(0, 1, "ALICE"),
                line(1, 0, "Alice"),
                line(1, 1, "BOB"),
            ],
            vec![],
            vec![],
        )
        .unwrap();
        // 大小写不同视为同一说话者
        assert_eq!(board.speakers_in_order(), vec!["NARRATOR", "ALICE", "BOB"]);
    }
}
