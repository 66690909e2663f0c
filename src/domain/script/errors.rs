//! Script Context - 领域错误

use thiserror::Error;

/// 剧本领域错误
#[derive(Debug, Error, PartialEq)]
pub enum ScriptError {
    /// 剧本没有任何场景
    #[error("Storyboard has no scenes")]
    Empty,

    /// 台词引用了不存在的场景
    #[error("Line {line_index} references unknown scene {scene_index}")]
    UnknownScene {
        scene_index: usize,
        line_index: usize,
    },

    /// 场景序号与其在列表中的位置不一致
    #[error("Scene at position {position} has index {index}")]
    SceneIndexMismatch { position: usize, index: usize },

    /// 台词顺序不是按 (scene_index, line_index) 单调递增
    #[error("Dialogue lines out of order at position {position}")]
    LinesOutOfOrder { position: usize },
}
