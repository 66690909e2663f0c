//! Script Context - Entities
//!
//! 线上 JSON 统一使用 camelCase（生成路由与混音路由共享同一形状）

use serde::{Deserialize, Serialize};

/// 场景：剧本的锚定单位（标题 + 动作描述 + 其下台词）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// 场景序号（0 起）
    pub index: usize,
    /// 场景标题（如 "INT. KITCHEN - NIGHT"）
    pub heading: String,
    /// 动作/环境描述
    #[serde(default)]
    pub action: String,
}

/// 台词行：一条有序的、按场景分组的朗读单元
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueLine {
    /// 所属场景序号
    pub scene_index: usize,
    /// 行序号（场景内 0 起）
    pub line_index: usize,
    /// 说话者（"NARRATOR" 表示旁白）
    pub character: String,
    /// 台词文本
    pub text: String,
    /// 括号注释（语气/动作提示），可选
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parenthetical: Option<String>,
}

/// 音效提示：挂在某个场景上，带回退起始偏移
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SfxCue {
    /// 所属场景序号
    pub scene_index: usize,
    /// 音效生成提示词
    pub prompt: String,
    /// 回退起始时间（秒）；场景锚定优先于该值
    #[serde(default)]
    pub start_time: f64,
    /// base64 编码的音频数据；解析阶段为空，合成阶段填入
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_base64: Option<String>,
}

/// 氛围音乐提示，结构与音效一致
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicCue {
    /// 所属场景序号
    pub scene_index: usize,
    /// 音乐生成提示词
    pub prompt: String,
    /// 回退起始时间（秒）
    #[serde(default)]
    pub start_time: f64,
    /// base64 编码的音频数据
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_base64: Option<String>,
}

/// 故事板图片：每场景一帧（可选功能）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneImage {
    /// 所属场景序号
    pub scene_index: usize,
    /// 图片生成提示词
    pub prompt: String,
    /// 生成结果 URL
    pub url: String,
}
