//! Data Transfer Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::StoryboardBundle;
use crate::domain::voice::VoiceProfile;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// 成功但无数据
    pub fn ok() -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(Empty {}),
        }
    }
}

// ============================================================================
// Storyboard DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateStoryboardRequest {
    /// 原始剧本或散文文本
    pub script_text: String,
    /// 可选：是否生成故事板图片
    #[serde(default)]
    pub include_images: Option<bool>,
}

// ============================================================================
// Mix DTOs
// ============================================================================

/// 混音请求：会话 key + 生成周期的完整产物（bundle 字段平铺在顶层）
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderMixRequest {
    pub session_key: String,
    #[serde(flatten)]
    pub bundle: StoryboardBundle,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderMixResponseDto {
    pub mix_id: Uuid,
    /// 同会话被撤销的上一份混音 ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revoked_mix_id: Option<Uuid>,
    /// 混音音频下载地址
    pub audio_url: String,
    pub duration_secs: f64,
    pub scene_start_times: Vec<f64>,
    pub line_start_times: Vec<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseMixRequest {
    pub mix_id: Uuid,
}

// ============================================================================
// Voice DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub voices: Vec<VoiceProfile>,
}
