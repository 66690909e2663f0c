//! Storyboard Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{GenerateStoryboard, StoryboardBundle};
use crate::infrastructure::http::dto::{ApiResponse, GenerateStoryboardRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 解析剧本并生成故事板（台词音频以 base64 内联返回）
pub async fn generate_storyboard(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateStoryboardRequest>,
) -> Result<Json<ApiResponse<StoryboardBundle>>, ApiError> {
    let command = GenerateStoryboard {
        script_text: req.script_text,
        include_images: req.include_images,
    };

    let bundle = state.generate_storyboard_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(bundle)))
}
