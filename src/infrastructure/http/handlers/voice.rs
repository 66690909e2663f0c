//! Voice Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::infrastructure::http::dto::{ApiResponse, VoicesResponse};
use crate::infrastructure::http::state::AppState;

/// 列出音色池目录（旁白 + 角色槽位 + 溢出共享音色）
pub async fn list_voices(State(state): State<Arc<AppState>>) -> Json<ApiResponse<VoicesResponse>> {
    let voices = state.list_voices_handler.handle();
    Json(ApiResponse::success(VoicesResponse { voices }))
}
