//! Mix Handlers

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::{GetMixAudioQuery, ReleaseMix, RenderMix};
use crate::infrastructure::http::dto::{
    ApiResponse, Empty, ReleaseMixRequest, RenderMixRequest, RenderMixResponseDto,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 渲染混音并发布可下载资源；同会话的上一份混音被撤销
pub async fn render_mix(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RenderMixRequest>,
) -> Result<Json<ApiResponse<RenderMixResponseDto>>, ApiError> {
    if req.session_key.trim().is_empty() {
        return Err(ApiError::BadRequest("sessionKey is empty".to_string()));
    }

    let command = RenderMix {
        session_key: req.session_key,
        bundle: req.bundle,
    };

    let result = state.render_mix_handler.handle(command).await?;

    let audio_url = format!("{}/api/mix/audio/{}", state.public_base_url, result.mix_id);

    Ok(Json(ApiResponse::success(RenderMixResponseDto {
        mix_id: result.mix_id,
        revoked_mix_id: result.revoked_mix_id,
        audio_url,
        duration_secs: result.duration_secs,
        scene_start_times: result.scene_start_times,
        line_start_times: result.line_start_times,
    })))
}

/// 下载混音 WAV
pub async fn get_mix_audio(
    State(state): State<Arc<AppState>>,
    Path(mix_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let result = state
        .get_mix_audio_handler
        .handle(GetMixAudioQuery { mix_id })
        .await?;

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, result.content_type)
        .header(header::CONTENT_LENGTH, result.mix.wav_data.len())
        .body(Body::from(result.mix.wav_data.clone()))
        .unwrap())
}

/// 显式释放混音
pub async fn release_mix(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ReleaseMixRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .release_mix_handler
        .handle(ReleaseMix { mix_id: req.mix_id })
        .await?;

    Ok(Json(ApiResponse::ok()))
}
