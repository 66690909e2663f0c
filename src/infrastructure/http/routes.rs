//! HTTP Routes
//!
//! API 路由定义
//!
//! API Endpoints:
//! - /api/ping                    GET   健康检查
//! - /api/voices                  GET   列出音色池目录
//! - /api/storyboard/generate     POST  解析剧本并生成故事板（台词音频内联）
//! - /api/mix/render              POST  渲染混音，发布可下载的混音资源
//! - /api/mix/audio/{mix_id}      GET   下载混音 WAV
//! - /api/mix/release             POST  显式释放混音

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/voices", get(handlers::list_voices))
        .nest("/storyboard", storyboard_routes())
        .nest("/mix", mix_routes())
}

/// Storyboard 路由
fn storyboard_routes() -> Router<Arc<AppState>> {
    Router::new().route("/generate", post(handlers::generate_storyboard))
}

/// Mix 路由
fn mix_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/render", post(handlers::render_mix))
        .route("/audio/:mix_id", get(handlers::get_mix_audio))
        .route("/release", post(handlers::release_mix))
}
