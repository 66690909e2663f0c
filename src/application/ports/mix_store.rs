//! Mix Store Port - 渲染混音的持有与释放
//!
//! 每个会话 key 同一时刻至多持有一份混音：发布新混音前必须先
//! 释放旧的（可撤销资源引用语义）。纯内存实现，无持久化。

use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// 一份已渲染的合成混音
#[derive(Debug, Clone)]
pub struct RenderedMix {
    /// 混音 ID（下载地址中使用）
    pub id: Uuid,
    /// 所属会话 key（同 key 的新混音会替换旧混音）
    pub session_key: String,
    /// WAV 容器数据
    pub wav_data: Vec<u8>,
    /// 混音总时长（秒）
    pub duration_secs: f64,
    /// 逐场景起始时间（秒）
    pub scene_start_times: Vec<f64>,
    /// 逐行起始时间（秒）
    pub line_start_times: Vec<f64>,
    /// 渲染时间
    pub created_at: DateTime<Utc>,
}

/// Mix Store Port
pub trait MixStorePort: Send + Sync {
    /// 发布混音；同一会话 key 之前的混音被撤销，返回被撤销的 ID
    fn publish(&self, mix: RenderedMix) -> Option<Uuid>;

    /// 按 ID 获取混音
    fn get(&self, id: Uuid) -> Option<Arc<RenderedMix>>;

    /// 显式释放混音；返回是否存在
    fn release(&self, id: Uuid) -> bool;

    /// 某会话 key 下存活的混音数量（不变量：≤ 1）
    fn live_count(&self, session_key: &str) -> usize;
}
