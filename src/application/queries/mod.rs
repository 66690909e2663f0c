//! Application Queries

pub mod handlers;

use uuid::Uuid;

/// 获取混音音频
#[derive(Debug, Clone)]
pub struct GetMixAudioQuery {
    pub mix_id: Uuid,
}

/// 列出音色池
#[derive(Debug, Clone)]
pub struct ListVoicesQuery;
