//! Mix Commands

use uuid::Uuid;

use crate::application::bundle::StoryboardBundle;

/// 渲染混音：消费生成路由产出的 bundle，产出单轨混音
#[derive(Debug, Clone)]
pub struct RenderMix {
    /// 会话 key；同 key 的上一份混音在发布新混音前被撤销
    pub session_key: String,
    /// 生成周期的完整产物
    pub bundle: StoryboardBundle,
}

/// 显式释放混音
#[derive(Debug, Clone)]
pub struct ReleaseMix {
    pub mix_id: Uuid,
}
