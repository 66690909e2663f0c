//! Domain Layer
//!
//! 领域模型与纯业务逻辑：
//! - script: 场景/台词/音效提示数据模型
//! - voice: 音色池与角色分配
//! - timeline: 台词时间轴排布
//! - mixdown: 响度归一化与离线合成渲染

pub mod mixdown;
pub mod script;
pub mod timeline;
pub mod voice;

pub use mixdown::{
    render_composite, sfx_normalize_gain, ClipBuffer, PlacedClip, DEFAULT_CHANNELS,
    DEFAULT_SAMPLE_RATE, MUSIC_GAIN, SFX_TARGET_PEAK,
};
pub use timeline::{
    place_lines, scene_at, LinePlacement, TimelinePlacement, LINE_GAP_SECS, SCENE_GAP_SECS,
};
