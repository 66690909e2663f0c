//! Voice Context - 音色池与角色分配
//!
//! 固定的音色目录 + 按首次出现顺序的纯函数分配，无全局可变状态

mod assignment;
mod pool;

pub use assignment::{assign_voices, VoiceAssignment, NARRATOR_KEY};
pub use pool::{VoicePool, VoiceProfile};
