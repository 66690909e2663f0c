//! 时间轴排布
//!
//! 台词在单一游标上首尾相接：同场景相邻两行之间留 0.12s，
//! 跨场景边界留 0.5s。每行的起始时间在游标前进之前记录。
//! 间隔常量是产品调校值，不可配置。

/// 同场景相邻台词之间的间隔（秒）
pub const LINE_GAP_SECS: f64 = 0.12;

/// 场景边界间隔（秒）
pub const SCENE_GAP_SECS: f64 = 0.5;

/// 一条台词在时间轴上的位置
#[derive(Debug, Clone, PartialEq)]
pub struct LinePlacement {
    /// 所属场景序号
    pub scene_index: usize,
    /// 起始时间（秒）
    pub start_secs: f64,
    /// 台词解码后的时长（秒）；解码失败的占位行约为 0
    pub duration_secs: f64,
}

/// 排布结果：逐行位置 + 逐场景起始时间
#[derive(Debug, Clone)]
pub struct TimelinePlacement {
    /// 每条台词一个槽位，与输入顺序一致
    pub lines: Vec<LinePlacement>,
    /// 每个场景一个起始时间，长度恒等于场景数，单调不减
    pub scene_starts: Vec<f64>,
    /// 最后一条台词的结束时间（秒）
    pub dialogue_end_secs: f64,
}

impl TimelinePlacement {
    /// 逐行起始时间（供 UI 逐行高亮）
    pub fn line_starts(&self) -> Vec<f64> {
        self.lines.iter().map(|l| l.start_secs).collect()
    }
}

/// 排布台词行
///
/// # 参数
/// - `scene_count` - 场景总数；输出的 scene_starts 长度恒等于它
/// - `lines` - 每条台词的 (scene_index, duration_secs)，按剧本顺序
///
/// 没有台词的场景继承时间轴上相邻内容的游标：优先取下一个有台词
/// 场景的起始时间，末尾的空场景取台词结束时间。这样 scene_starts
/// 始终完整且单调不减。
pub fn place_lines(scene_count: usize, lines: &[(usize, f64)]) -> TimelinePlacement {
    let mut placements = Vec::with_capacity(lines.len());
    let mut scene_starts: Vec<Option<f64>> = vec![None; scene_count];

    let mut cursor = 0.0f64;
    let mut prev_scene: Option<usize> = None;

    for &(scene_index, duration_secs) in lines {
        match prev_scene {
            Some(prev) if prev == scene_index => cursor += LINE_GAP_SECS,
            Some(_) => cursor += SCENE_GAP_SECS,
            None => {}
        }

        if let Some(slot) = scene_starts.get_mut(scene_index) {
            if slot.is_none() {
                *slot = Some(cursor);
            }
        }

        placements.push(LinePlacement {
            scene_index,
            start_secs: cursor,
            duration_secs,
        });

        cursor += duration_secs;
        prev_scene = Some(scene_index);
    }

    let dialogue_end_secs = cursor;

    // 填充没有台词的场景：从后往前取下一个已知起始时间，末尾取结束游标
    let mut resolved = vec![0.0f64; scene_count];
    let mut next_known = dialogue_end_secs;
    for i in (0..scene_count).rev() {
        match scene_starts[i] {
            Some(t) => next_known = t,
            None => {}
        }
        resolved[i] = next_known;
    }

    TimelinePlacement {
        lines: placements,
        scene_starts: resolved,
        dialogue_end_secs,
    }
}

/// 当前场景：起始时间 ≤ 播放位置的最后一个场景
///
/// 播放位置早于第一个场景时返回 0；空时间轴返回 None。
pub fn scene_at(scene_starts: &[f64], position_secs: f64) -> Option<usize> {
    if scene_starts.is_empty() {
        return None;
    }
    let mut current = 0;
    for (i, &start) in scene_starts.iter().enumerate() {
        if start <= position_secs {
            current = i;
        } else {
            break;
        }
    }
    Some(current)
}
