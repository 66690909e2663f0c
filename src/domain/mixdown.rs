//! 响度归一化与离线合成渲染
//!
//! 纯样本运算，不依赖编解码器：解码后的片段（交错 f32 样本）按
//! 时间轴位置叠加进单一输出缓冲。采样率不同的片段先线性重采样，
//! 声道数不同的片段先做声道映射。
//!
//! 响度常量是产品调校值：音效峰值归一到 0.6，音乐固定 0.18 增益。

/// 音效峰值归一化目标
pub const SFX_TARGET_PEAK: f32 = 0.6;

/// 音乐固定衰减增益（压在台词之下）
pub const MUSIC_GAIN: f32 = 0.18;

/// 没有任何台词解码成功时的渲染采样率
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// 没有任何台词解码成功时的渲染声道数
pub const DEFAULT_CHANNELS: u8 = 1;

/// 解码后的音频片段：交错 f32 样本
#[derive(Debug, Clone, PartialEq)]
pub struct ClipBuffer {
    /// 交错样本（帧数 × 声道数）
    pub samples: Vec<f32>,
    /// 采样率（Hz）
    pub sample_rate: u32,
    /// 声道数
    pub channels: u8,
}

impl ClipBuffer {
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: u8) -> Self {
        Self {
            samples,
            sample_rate,
            channels,
        }
    }

    /// 近零长度的静音占位片段（台词解码失败时保持槽位对齐）
    pub fn silent_placeholder() -> Self {
        Self {
            samples: Vec::new(),
            sample_rate: DEFAULT_SAMPLE_RATE,
            channels: DEFAULT_CHANNELS,
        }
    }

    /// 帧数（每声道样本数）
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }

    /// 时长（秒）
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / self.sample_rate as f64
    }

    /// 所有声道上的最大绝对样本值
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()))
    }
}

/// 音效峰值归一化增益
///
/// 峰值 p > 0 时返回 0.6 / p；全静音片段直接返回目标峰值增益，
/// 不做除法。
pub fn sfx_normalize_gain(clip: &ClipBuffer) -> f32 {
    let peak = clip.peak();
    if peak > 0.0 {
        SFX_TARGET_PEAK / peak
    } else {
        SFX_TARGET_PEAK
    }
}

/// 已排布到时间轴上的片段
#[derive(Debug, Clone)]
pub struct PlacedClip {
    pub clip: ClipBuffer,
    /// 时间轴起始位置（秒）
    pub start_secs: f64,
    /// 叠加时应用的增益
    pub gain: f32,
}

impl PlacedClip {
    /// 片段在时间轴上的结束时间（秒）
    pub fn end_secs(&self) -> f64 {
        self.start_secs + self.clip.duration_secs()
    }
}

/// 渲染合成混音
///
/// 总时长 = 所有已排布片段的最晚结束时间。同步渲染到完成，
/// 不支持中途取消。输出不做限幅，编码 16-bit PCM 时再钳制。
pub fn render_composite(placed: &[PlacedClip], sample_rate: u32, channels: u8) -> ClipBuffer {
    let channels = channels.max(1);
    let total_secs = placed.iter().map(PlacedClip::end_secs).fold(0.0, f64::max);
    let total_frames = (total_secs * sample_rate as f64).ceil() as usize;

    let mut output = vec![0.0f32; total_frames * channels as usize];

    for p in placed {
        if p.clip.samples.is_empty() {
            continue;
        }

        let adapted = adapt_clip(&p.clip, sample_rate, channels);
        let start_frame = (p.start_secs * sample_rate as f64).round() as usize;

        for (i, &sample) in adapted.iter().enumerate() {
            let out_idx = start_frame * channels as usize + i;
            if out_idx >= output.len() {
                break;
            }
            output[out_idx] += sample * p.gain;
        }
    }

    ClipBuffer::new(output, sample_rate, channels)
}

/// 把片段适配到目标采样率和声道数，返回交错样本
fn adapt_clip(clip: &ClipBuffer, sample_rate: u32, channels: u8) -> Vec<f32> {
    let remapped = remap_channels(&clip.samples, clip.channels.max(1), channels);
    if clip.sample_rate == sample_rate {
        remapped
    } else {
        resample_linear(&remapped, clip.sample_rate, sample_rate, channels)
    }
}

/// 声道映射：单声道复制到各声道，多声道合并取平均
fn remap_channels(samples: &[f32], from: u8, to: u8) -> Vec<f32> {
    if from == to {
        return samples.to_vec();
    }

    let from = from as usize;
    let to = to as usize;
    let frame_count = samples.len() / from;
    let mut out = Vec::with_capacity(frame_count * to);

    for frame in 0..frame_count {
        let base = frame * from;
        let mixed: f32 = samples[base..base + from].iter().sum::<f32>() / from as f32;
        for _ in 0..to {
            out.push(mixed);
        }
    }

    out
}

/// 简单线性重采样（交错样本）
fn resample_linear(samples: &[f32], from_rate: u32, to_rate: u32, channels: u8) -> Vec<f32> {
    if from_rate == to_rate || from_rate == 0 {
        return samples.to_vec();
    }

    let ratio = to_rate as f64 / from_rate as f64;
    let channel_count = channels.max(1) as usize;
    let frame_count = samples.len() / channel_count;
    if frame_count == 0 {
        return Vec::new();
    }
    let new_frame_count = (frame_count as f64 * ratio) as usize;
    let mut resampled = Vec::with_capacity(new_frame_count * channel_count);

    for i in 0..new_frame_count {
        let src_pos = i as f64 / ratio;
        let src_idx = src_pos as usize;
        let frac = src_pos - src_idx as f64;

        for ch in 0..channel_count {
            let idx0 = src_idx * channel_count + ch;
            let idx1 = ((src_idx + 1).min(frame_count - 1)) * channel_count + ch;

            let s0 = samples.get(idx0).copied().unwrap_or(0.0);
            let s1 = samples.get(idx1).copied().unwrap_or(s0);

            // 线性插值
            resampled.push(s0 + (s1 - s0) * frac as f32);
        }
    }

    resampled
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    fn mono_clip(samples: Vec<f32>, sample_rate: u32) -> ClipBuffer {
        ClipBuffer::new(samples, sample_rate, 1)
    }

    #[test]
    fn test_sfx_gain_normalizes_to_target_peak() {
        let clip = mono_clip(vec![0.0, 0.25, -0.5, 0.1], 44_100);
        let gain = sfx_normalize_gain(&clip);
        // 峰值 0.5 → 增益 1.2，渲染后峰值恰为 0.6
        assert!((gain - 1.2).abs() < EPS);
        assert!((clip.peak() * gain - SFX_TARGET_PEAK).abs() < EPS);
    }

    #[test]
    fn test_sfx_gain_silent_clip_no_division() {
        let clip = mono_clip(vec![0.0; 64], 44_100);
        let gain = sfx_normalize_gain(&clip);
        assert!((gain - SFX_TARGET_PEAK).abs() < EPS);
        assert!(gain.is_finite());
    }

    #[test]
    fn test_rendered_sfx_peak_equals_target() {
        let clip = mono_clip(vec![0.8, -0.4, 0.2], 4);
        let gain = sfx_normalize_gain(&clip);
        let out = render_composite(
            &[PlacedClip {
                clip,
                start_secs: 0.0,
                gain,
            }],
            4,
            1,
        );
        assert!((out.peak() - SFX_TARGET_PEAK).abs() < EPS);
    }

    #[test]
    fn test_music_attenuation_applied_exactly() {
        let clip = mono_clip(vec![1.0, 1.0, 1.0, 1.0], 4);
        let out = render_composite(
            &[PlacedClip {
                clip,
                start_secs: 0.0,
                gain: MUSIC_GAIN,
            }],
            4,
            1,
        );
        assert!((out.peak() - MUSIC_GAIN).abs() < EPS);
    }

    #[test]
    fn test_total_duration_covers_every_clip() {
        let dialogue = PlacedClip {
            clip: mono_clip(vec![0.5; 8], 4), // 2.0s
            start_secs: 0.0,
            gain: 1.0,
        };
        let late_sfx = PlacedClip {
            clip: mono_clip(vec![0.5; 4], 4), // 1.0s @ 3.0s → 结束于 4.0s
            start_secs: 3.0,
            gain: 1.0,
        };
        let latest_end = late_sfx.end_secs();
        let out = render_composite(&[dialogue, late_sfx], 4, 1);
        assert!(out.duration_secs() >= latest_end);
    }

    #[test]
    fn test_placement_offset() {
        let clip = mono_clip(vec![1.0], 4);
        let out = render_composite(
            &[PlacedClip {
                clip,
                start_secs: 1.0, // 帧 4
                gain: 1.0,
            }],
            4,
            1,
        );
        assert_eq!(out.samples.len(), 5);
        assert!((out.samples[4] - 1.0).abs() < EPS);
        assert!(out.samples[..4].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_overlapping_clips_sum() {
        let a = PlacedClip {
            clip: mono_clip(vec![0.3, 0.3], 4),
            start_secs: 0.0,
            gain: 1.0,
        };
        let b = PlacedClip {
            clip: mono_clip(vec![0.2, 0.2], 4),
            start_secs: 0.0,
            gain: 1.0,
        };
        let out = render_composite(&[a, b], 4, 1);
        assert!((out.samples[0] - 0.5).abs() < EPS);
    }

    #[test]
    fn test_silent_placeholder_contributes_nothing() {
        let placeholder = PlacedClip {
            clip: ClipBuffer::silent_placeholder(),
            start_secs: 0.0,
            gain: 1.0,
        };
        let out = render_composite(&[placeholder], 44_100, 1);
        assert!(out.samples.is_empty());
        assert_eq!(out.duration_secs(), 0.0);
    }

    #[test]
    fn test_resample_halves_frame_count() {
        let clip = mono_clip(vec![0.5; 100], 8);
        let out = render_composite(
            &[PlacedClip {
                clip,
                start_secs: 0.0,
                gain: 1.0,
            }],
            4,
            1,
        );
        // 100 帧 @8Hz ≈ 50 帧 @4Hz
        assert_eq!(out.samples.len(), 50);
    }

    #[test]
    fn test_stereo_clip_mixed_down_to_mono() {
        let stereo = ClipBuffer::new(vec![0.4, 0.2, 0.4, 0.2], 4, 2);
        let out = render_composite(
            &[PlacedClip {
                clip: stereo,
                start_secs: 0.0,
                gain: 1.0,
            }],
            4,
            1,
        );
        assert_eq!(out.samples.len(), 2);
        assert!((out.samples[0] - 0.3).abs() < EPS);
    }

    #[test]
    fn test_mono_clip_duplicated_to_stereo() {
        let mono = mono_clip(vec![0.4, 0.2], 4);
        let out = render_composite(
            &[PlacedClip {
                clip: mono,
                start_secs: 0.0,
                gain: 1.0,
            }],
            4,
            2,
        );
        assert_eq!(out.samples.len(), 4);
        assert!((out.samples[0] - 0.4).abs() < EPS);
        assert!((out.samples[1] - 0.4).abs() < EPS);
    }
}
