//! Mix Command Handlers - 混音引擎入口
//!
//! 解码 → 时间轴排布 → 响度归一化 → 离线渲染 → WAV 封装 → 发布。
//! 错误策略"降级不失败"：台词解码失败替换为静音占位（保持槽位对齐），
//! 音效/音乐解码失败直接从混音中剔除；本层不向用户传播解码错误。

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{ReleaseMix, RenderMix};
use crate::application::error::ApplicationError;
use crate::application::ports::{AudioCodecPort, MixStorePort, RenderedMix};
use crate::domain::mixdown::{
    render_composite, sfx_normalize_gain, ClipBuffer, PlacedClip, DEFAULT_CHANNELS,
    DEFAULT_SAMPLE_RATE, MUSIC_GAIN,
};
use crate::domain::timeline::place_lines;

/// 渲染结果
#[derive(Debug, Clone)]
pub struct RenderMixResponse {
    /// 新发布的混音 ID
    pub mix_id: Uuid,
    /// 同会话被撤销的上一份混音 ID
    pub revoked_mix_id: Option<Uuid>,
    /// 混音总时长（秒）
    pub duration_secs: f64,
    /// 逐场景起始时间
    pub scene_start_times: Vec<f64>,
    /// 逐行起始时间
    pub line_start_times: Vec<f64>,
}

/// RenderMix Handler
pub struct RenderMixHandler {
    codec: Arc<dyn AudioCodecPort>,
    mix_store: Arc<dyn MixStorePort>,
}

impl RenderMixHandler {
    pub fn new(codec: Arc<dyn AudioCodecPort>, mix_store: Arc<dyn MixStorePort>) -> Self {
        Self { codec, mix_store }
    }

    pub async fn handle(&self, command: RenderMix) -> Result<RenderMixResponse, ApplicationError> {
        let bundle = command.bundle;
        bundle
            .validate()
            .map_err(ApplicationError::ValidationError)?;

        // 1. 逐条解码台词（顺序 await）；失败替换为静音占位保持对齐
        let mut dialogue_clips = Vec::with_capacity(bundle.lines_audio.len());
        for (i, audio_base64) in bundle.lines_audio.iter().enumerate() {
            let clip = if audio_base64.is_empty() {
                ClipBuffer::silent_placeholder()
            } else {
                match self.codec.decode_base64(audio_base64).await {
                    Ok(clip) => clip,
                    Err(e) => {
                        tracing::warn!(
                            line = i,
                            error = %e,
                            "Dialogue clip decode failed, substituting silence"
                        );
                        ClipBuffer::silent_placeholder()
                    }
                }
            };
            dialogue_clips.push(clip);
        }

        // 2. 渲染格式取第一条解码成功的台词；没有则 44.1kHz 单声道
        let (sample_rate, channels) = dialogue_clips
            .iter()
            .find(|c| c.frames() > 0)
            .map(|c| (c.sample_rate, c.channels))
            .unwrap_or((DEFAULT_SAMPLE_RATE, DEFAULT_CHANNELS));

        // 3. 台词时间轴排布
        let line_durations: Vec<(usize, f64)> = bundle
            .dialogue_lines
            .iter()
            .zip(&dialogue_clips)
            .map(|(line, clip)| (line.scene_index, clip.duration_secs()))
            .collect();
        let placement = place_lines(bundle.scenes.len(), &line_durations);

        // 4. 场景锚定时间：请求提供的权威值优先于推导值
        let scene_anchors: Vec<f64> = bundle
            .scene_start_times
            .clone()
            .unwrap_or_else(|| placement.scene_starts.clone());

        let mut placed: Vec<PlacedClip> = placement
            .lines
            .iter()
            .zip(dialogue_clips)
            .map(|(line, clip)| PlacedClip {
                clip,
                start_secs: line.start_secs,
                gain: 1.0,
            })
            .collect();

        // 5. 音效：峰值归一到 0.6，场景锚定优先于字面偏移
        for cue in &bundle.sfx_list {
            let Some(audio_base64) = &cue.audio_base64 else {
                continue;
            };
            match self.codec.decode_base64(audio_base64).await {
                Ok(clip) => {
                    let gain = sfx_normalize_gain(&clip);
                    let start_secs = anchor_time(&scene_anchors, cue.scene_index, cue.start_time);
                    placed.push(PlacedClip {
                        clip,
                        start_secs,
                        gain,
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        scene = cue.scene_index,
                        prompt = %cue.prompt,
                        error = %e,
                        "SFX clip decode failed, omitted from mix"
                    );
                }
            }
        }

        // 6. 音乐：固定 0.18 增益
        for cue in &bundle.music_list {
            let Some(audio_base64) = &cue.audio_base64 else {
                continue;
            };
            match self.codec.decode_base64(audio_base64).await {
                Ok(clip) => {
                    let start_secs = anchor_time(&scene_anchors, cue.scene_index, cue.start_time);
                    placed.push(PlacedClip {
                        clip,
                        start_secs,
                        gain: MUSIC_GAIN,
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        scene = cue.scene_index,
                        prompt = %cue.prompt,
                        error = %e,
                        "Music clip decode failed, omitted from mix"
                    );
                }
            }
        }

        // 7. 离线渲染到完成 + WAV 封装
        let composite = render_composite(&placed, sample_rate, channels);
        let duration_secs = composite.duration_secs();
        let wav_data = self
            .codec
            .encode_wav(&composite)
            .map_err(|e| ApplicationError::internal(e.to_string()))?;

        // 8. 发布；同会话旧混音先撤销
        let mix = RenderedMix {
            id: Uuid::new_v4(),
            session_key: command.session_key.clone(),
            wav_data,
            duration_secs,
            scene_start_times: scene_anchors.clone(),
            line_start_times: placement.line_starts(),
            created_at: Utc::now(),
        };
        let mix_id = mix.id;
        let revoked_mix_id = self.mix_store.publish(mix);

        tracing::info!(
            mix_id = %mix_id,
            session_key = %command.session_key,
            duration_secs = duration_secs,
            clips = placed.len(),
            sample_rate = sample_rate,
            channels = channels,
            revoked = ?revoked_mix_id,
            "Mix rendered"
        );

        Ok(RenderMixResponse {
            mix_id,
            revoked_mix_id,
            duration_secs,
            scene_start_times: scene_anchors,
            line_start_times: placement.line_starts(),
        })
    }
}

/// 场景锚定时间；场景序号越界时退回字面偏移
fn anchor_time(scene_anchors: &[f64], scene_index: usize, fallback: f64) -> f64 {
    scene_anchors.get(scene_index).copied().unwrap_or(fallback)
}

/// ReleaseMix Handler
pub struct ReleaseMixHandler {
    mix_store: Arc<dyn MixStorePort>,
}

impl ReleaseMixHandler {
    pub fn new(mix_store: Arc<dyn MixStorePort>) -> Self {
        Self { mix_store }
    }

    pub async fn handle(&self, command: ReleaseMix) -> Result<(), ApplicationError> {
        if self.mix_store.release(command.mix_id) {
            tracing::info!(mix_id = %command.mix_id, "Mix released");
            Ok(())
        } else {
            Err(ApplicationError::not_found("Mix", command.mix_id))
        }
    }
}
