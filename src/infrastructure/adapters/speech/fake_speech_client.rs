//! Fake Speech Client - 用于测试和离线开发的 TTS 客户端
//!
//! 不调用外部服务，在内存中合成确定性的正弦波 WAV：
//! 时长按文本长度估算，频率由音色 ID 哈希决定，便于人耳区分不同角色。

use async_trait::async_trait;
use std::f32::consts::TAU;

use crate::application::ports::{SpeechEnginePort, SpeechError, SpeechRequest, SpeechResponse};

/// Fake Speech Client 配置
#[derive(Debug, Clone)]
pub struct FakeSpeechClientConfig {
    /// 生成音频的采样率
    pub sample_rate: u32,
    /// 每个字符对应的时长（毫秒），用于从文本长度估算台词时长
    pub ms_per_char: u64,
    /// 单条台词的时长下限（毫秒）
    pub min_duration_ms: u64,
    /// 单条台词的时长上限（毫秒）
    pub max_duration_ms: u64,
}

impl Default for FakeSpeechClientConfig {
    fn default() -> Self {
        Self {
            sample_rate: 22_050,
            ms_per_char: 60,
            min_duration_ms: 400,
            max_duration_ms: 8_000,
        }
    }
}

/// Fake Speech Client
///
/// 同一 (text, voice_id) 输入总是产生完全相同的字节，方便缓存测试。
pub struct FakeSpeechClient {
    config: FakeSpeechClientConfig,
}

impl FakeSpeechClient {
    pub fn new(config: FakeSpeechClientConfig) -> Self {
        tracing::info!(
            sample_rate = config.sample_rate,
            ms_per_char = config.ms_per_char,
            "FakeSpeechClient initialized"
        );
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(FakeSpeechClientConfig::default())
    }

    /// 音色 ID → 基频（200Hz 到 520Hz 之间）
    fn tone_for_voice(voice_id: &str) -> f32 {
        let hash: u32 = voice_id
            .bytes()
            .fold(2166136261u32, |h, b| (h ^ b as u32).wrapping_mul(16777619));
        200.0 + (hash % 320) as f32
    }

    fn duration_ms_for_text(&self, text: &str) -> u64 {
        let estimated = text.chars().count() as u64 * self.config.ms_per_char;
        estimated.clamp(self.config.min_duration_ms, self.config.max_duration_ms)
    }

    /// 生成带淡入淡出的正弦波 16-bit PCM WAV
    fn render_wav(&self, duration_ms: u64, freq: f32) -> Vec<u8> {
        let sample_rate = self.config.sample_rate;
        let num_samples = (sample_rate as u64 * duration_ms / 1000) as usize;
        let fade_samples = (sample_rate / 100).max(1) as usize; // 10ms 淡入淡出

        let data_size = num_samples * 2;
        let file_size = 36 + data_size;

        let mut wav = Vec::with_capacity(44 + data_size);
        wav.extend_from_slice(b"RIFF");
        wav.extend_from_slice(&(file_size as u32).to_le_bytes());
        wav.extend_from_slice(b"WAVE");
        wav.extend_from_slice(b"fmt ");
        wav.extend_from_slice(&16u32.to_le_bytes());
        wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
        wav.extend_from_slice(&1u16.to_le_bytes()); // mono
        wav.extend_from_slice(&sample_rate.to_le_bytes());
        wav.extend_from_slice(&(sample_rate * 2).to_le_bytes());
        wav.extend_from_slice(&2u16.to_le_bytes());
        wav.extend_from_slice(&16u16.to_le_bytes());
        wav.extend_from_slice(b"data");
        wav.extend_from_slice(&(data_size as u32).to_le_bytes());

        for i in 0..num_samples {
            let t = i as f32 / sample_rate as f32;
            let mut amp = 0.4 * (TAU * freq * t).sin();
            if i < fade_samples {
                amp *= i as f32 / fade_samples as f32;
            }
            if num_samples - i <= fade_samples {
                amp *= (num_samples - i) as f32 / fade_samples as f32;
            }
            let sample = (amp * 32767.0) as i16;
            wav.extend_from_slice(&sample.to_le_bytes());
        }

        wav
    }
}

#[async_trait]
impl SpeechEnginePort for FakeSpeechClient {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechResponse, SpeechError> {
        let duration_ms = self.duration_ms_for_text(&request.text);
        let freq = Self::tone_for_voice(&request.voice_id);

        tracing::debug!(
            text_len = request.text.len(),
            voice_id = %request.voice_id,
            duration_ms = duration_ms,
            freq = freq,
            "FakeSpeechClient: rendering tone"
        );

        Ok(SpeechResponse {
            audio_data: self.render_wav(duration_ms, freq),
            duration_ms: Some(duration_ms),
            sample_rate: Some(self.config.sample_rate),
        })
    }

    async fn health_check(&self) -> bool {
        true
    }
}
