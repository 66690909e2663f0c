//! Symphonia Codec - 基于 symphonia 的音频编解码器
//!
//! 负责两件事：
//! - 把外部服务返回的 base64 音频片段（WAV 或 MP3）解码为交织 f32 样本
//! - 把混音结果编码为标准 16-bit PCM WAV 容器

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::io::Cursor;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::{AudioCodecPort, CodecError};
use crate::domain::mixdown::ClipBuffer;

/// Symphonia 编解码器
///
/// 解码时不依赖文件扩展名，由 symphonia 的 probe 探测容器格式。
pub struct SymphoniaCodec;

impl SymphoniaCodec {
    pub fn new() -> Self {
        Self
    }

    /// 解码音频字节流为交织 f32 样本
    fn decode_bytes(&self, data: Vec<u8>) -> Result<ClipBuffer, CodecError> {
        let cursor = Cursor::new(data);
        let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

        // 片段来源混杂（TTS 返回 WAV，音效服务可能返回 MP3），
        // 不给扩展名提示，让 probe 自行探测。
        let hint = Hint::new();
        let format_opts = FormatOptions::default();
        let metadata_opts = MetadataOptions::default();

        let probed = symphonia::default::get_probe()
            .format(&hint, mss, &format_opts, &metadata_opts)
            .map_err(|e| CodecError::DecodingError(format!("Probe failed: {}", e)))?;

        let mut format = probed.format;

        let track = format
            .default_track()
            .ok_or_else(|| CodecError::DecodingError("No audio track found".to_string()))?;

        let sample_rate = track
            .codec_params
            .sample_rate
            .ok_or_else(|| CodecError::DecodingError("Unknown sample rate".to_string()))?;

        let channels = track
            .codec_params
            .channels
            .map(|c| c.count() as u8)
            .ok_or_else(|| CodecError::DecodingError("Unknown channel count".to_string()))?;

        let decoder_opts = DecoderOptions::default();
        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &decoder_opts)
            .map_err(|e| CodecError::DecodingError(format!("Decoder creation failed: {}", e)))?;

        let mut samples: Vec<f32> = Vec::new();
        let track_id = track.id;

        loop {
            let packet = match format.next_packet() {
                Ok(p) => p,
                Err(symphonia::core::errors::Error::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(e) => {
                    return Err(CodecError::DecodingError(format!(
                        "Packet read error: {}",
                        e
                    )));
                }
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(d) => d,
                Err(e) => {
                    tracing::warn!("Decode error (skipping packet): {}", e);
                    continue;
                }
            };

            let spec = *decoded.spec();
            let num_frames = decoded.frames();
            let mut sample_buf = SampleBuffer::<f32>::new(num_frames as u64, spec);
            sample_buf.copy_interleaved_ref(decoded);
            // 只取实际解出的样本，不含缓冲区尾部的未写区域
            let actual_samples = num_frames * spec.channels.count();
            samples.extend(&sample_buf.samples()[..actual_samples]);
        }

        Ok(ClipBuffer {
            samples,
            sample_rate,
            channels,
        })
    }
}

impl Default for SymphoniaCodec {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioCodecPort for SymphoniaCodec {
    async fn decode_base64(&self, audio_base64: &str) -> Result<ClipBuffer, CodecError> {
        let bytes = BASE64
            .decode(audio_base64.trim())
            .map_err(|e| CodecError::InvalidBase64(e.to_string()))?;

        if bytes.is_empty() {
            return Err(CodecError::DecodingError("Empty audio payload".to_string()));
        }

        self.decode_bytes(bytes)
    }

    fn encode_wav(&self, clip: &ClipBuffer) -> Result<Vec<u8>, CodecError> {
        if clip.sample_rate == 0 || clip.channels == 0 {
            return Err(CodecError::EncodingError(
                "Invalid clip format: zero sample rate or channel count".to_string(),
            ));
        }

        let bits_per_sample: u16 = 16;
        let num_channels = clip.channels as u16;
        let sample_rate = clip.sample_rate;
        let byte_rate = sample_rate * num_channels as u32 * (bits_per_sample / 8) as u32;
        let block_align = num_channels * (bits_per_sample / 8);

        // f32 [-1, 1] → i16
        let pcm_data: Vec<i16> = clip
            .samples
            .iter()
            .map(|&s| {
                let clamped = s.clamp(-1.0, 1.0);
                (clamped * 32767.0) as i16
            })
            .collect();

        let data_size = pcm_data.len() * 2;
        let file_size = 36 + data_size;

        let mut wav = Vec::with_capacity(44 + data_size);

        // RIFF header
        wav.extend_from_slice(b"RIFF");
        wav.extend_from_slice(&(file_size as u32).to_le_bytes());
        wav.extend_from_slice(b"WAVE");

        // fmt chunk
        wav.extend_from_slice(b"fmt ");
        wav.extend_from_slice(&16u32.to_le_bytes());
        wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
        wav.extend_from_slice(&num_channels.to_le_bytes());
        wav.extend_from_slice(&sample_rate.to_le_bytes());
        wav.extend_from_slice(&byte_rate.to_le_bytes());
        wav.extend_from_slice(&block_align.to_le_bytes());
        wav.extend_from_slice(&bits_per_sample.to_le_bytes());

        // data chunk
        wav.extend_from_slice(b"data");
        wav.extend_from_slice(&(data_size as u32).to_le_bytes());

        for sample in pcm_data {
            wav.extend_from_slice(&sample.to_le_bytes());
        }

        Ok(wav)
    }
}
