//! Storyboard Command Handlers
//!
//! 生成管线：解析 → 音色分配 → 逐行 TTS → 音效/音乐生成 → 故事板图片。
//! 单条台词合成失败降级为空音频（保持槽位对齐），提示生成失败直接丢弃；
//! 只有剧本解析失败会向上传播。

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::collections::HashMap;
use std::sync::Arc;

use crate::application::bundle::StoryboardBundle;
use crate::application::commands::GenerateStoryboard;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    generate_speech_cache_key, ImageGenPort, ImageRequest, ScriptParserPort, SoundGenPort,
    SoundKind, SoundRequest, SpeechCachePort, SpeechEnginePort, SpeechRequest,
};
use crate::domain::script::{MusicCue, SceneImage, SfxCue};
use crate::domain::voice::{assign_voices, VoicePool};

/// 生成管线配置
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// 单次请求允许的最大台词数
    pub max_lines: usize,
    /// 是否生成音效
    pub sfx_enabled: bool,
    /// 是否生成氛围音乐
    pub music_enabled: bool,
    /// 图片生成默认开关
    pub images_enabled: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            max_lines: 500,
            sfx_enabled: true,
            music_enabled: true,
            images_enabled: false,
        }
    }
}

/// GenerateStoryboard Handler
pub struct GenerateStoryboardHandler {
    script_parser: Arc<dyn ScriptParserPort>,
    speech_engine: Arc<dyn SpeechEnginePort>,
    sound_gen: Arc<dyn SoundGenPort>,
    image_gen: Arc<dyn ImageGenPort>,
    speech_cache: Arc<dyn SpeechCachePort>,
    voice_pool: VoicePool,
    config: GenerateConfig,
}

impl GenerateStoryboardHandler {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        script_parser: Arc<dyn ScriptParserPort>,
        speech_engine: Arc<dyn SpeechEnginePort>,
        sound_gen: Arc<dyn SoundGenPort>,
        image_gen: Arc<dyn ImageGenPort>,
        speech_cache: Arc<dyn SpeechCachePort>,
        voice_pool: VoicePool,
        config: GenerateConfig,
    ) -> Self {
        Self {
            script_parser,
            speech_engine,
            sound_gen,
            image_gen,
            speech_cache,
            voice_pool,
            config,
        }
    }

    pub async fn handle(
        &self,
        command: GenerateStoryboard,
    ) -> Result<StoryboardBundle, ApplicationError> {
        let text = command.script_text.trim();
        if text.is_empty() {
            return Err(ApplicationError::validation("Script text is empty"));
        }

        // 1. LLM 解析剧本
        let storyboard = self.script_parser.parse(text).await?;
        if storyboard.lines().len() > self.config.max_lines {
            return Err(ApplicationError::validation(format!(
                "Script has {} lines, limit is {}",
                storyboard.lines().len(),
                self.config.max_lines
            )));
        }

        // 2. 按首次出现顺序分配音色
        let assignment = assign_voices(&self.voice_pool, storyboard.speakers_in_order());

        tracing::info!(
            scenes = storyboard.scenes().len(),
            lines = storyboard.lines().len(),
            speakers = assignment.entries().len(),
            "Script parsed"
        );

        let (scenes, lines, sfx_cues, music_cues) = storyboard.into_parts();

        // 3. 逐行合成台词（顺序 await；失败降级为空音频保持对齐）
        let mut lines_audio = Vec::with_capacity(lines.len());
        for line in &lines {
            let voice = assignment.voice_for(&line.character);
            lines_audio.push(self.synthesize_line_audio(line, &voice.voice_id).await);
        }

        // 4. 音效与音乐：失败的提示直接丢弃
        let sfx_list = if self.config.sfx_enabled {
            self.fill_sfx(sfx_cues).await
        } else {
            Vec::new()
        };
        let music_list = if self.config.music_enabled {
            self.fill_music(music_cues).await
        } else {
            Vec::new()
        };

        // 5. 故事板图片（可选）
        let include_images = command.include_images.unwrap_or(self.config.images_enabled);
        let images = if include_images {
            self.generate_images(&scenes).await
        } else {
            Vec::new()
        };

        let voices: HashMap<_, _> = assignment
            .entries()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let bundle = StoryboardBundle {
            scenes,
            dialogue_lines: lines,
            lines_audio,
            sfx_list,
            music_list,
            scene_start_times: None,
            voices,
            images,
        };

        tracing::info!(
            lines = bundle.dialogue_lines.len(),
            sfx = bundle.sfx_list.len(),
            music = bundle.music_list.len(),
            images = bundle.images.len(),
            "Storyboard generated"
        );

        Ok(bundle)
    }

    /// 合成单条台词，返回 base64；失败返回空字符串
    async fn synthesize_line_audio(
        &self,
        line: &crate::domain::script::DialogueLine,
        voice_id: &str,
    ) -> String {
        let cache_key = generate_speech_cache_key(voice_id, &line.text);
        if let Some(cached) = self.speech_cache.get(&cache_key) {
            tracing::debug!(
                scene = line.scene_index,
                line = line.line_index,
                "Speech cache hit"
            );
            return BASE64.encode(cached.as_slice());
        }

        let request = SpeechRequest {
            text: line.text.clone(),
            voice_id: voice_id.to_string(),
            style_hint: line.parenthetical.clone(),
        };

        match self.speech_engine.synthesize(request).await {
            Ok(response) => {
                let encoded = BASE64.encode(&response.audio_data);
                self.speech_cache.put(cache_key, response.audio_data);
                encoded
            }
            Err(e) => {
                tracing::warn!(
                    scene = line.scene_index,
                    line = line.line_index,
                    character = %line.character,
                    error = %e,
                    "TTS failed, line degrades to silence"
                );
                String::new()
            }
        }
    }

    async fn fill_sfx(&self, cues: Vec<SfxCue>) -> Vec<SfxCue> {
        let mut filled = Vec::with_capacity(cues.len());
        for mut cue in cues {
            let request = SoundRequest {
                prompt: cue.prompt.clone(),
                kind: SoundKind::Effect,
            };
            match self.sound_gen.generate(request).await {
                Ok(response) => {
                    cue.audio_base64 = Some(BASE64.encode(&response.audio_data));
                    filled.push(cue);
                }
                Err(e) => {
                    tracing::warn!(
                        scene = cue.scene_index,
                        prompt = %cue.prompt,
                        error = %e,
                        "SFX generation failed, cue dropped"
                    );
                }
            }
        }
        filled
    }

    async fn fill_music(&self, cues: Vec<MusicCue>) -> Vec<MusicCue> {
        let mut filled = Vec::with_capacity(cues.len());
        for mut cue in cues {
            let request = SoundRequest {
                prompt: cue.prompt.clone(),
                kind: SoundKind::Ambient,
            };
            match self.sound_gen.generate(request).await {
                Ok(response) => {
                    cue.audio_base64 = Some(BASE64.encode(&response.audio_data));
                    filled.push(cue);
                }
                Err(e) => {
                    tracing::warn!(
                        scene = cue.scene_index,
                        prompt = %cue.prompt,
                        error = %e,
                        "Music generation failed, cue dropped"
                    );
                }
            }
        }
        filled
    }

    async fn generate_images(&self, scenes: &[crate::domain::script::Scene]) -> Vec<SceneImage> {
        let mut images = Vec::with_capacity(scenes.len());
        for scene in scenes {
            let prompt = if scene.action.is_empty() {
                scene.heading.clone()
            } else {
                format!("{} — {}", scene.heading, scene.action)
            };
            match self
                .image_gen
                .generate(ImageRequest {
                    prompt: prompt.clone(),
                })
                .await
            {
                Ok(response) => images.push(SceneImage {
                    scene_index: scene.index,
                    prompt,
                    url: response.url,
                }),
                Err(e) => {
                    tracing::warn!(
                        scene = scene.index,
                        error = %e,
                        "Storyboard image generation failed, frame skipped"
                    );
                }
            }
        }
        images
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        ImageGenError, ImageResponse, ParseError, SoundGenError, SoundResponse, SpeechError,
        SpeechResponse,
    };
    use crate::domain::script::{DialogueLine, Scene, Storyboard};
    use crate::infrastructure::memory::InMemorySpeechCache;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedParser;

    #[async_trait]
    impl ScriptParserPort for FixedParser {
        async fn parse(&self, _text: &str) -> Result<Storyboard, ParseError> {
            Storyboard::new(
                vec![Scene {
                    index: 0,
                    heading: "INT. ROOM".to_string(),
                    action: "A quiet room".to_string(),
                }],
                vec![
                    DialogueLine {
                        scene_index: 0,
                        line_index: 0,
                        character: "NARRATOR".to_string(),
                        text: "Once upon a time".to_string(),
                        parenthetical: None,
                    },
                    DialogueLine {
                        scene_index: 0,
                        line_index: 1,
                        character: "ALICE".to_string(),
                        text: "Hello".to_string(),
                        parenthetical: None,
                    },
                ],
                vec![SfxCue {
                    scene_index: 0,
                    prompt: "door creak".to_string(),
                    start_time: 0.0,
                    audio_base64: None,
                }],
                vec![],
            )
            .map_err(|e| ParseError::InvalidScript(e.to_string()))
        }
    }

    struct CountingSpeech {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl SpeechEnginePort for CountingSpeech {
        async fn synthesize(&self, _req: SpeechRequest) -> Result<SpeechResponse, SpeechError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(SpeechError::ServiceError("down".to_string()));
            }
            Ok(SpeechResponse {
                audio_data: vec![1, 2, 3],
                duration_ms: Some(500),
                sample_rate: Some(22050),
            })
        }
    }

    struct FixedSound;

    #[async_trait]
    impl SoundGenPort for FixedSound {
        async fn generate(&self, _req: SoundRequest) -> Result<SoundResponse, SoundGenError> {
            Ok(SoundResponse {
                audio_data: vec![9, 9],
                duration_ms: None,
            })
        }
    }

    struct NoImages;

    #[async_trait]
    impl ImageGenPort for NoImages {
        async fn generate(&self, _req: ImageRequest) -> Result<ImageResponse, ImageGenError> {
            Err(ImageGenError::ServiceError("disabled".to_string()))
        }
    }

    fn handler(fail_tts: bool) -> GenerateStoryboardHandler {
        GenerateStoryboardHandler::new(
            Arc::new(FixedParser),
            Arc::new(CountingSpeech {
                calls: AtomicUsize::new(0),
                fail: fail_tts,
            }),
            Arc::new(FixedSound),
            Arc::new(NoImages),
            Arc::new(InMemorySpeechCache::new()),
            VoicePool::default(),
            GenerateConfig::default(),
        )
    }

    fn command() -> GenerateStoryboard {
        GenerateStoryboard {
            script_text: "some script".to_string(),
            include_images: Some(false),
        }
    }

    #[tokio::test]
    async fn test_generate_produces_aligned_bundle() {
        let bundle = handler(false).handle(command()).await.unwrap();
        assert_eq!(bundle.dialogue_lines.len(), 2);
        assert_eq!(bundle.lines_audio.len(), 2);
        assert!(bundle.lines_audio.iter().all(|a| !a.is_empty()));
        assert_eq!(bundle.sfx_list.len(), 1);
        assert!(bundle.sfx_list[0].audio_base64.is_some());
        // NARRATOR + ALICE
        assert_eq!(bundle.voices.len(), 2);
        assert!(bundle.validate().is_ok());
    }

    #[tokio::test]
    async fn test_tts_failure_degrades_to_empty_audio() {
        let bundle = handler(true).handle(command()).await.unwrap();
        // 槽位对齐保持，音频为空
        assert_eq!(bundle.lines_audio.len(), 2);
        assert!(bundle.lines_audio.iter().all(|a| a.is_empty()));
    }

    #[tokio::test]
    async fn test_empty_script_rejected() {
        let result = handler(false)
            .handle(GenerateStoryboard {
                script_text: "   ".to_string(),
                include_images: None,
            })
            .await;
        assert!(matches!(
            result,
            Err(ApplicationError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_speech_cache_hit_skips_synthesis() {
        let speech = Arc::new(CountingSpeech {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let cache = Arc::new(InMemorySpeechCache::new());
        let handler = GenerateStoryboardHandler::new(
            Arc::new(FixedParser),
            speech.clone(),
            Arc::new(FixedSound),
            Arc::new(NoImages),
            cache,
            VoicePool::default(),
            GenerateConfig::default(),
        );

        handler.handle(command()).await.unwrap();
        let first_run = speech.calls.load(Ordering::SeqCst);
        handler.handle(command()).await.unwrap();
        // 第二轮全部命中缓存
        assert_eq!(speech.calls.load(Ordering::SeqCst), first_run);
    }
}
