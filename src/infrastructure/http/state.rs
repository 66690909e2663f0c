//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    GenerateConfig, GenerateStoryboardHandler, ReleaseMixHandler, RenderMixHandler,
    // Query handlers
    GetMixAudioHandler, ListVoicesHandler,
    // Ports
    AudioCodecPort, ImageGenPort, MixStorePort, ScriptParserPort, SoundGenPort, SpeechCachePort,
    SpeechEnginePort,
};
use crate::domain::voice::VoicePool;

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub script_parser: Arc<dyn ScriptParserPort>,
    pub speech_engine: Arc<dyn SpeechEnginePort>,
    pub sound_gen: Arc<dyn SoundGenPort>,
    pub image_gen: Arc<dyn ImageGenPort>,
    pub speech_cache: Arc<dyn SpeechCachePort>,
    pub codec: Arc<dyn AudioCodecPort>,
    pub mix_store: Arc<dyn MixStorePort>,

    /// 对外公开的基础 URL（拼接混音音频下载地址）
    pub public_base_url: String,

    // ========== Command Handlers ==========
    pub generate_storyboard_handler: GenerateStoryboardHandler,
    pub render_mix_handler: RenderMixHandler,
    pub release_mix_handler: ReleaseMixHandler,

    // ========== Query Handlers ==========
    pub get_mix_audio_handler: GetMixAudioHandler,
    pub list_voices_handler: ListVoicesHandler,
}

impl AppState {
    /// 创建应用状态
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        script_parser: Arc<dyn ScriptParserPort>,
        speech_engine: Arc<dyn SpeechEnginePort>,
        sound_gen: Arc<dyn SoundGenPort>,
        image_gen: Arc<dyn ImageGenPort>,
        speech_cache: Arc<dyn SpeechCachePort>,
        codec: Arc<dyn AudioCodecPort>,
        mix_store: Arc<dyn MixStorePort>,
        voice_pool: VoicePool,
        generate_config: GenerateConfig,
        public_base_url: String,
    ) -> Self {
        Self {
            // Ports
            script_parser: script_parser.clone(),
            speech_engine: speech_engine.clone(),
            sound_gen: sound_gen.clone(),
            image_gen: image_gen.clone(),
            speech_cache: speech_cache.clone(),
            codec: codec.clone(),
            mix_store: mix_store.clone(),

            public_base_url,

            // Command handlers
            generate_storyboard_handler: GenerateStoryboardHandler::new(
                script_parser,
                speech_engine,
                sound_gen,
                image_gen,
                speech_cache,
                voice_pool.clone(),
                generate_config,
            ),
            render_mix_handler: RenderMixHandler::new(codec, mix_store.clone()),
            release_mix_handler: ReleaseMixHandler::new(mix_store.clone()),

            // Query handlers
            get_mix_audio_handler: GetMixAudioHandler::new(mix_store),
            list_voices_handler: ListVoicesHandler::new(voice_pool),
        }
    }
}
