//! Resonance - 剧本转多音色有声混音系统
//!
//! 架构:
//! - Domain: script/, voice/, timeline, mixdown
//! - Application: commands, queries, ports
//! - Infrastructure: http, memory, adapters

use std::sync::Arc;

use resonance::application::GenerateConfig;
use resonance::config::{load_config, print_config};
use resonance::domain::voice::VoicePool;
use resonance::infrastructure::adapters::{
    HttpImageClient, HttpImageClientConfig, HttpSoundClient, HttpSoundClientConfig,
    HttpSpeechClient, HttpSpeechClientConfig, LlmScriptParser, LlmScriptParserConfig,
    SymphoniaCodec,
};
// use resonance::infrastructure::adapters::FakeSpeechClient;
use resonance::infrastructure::http::{AppState, HttpServer, HttpServerConfig};
use resonance::infrastructure::memory::{InMemoryMixStore, InMemorySpeechCache};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},resonance={},tower_http=debug",
        config.log.level, config.log.level
    );
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));
    if config.log.json {
        tracing_subscriber::fmt().with_env_filter(env_filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    tracing::info!("Resonance - 剧本转多音色有声混音系统");
    print_config(&config);

    // LLM 剧本解析器
    let script_parser = Arc::new(LlmScriptParser::new(LlmScriptParserConfig {
        base_url: config.llm.url.clone(),
        model: config.llm.model.clone(),
        api_key: config.llm.api_key.clone(),
        timeout_secs: config.llm.timeout_secs,
    })?);

    // HTTP TTS 引擎
    let speech_engine = Arc::new(HttpSpeechClient::new(HttpSpeechClientConfig {
        base_url: config.tts.url.clone(),
        timeout_secs: config.tts.timeout_secs,
        max_retries: config.tts.max_retries,
    })?);

    // // 离线开发用的本地 TTS（确定性正弦波，无外部依赖）
    // let speech_engine = Arc::new(FakeSpeechClient::with_defaults());

    // 音效/音乐生成
    let sound_gen = Arc::new(HttpSoundClient::new(
        HttpSoundClientConfig::new(config.sound.url.clone())
            .with_timeout(config.sound.timeout_secs),
    )?);

    // 故事板图片生成
    let image_gen = Arc::new(HttpImageClient::new(
        HttpImageClientConfig::new(config.image.url.clone())
            .with_timeout(config.image.timeout_secs),
    )?);

    // 编解码器与内存存储
    let codec = Arc::new(SymphoniaCodec::new());
    let mix_store = Arc::new(InMemoryMixStore::new());
    let speech_cache = Arc::new(InMemorySpeechCache::new());

    let generate_config = GenerateConfig {
        max_lines: config.mix.max_lines,
        sfx_enabled: config.sound.sfx_enabled,
        music_enabled: config.sound.music_enabled,
        images_enabled: config.image.enabled,
    };

    let state = AppState::new(
        script_parser,
        speech_engine,
        sound_gen,
        image_gen,
        speech_cache,
        codec,
        mix_store,
        VoicePool::default(),
        generate_config,
        config.server.public_base_url(),
    );

    // HTTP 服务器
    let mut server_config = HttpServerConfig::new(&config.server.host, config.server.port)
        .with_max_body_size(config.mix.max_body_size);
    if config.server.static_files.enabled {
        server_config = server_config.with_static_files(
            config.server.static_files.dir.clone(),
            config.server.static_files.path.clone(),
        );
    }

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
