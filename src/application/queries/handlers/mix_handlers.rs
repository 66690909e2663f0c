//! Mix Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{MixStorePort, RenderedMix};
use crate::application::queries::GetMixAudioQuery;

/// 可下载的混音音频
#[derive(Debug, Clone)]
pub struct MixAudio {
    pub mix: Arc<RenderedMix>,
    pub content_type: &'static str,
}

/// GetMixAudio Handler
pub struct GetMixAudioHandler {
    mix_store: Arc<dyn MixStorePort>,
}

impl GetMixAudioHandler {
    pub fn new(mix_store: Arc<dyn MixStorePort>) -> Self {
        Self { mix_store }
    }

    pub async fn handle(&self, query: GetMixAudioQuery) -> Result<MixAudio, ApplicationError> {
        let mix = self
            .mix_store
            .get(query.mix_id)
            .ok_or_else(|| ApplicationError::not_found("Mix", query.mix_id))?;

        Ok(MixAudio {
            mix,
            content_type: "audio/wav",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryMixStore;
    use chrono::Utc;
    use uuid::Uuid;

    fn mix(session_key: &str) -> RenderedMix {
        RenderedMix {
            id: Uuid::new_v4(),
            session_key: session_key.to_string(),
            wav_data: vec![0u8; 44],
            duration_secs: 0.0,
            scene_start_times: vec![0.0],
            line_start_times: vec![],
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_get_mix_audio() {
        let store = Arc::new(InMemoryMixStore::new());
        let m = mix("s");
        let id = m.id;
        store.publish(m);

        let handler = GetMixAudioHandler::new(store);
        let audio = handler.handle(GetMixAudioQuery { mix_id: id }).await.unwrap();
        assert_eq!(audio.content_type, "audio/wav");
        assert_eq!(audio.mix.wav_data.len(), 44);
    }

    #[tokio::test]
    async fn test_get_missing_mix_not_found() {
        let store = Arc::new(InMemoryMixStore::new());
        let handler = GetMixAudioHandler::new(store);
        let result = handler
            .handle(GetMixAudioQuery {
                mix_id: Uuid::new_v4(),
            })
            .await;
        assert!(matches!(result, Err(ApplicationError::NotFound { .. })));
    }
}
