//! In-Memory Mix Store
//!
//! 可撤销混音引用的内存实现。不变量：一个会话 key 同一时刻至多
//! 持有一份混音——发布新混音时旧混音先被移除，绝不同时存活两份。

use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::{MixStorePort, RenderedMix};

/// 内存混音存储
pub struct InMemoryMixStore {
    mixes: DashMap<Uuid, Arc<RenderedMix>>,
    by_session: DashMap<String, Uuid>,
}

impl InMemoryMixStore {
    pub fn new() -> Self {
        Self {
            mixes: DashMap::new(),
            by_session: DashMap::new(),
        }
    }
}

impl Default for InMemoryMixStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MixStorePort for InMemoryMixStore {
    fn publish(&self, mix: RenderedMix) -> Option<Uuid> {
        let id = mix.id;
        let session_key = mix.session_key.clone();

        // 先撤销同会话的旧混音，再插入新混音
        let revoked = self
            .by_session
            .insert(session_key.clone(), id)
            .and_then(|old_id| self.mixes.remove(&old_id).map(|_| old_id));

        if let Some(old_id) = revoked {
            tracing::debug!(
                session_key = %session_key,
                revoked_mix_id = %old_id,
                "Previous mix revoked"
            );
        }

        self.mixes.insert(id, Arc::new(mix));
        tracing::info!(mix_id = %id, session_key = %session_key, "Mix published");
        revoked
    }

    fn get(&self, id: Uuid) -> Option<Arc<RenderedMix>> {
        self.mixes.get(&id).map(|m| m.clone())
    }

    fn release(&self, id: Uuid) -> bool {
        match self.mixes.remove(&id) {
            Some((_, mix)) => {
                // 清掉会话索引（仅当它仍指向被释放的混音）
                self.by_session
                    .remove_if(&mix.session_key, |_, current| *current == id);
                true
            }
            None => false,
        }
    }

    fn live_count(&self, session_key: &str) -> usize {
        self.mixes
            .iter()
            .filter(|entry| entry.session_key == session_key)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn mix(session_key: &str) -> RenderedMix {
        RenderedMix {
            id: Uuid::new_v4(),
            session_key: session_key.to_string(),
            wav_data: vec![0u8; 44],
            duration_secs: 1.0,
            scene_start_times: vec![0.0],
            line_start_times: vec![0.0],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_publish_and_get() {
        let store = InMemoryMixStore::new();
        let m = mix("a");
        let id = m.id;
        assert_eq!(store.publish(m), None);
        assert!(store.get(id).is_some());
    }

    #[test]
    fn test_republish_never_leaves_two_alive() {
        let store = InMemoryMixStore::new();
        let first = mix("a");
        let first_id = first.id;
        store.publish(first);

        let second = mix("a");
        let second_id = second.id;
        let revoked = store.publish(second);

        assert_eq!(revoked, Some(first_id));
        assert!(store.get(first_id).is_none());
        assert!(store.get(second_id).is_some());
        assert_eq!(store.live_count("a"), 1);
    }

    #[test]
    fn test_sessions_are_independent() {
        let store = InMemoryMixStore::new();
        store.publish(mix("a"));
        store.publish(mix("b"));
        assert_eq!(store.live_count("a"), 1);
        assert_eq!(store.live_count("b"), 1);
    }

    #[test]
    fn test_release() {
        let store = InMemoryMixStore::new();
        let m = mix("a");
        let id = m.id;
        store.publish(m);

        assert!(store.release(id));
        assert!(store.get(id).is_none());
        assert_eq!(store.live_count("a"), 0);
        // 重复释放返回 false
        assert!(!store.release(id));
    }

    #[test]
    fn test_release_old_id_does_not_drop_new_mix() {
        let store = InMemoryMixStore::new();
        let first = mix("a");
        let first_id = first.id;
        store.publish(first);
        let second = mix("a");
        let second_id = second.id;
        store.publish(second);

        // 旧 ID 已被撤销，释放它不影响新混音
        assert!(!store.release(first_id));
        assert!(store.get(second_id).is_some());
        assert_eq!(store.live_count("a"), 1);
    }
}
