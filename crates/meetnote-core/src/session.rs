//! Per-session state: the current uploaded recording plus the chat history.
//!
//! Sessions are explicit context objects with a defined lifecycle (created on
//! demand, reset or removed by the client) rather than ambient process-wide
//! state. All state is in-memory; nothing survives the process.

use chrono::{DateTime, Utc};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{ChatTurn, UploadedMedia};

/// Append-only chat history, bounded by a configurable cap.
///
/// Insertion order is the display order. Once the cap is reached the oldest
/// turn is dropped so long-running sessions cannot grow without bound.
#[derive(Debug, Clone)]
pub struct ChatLog {
    turns: VecDeque<ChatTurn>,
    cap: usize,
}

impl ChatLog {
    pub fn new(cap: usize) -> Self {
        Self {
            turns: VecDeque::new(),
            cap: cap.max(1),
        }
    }

    pub fn append(&mut self, question: String, answer: String) -> ChatTurn {
        let turn = ChatTurn {
            question,
            answer,
            asked_at: Utc::now(),
        };
        if self.turns.len() == self.cap {
            self.turns.pop_front();
        }
        self.turns.push_back(turn.clone());
        turn
    }

    pub fn all(&self) -> Vec<ChatTurn> {
        self.turns.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

/// Everything the handlers need about one client session.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub id: Uuid,
    pub media: Option<UploadedMedia>,
    pub chat: ChatLog,
    pub created_at: DateTime<Utc>,
}

impl SessionContext {
    fn new(id: Uuid, chat_cap: usize) -> Self {
        Self {
            id,
            media: None,
            chat: ChatLog::new(chat_cap),
            created_at: Utc::now(),
        }
    }
}

/// In-memory session registry. Sessions are isolated from each other; the
/// store holds no state shared across them beyond the map itself.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, SessionContext>>>,
    chat_cap: usize,
}

impl SessionStore {
    pub fn new(chat_cap: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            chat_cap,
        }
    }

    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        let mut sessions = self.inner.write().await;
        sessions.insert(id, SessionContext::new(id, self.chat_cap));
        tracing::info!(session_id = %id, "Session created");
        id
    }

    pub async fn exists(&self, id: Uuid) -> bool {
        self.inner.read().await.contains_key(&id)
    }

    /// Remove the session entirely, returning its final state so the caller
    /// can clean up scratch files.
    pub async fn remove(&self, id: Uuid) -> Result<SessionContext, AppError> {
        let mut sessions = self.inner.write().await;
        let ctx = sessions
            .remove(&id)
            .ok_or_else(|| AppError::NotFound(format!("session {}", id)))?;
        tracing::info!(session_id = %id, chat_turns = ctx.chat.len(), "Session removed");
        Ok(ctx)
    }

    /// Replace the session's uploaded recording, returning the prior one (if
    /// any) so its scratch file can be deleted.
    pub async fn replace_media(
        &self,
        id: Uuid,
        media: UploadedMedia,
    ) -> Result<Option<UploadedMedia>, AppError> {
        let mut sessions = self.inner.write().await;
        let ctx = sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("session {}", id)))?;
        Ok(ctx.media.replace(media))
    }

    pub async fn current_media(&self, id: Uuid) -> Result<Option<UploadedMedia>, AppError> {
        let sessions = self.inner.read().await;
        let ctx = sessions
            .get(&id)
            .ok_or_else(|| AppError::NotFound(format!("session {}", id)))?;
        Ok(ctx.media.clone())
    }

    pub async fn append_chat(
        &self,
        id: Uuid,
        question: String,
        answer: String,
    ) -> Result<ChatTurn, AppError> {
        let mut sessions = self.inner.write().await;
        let ctx = sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("session {}", id)))?;
        Ok(ctx.chat.append(question, answer))
    }

    pub async fn chat_history(&self, id: Uuid) -> Result<Vec<ChatTurn>, AppError> {
        let sessions = self.inner.read().await;
        let ctx = sessions
            .get(&id)
            .ok_or_else(|| AppError::NotFound(format!("session {}", id)))?;
        Ok(ctx.chat.all())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MediaKind;

    fn sample_media(name: &str) -> UploadedMedia {
        UploadedMedia {
            id: Uuid::new_v4(),
            original_filename: name.to_string(),
            content_type: "audio/mpeg".to_string(),
            kind: MediaKind::Audio,
            size_bytes: 42,
            storage_key: format!("media/test/{}", name),
            uploaded_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_remove() {
        let store = SessionStore::new(16);
        let id = store.create().await;
        assert!(store.exists(id).await);
        store.remove(id).await.unwrap();
        assert!(!store.exists(id).await);
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let store = SessionStore::new(16);
        let err = store.chat_history(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_replace_media_returns_prior() {
        let store = SessionStore::new(16);
        let id = store.create().await;

        assert!(store
            .replace_media(id, sample_media("a.mp3"))
            .await
            .unwrap()
            .is_none());
        let prior = store
            .replace_media(id, sample_media("b.mp3"))
            .await
            .unwrap()
            .expect("prior media");
        assert_eq!(prior.original_filename, "a.mp3");

        let current = store.current_media(id).await.unwrap().unwrap();
        assert_eq!(current.original_filename, "b.mp3");
    }

    #[tokio::test]
    async fn test_chat_history_preserves_order() {
        let store = SessionStore::new(16);
        let id = store.create().await;

        store
            .append_chat(id, "Q1".to_string(), "A1".to_string())
            .await
            .unwrap();
        store
            .append_chat(id, "Q2".to_string(), "A2".to_string())
            .await
            .unwrap();

        let history = store.chat_history(id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].question, "Q1");
        assert_eq!(history[0].answer, "A1");
        assert_eq!(history[1].question, "Q2");
        assert_eq!(history[1].answer, "A2");
    }

    #[tokio::test]
    async fn test_chat_log_cap_drops_oldest() {
        let mut log = ChatLog::new(2);
        log.append("Q1".to_string(), "A1".to_string());
        log.append("Q2".to_string(), "A2".to_string());
        log.append("Q3".to_string(), "A3".to_string());

        let turns = log.all();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].question, "Q2");
        assert_eq!(turns[1].question, "Q3");
    }
}
