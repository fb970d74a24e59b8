//! InMemoryMessageStore - 開発用のメッセージストア

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::domain::{Message, MessageDraft, MessageId, StoreError, TaskId, UserId};
use crate::ports::MessageStore;

/// InMemoryMessageStore は Vec<Message> を Mutex で守るだけのストア
///
/// id は 1 から順に採番します。
#[derive(Debug, Default)]
pub struct InMemoryMessageStore {
    messages: Mutex<Vec<Message>>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn insert(
        &self,
        sender: UserId,
        draft: MessageDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Message, StoreError> {
        let mut messages = self.messages.lock().await;
        let message = Message {
            id: MessageId::new(messages.len() as i64 + 1),
            sender_id: sender,
            receiver_id: draft.receiver_id,
            task_id: draft.task_id,
            content: draft.content,
            read: false,
            created_at,
        };
        messages.push(message.clone());
        Ok(message)
    }

    async fn get(&self, id: MessageId) -> Result<Option<Message>, StoreError> {
        let messages = self.messages.lock().await;
        Ok(messages.iter().find(|m| m.id == id).cloned())
    }

    async fn list_for_user(&self, user: UserId) -> Result<Vec<Message>, StoreError> {
        let messages = self.messages.lock().await;
        let mut found: Vec<Message> = messages
            .iter()
            .filter(|m| m.involves(user))
            .cloned()
            .collect();
        // 同時刻なら後から保存したものを先に
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(found)
    }

    async fn list_for_task(&self, task: TaskId) -> Result<Vec<Message>, StoreError> {
        let messages = self.messages.lock().await;
        let mut found: Vec<Message> = messages
            .iter()
            .filter(|m| m.task_id == Some(task))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(found)
    }

    async fn mark_read(&self, id: MessageId) -> Result<(), StoreError> {
        let mut messages = self.messages.lock().await;
        let message = messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(StoreError::NotFound(id))?;
        message.read = true;
        Ok(())
    }
}
