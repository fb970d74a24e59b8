//! MessageStore port - メッセージの永続化
//!
//! 送信可否の判定は MessagingService 側で済ませてから呼ばれます。
//! ストア自身は権限を知りません。

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Message, MessageDraft, MessageId, StoreError, TaskId, UserId};

#[async_trait]
pub trait MessageStore: Send + Sync {
    /// draft を保存して採番済みの Message を返す（`read = false`）
    async fn insert(
        &self,
        sender: UserId,
        draft: MessageDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Message, StoreError>;

    async fn get(&self, id: MessageId) -> Result<Option<Message>, StoreError>;

    /// `user` が送信者または受信者のメッセージ（新しい順）
    async fn list_for_user(&self, user: UserId) -> Result<Vec<Message>, StoreError>;

    /// `task` に紐づくメッセージ（古い順）
    async fn list_for_task(&self, task: TaskId) -> Result<Vec<Message>, StoreError>;

    /// 既読にする。存在しなければ `StoreError::NotFound`
    async fn mark_read(&self, id: MessageId) -> Result<(), StoreError>;
}
