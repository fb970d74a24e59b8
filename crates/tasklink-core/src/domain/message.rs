use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MessageId, TaskId, UserId};

/// 送信前のメッセージ（送信者は認証済みの呼び出し元から決まる）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDraft {
    pub receiver_id: UserId,
    #[serde(default)]
    pub task_id: Option<TaskId>,
    pub content: String,
}

impl MessageDraft {
    pub fn new(receiver_id: UserId, content: impl Into<String>) -> Self {
        Self {
            receiver_id,
            task_id: None,
            content: content.into(),
        }
    }

    pub fn about_task(mut self, task_id: TaskId) -> Self {
        self.task_id = Some(task_id);
        self
    }
}

/// 保存済みのメッセージ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub task_id: Option<TaskId>,
    pub content: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// `user` が送信者または受信者か
    pub fn involves(&self, user: UserId) -> bool {
        self.sender_id == user || self.receiver_id == user
    }
}
