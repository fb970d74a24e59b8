use serde::{Deserialize, Serialize};

use super::{TaskId, TaskStatus, UserId};

/// Task は customer が投稿した仕事
///
/// 権限判定では `customer_id` の解決にのみ使われます
/// （Bid / Agreement は tasker_id しか持たないため）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub customer_id: UserId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: TaskStatus,
}

impl Task {
    pub fn new(id: TaskId, customer_id: UserId, title: impl Into<String>) -> Self {
        Self {
            id,
            customer_id,
            title: title.into(),
            status: TaskStatus::Open,
        }
    }
}
