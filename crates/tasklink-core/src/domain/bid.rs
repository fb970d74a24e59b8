use serde::{Deserialize, Serialize};

use super::{BidId, TaskId, UserId};

/// Bid は tasker がタスクに対して示した関心
///
/// `withdrawn = true` になった bid は権限判定から恒久的に外れます
/// （再アクティブ化は存在しない）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    pub id: BidId,
    pub task_id: TaskId,
    pub tasker_id: UserId,
    pub amount: f64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub withdrawn: bool,
}

impl Bid {
    pub fn new(id: BidId, task_id: TaskId, tasker_id: UserId, amount: f64) -> Self {
        Self {
            id,
            task_id,
            tasker_id,
            amount,
            message: None,
            withdrawn: false,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.withdrawn
    }
}
