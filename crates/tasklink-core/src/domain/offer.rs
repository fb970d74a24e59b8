use serde::{Deserialize, Serialize};

use super::{OfferId, TaskId, UserId};

/// Offer は customer から tasker への直接の提案
///
/// `accepted` の値に関わらず（accepted / declined どちらでも）メッセージ権限を付与します。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: OfferId,
    pub task_id: TaskId,
    pub customer_id: UserId,
    pub tasker_id: UserId,
    pub amount: f64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub accepted: bool,
}

impl Offer {
    pub fn new(
        id: OfferId,
        task_id: TaskId,
        customer_id: UserId,
        tasker_id: UserId,
        amount: f64,
    ) -> Self {
        Self {
            id,
            task_id,
            customer_id,
            tasker_id,
            amount,
            message: None,
            accepted: false,
        }
    }
}
