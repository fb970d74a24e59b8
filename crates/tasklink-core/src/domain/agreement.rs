use serde::{Deserialize, Serialize};

use super::{AgreementId, AgreementStatus, TaskId, UserId};

/// Agreement は bid / offer が確定したときに成立する契約
///
/// status は権限判定に影響しません。成立した agreement は永続的に
/// メッセージ権限を付与します（失効・取り消しはモデル化しない）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agreement {
    pub id: AgreementId,
    pub task_id: TaskId,
    pub tasker_id: UserId,
    pub amount: f64,
    #[serde(default)]
    pub status: AgreementStatus,
}

impl Agreement {
    pub fn new(id: AgreementId, task_id: TaskId, tasker_id: UserId, amount: f64) -> Self {
        Self {
            id,
            task_id,
            tasker_id,
            amount,
            status: AgreementStatus::default(),
        }
    }
}
