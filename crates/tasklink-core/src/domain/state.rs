//! State - ロールとステータスの列挙型
//!
//! DB では文字列カラム（"customer", "in_progress" など）として保存されているものを
//! 閉じた enum として表現します。
//!
//! # 注意
//! メッセージ権限の判定はどの enum でも分岐しません。
//! variant はデータの忠実性のためだけに存在します。

use serde::{Deserialize, Serialize};

/// UserRole はユーザーのロール
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// タスクを投稿し、offer を送る側
    Customer,
    /// タスクに bid し、offer を受ける側
    Tasker,
}

/// TaskStatus はタスクのライフサイクル
///
/// - open: 募集中
/// - in_progress: agreement 成立後の作業中
/// - completed: 完了
/// - archived: アーカイブ済み
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Open,
    InProgress,
    Completed,
    Archived,
}

/// AgreementStatus は agreement の状態
///
/// pending / accepted / completed のいずれでもメッセージ権限は付与されます。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgreementStatus {
    Pending,
    #[default]
    Accepted,
    Completed,
}
