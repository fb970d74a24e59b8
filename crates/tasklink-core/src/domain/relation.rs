//! Relation links - facts port が返す射影済みの行
//!
//! 各 link は「tasker と customer の組」を 1 つ表します。
//! 方向（どちらが送信者か）は持たず、判定は常に両方向で行います。

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{AgreementStatus, TaskId, UserId};

/// 権限を付与した関係の種類
///
/// 判定の評価順（agreement → bid → offer）と同じ順に並べています。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    Agreement,
    Bid,
    Offer,
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RelationKind::Agreement => "agreement",
            RelationKind::Bid => "bid",
            RelationKind::Offer => "offer",
        };
        f.write_str(s)
    }
}

/// tasker と customer を結ぶ組に共通する操作
pub trait PairLink {
    fn tasker_id(&self) -> UserId;
    fn customer_id(&self) -> UserId;

    /// `user` から見た相手側の id（`user` がどちらの役でもなければ None）
    ///
    /// 自己関係（tasker == customer）の場合は相手も自分になる。
    /// 自分自身の除外は呼び出し側の責務。
    fn counterpart_of(&self, user: UserId) -> Option<UserId> {
        if self.tasker_id() == user {
            Some(self.customer_id())
        } else if self.customer_id() == user {
            Some(self.tasker_id())
        } else {
            None
        }
    }

    /// `a` と `b` を（どちらの向きでも）結んでいるか
    fn connects(&self, a: UserId, b: UserId) -> bool {
        (self.tasker_id() == a && self.customer_id() == b)
            || (self.tasker_id() == b && self.customer_id() == a)
    }
}

/// Agreement と Task を join した結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgreementLink {
    pub tasker_id: UserId,
    pub customer_id: UserId,
    pub status: AgreementStatus,
}

/// 取り下げられていない Bid と Task を join した結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidLink {
    pub tasker_id: UserId,
    pub customer_id: UserId,
}

/// Offer の射影（Offer は customer_id を直接持つので join 不要）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferLink {
    pub customer_id: UserId,
    pub tasker_id: UserId,
    pub accepted: bool,
}

macro_rules! impl_pair_link {
    ($($ty:ty),*) => {
        $(
            impl PairLink for $ty {
                fn tasker_id(&self) -> UserId {
                    self.tasker_id
                }

                fn customer_id(&self) -> UserId {
                    self.customer_id
                }
            }
        )*
    };
}

impl_pair_link!(AgreementLink, BidLink, OfferLink);

/// 1 つの task に紐づく関係をまとめたもの
///
/// task 単位のメッセージ（`MessageDraft::about_task` や task thread）の判定に使います。
/// `agreements` は id 順。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRelations {
    pub task_id: TaskId,
    pub customer_id: UserId,
    pub agreements: Vec<AgreementLink>,
    pub active_bids: Vec<BidLink>,
    pub offers: Vec<OfferLink>,
}

impl TaskRelations {
    pub fn new(task_id: TaskId, customer_id: UserId) -> Self {
        Self {
            task_id,
            customer_id,
            agreements: Vec::new(),
            active_bids: Vec::new(),
            offers: Vec::new(),
        }
    }

    /// この task の上で `a` と `b` を結ぶ関係（agreement → bid → offer の順）
    pub fn grant_between(&self, a: UserId, b: UserId) -> Option<RelationKind> {
        if a == b {
            return None;
        }
        if self.agreements.iter().any(|l| l.connects(a, b)) {
            Some(RelationKind::Agreement)
        } else if self.active_bids.iter().any(|l| l.connects(a, b)) {
            Some(RelationKind::Bid)
        } else if self.offers.iter().any(|l| l.connects(a, b)) {
            Some(RelationKind::Offer)
        } else {
            None
        }
    }

    /// 最初に結ばれた agreement（status は問わない）
    pub fn first_agreement(&self) -> Option<&AgreementLink> {
        self.agreements.first()
    }

    pub fn first_accepted_agreement(&self) -> Option<&AgreementLink> {
        self.agreements
            .iter()
            .find(|l| l.status == AgreementStatus::Accepted)
    }
}
