//! RelationshipAuthorizer - ユーザー間のメッセージ権限
//!
//! user A が user B にメッセージを送れるのは、2 人が次のいずれかで
//! 結ばれているときだけです（向きは問わない）。
//!
//! 1. Agreement（status は問わない）
//! 2. 取り下げられていない Bid
//! 3. Offer（accepted は問わない）
//!
//! # 性質
//! - 対称: `can_message(a, b) == can_message(b, a)`
//! - 非反射: `can_message(a, a) == false`（データを読む前に判定）
//! - offer / agreement による権限は取り消されない。bid による権限は取り下げで消える
//!
//! 評価順は agreement → bid → offer で、最初に見つかった時点で打ち切ります。
//! 結果は純粋な OR なので順序はコストにしか影響しません。

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::{FactsError, PairLink, RelationKind, UserId};
use crate::ports::RelationshipFacts;

/// RelationshipAuthorizer は facts port だけに依存する判定器
///
/// 可変な状態を持たないので、clone して複数タスクから同時に使えます。
///
/// # 使用例
/// ```ignore
/// let authorizer = RelationshipAuthorizer::new(Arc::new(facts));
/// if !authorizer.can_message(sender, receiver).await? {
///     return Err(MessagingError::PermissionDenied { sender, receiver });
/// }
/// ```
pub struct RelationshipAuthorizer<F: ?Sized> {
    facts: Arc<F>,
}

impl<F: ?Sized> Clone for RelationshipAuthorizer<F> {
    fn clone(&self) -> Self {
        Self {
            facts: Arc::clone(&self.facts),
        }
    }
}

impl<F: RelationshipFacts + ?Sized> RelationshipAuthorizer<F> {
    pub fn new(facts: Arc<F>) -> Self {
        Self { facts }
    }

    pub fn facts(&self) -> &Arc<F> {
        &self.facts
    }

    /// `sender` が `receiver` にメッセージを送れるか
    ///
    /// 存在しない user id は単に関係が見つからないので false になります。
    /// facts ストアのエラーはそのまま返します。
    pub async fn can_message(&self, sender: UserId, receiver: UserId) -> Result<bool, FactsError> {
        Ok(self.grant_for(sender, receiver).await?.is_some())
    }

    /// 権限を与えている関係（評価順で最初に見つかったもの）
    #[instrument(level = "debug", skip_all, fields(sender = %sender, receiver = %receiver))]
    pub async fn grant_for(
        &self,
        sender: UserId,
        receiver: UserId,
    ) -> Result<Option<RelationKind>, FactsError> {
        if sender == receiver {
            debug!("self-messaging is never permitted");
            return Ok(None);
        }

        let grant = if self.facts.agreement_between(sender, receiver).await? {
            Some(RelationKind::Agreement)
        } else if self.facts.active_bid_between(sender, receiver).await? {
            Some(RelationKind::Bid)
        } else if self.facts.offer_between(sender, receiver).await? {
            Some(RelationKind::Offer)
        } else {
            None
        };

        match grant {
            Some(kind) => debug!(relation = %kind, "messaging permitted"),
            None => debug!("no relationship connects the pair"),
        }
        Ok(grant)
    }

    /// `user` がメッセージを送れる相手の集合
    ///
    /// 6 つの方向（各関係 × tasker 側 / customer 側）の相手を合わせ、
    /// 重複を除き、自分自身を取り除きます。
    #[instrument(level = "debug", skip_all, fields(user = %user))]
    pub async fn messageable_users(&self, user: UserId) -> Result<BTreeSet<UserId>, FactsError> {
        let mut reachable = BTreeSet::new();

        let agreements = self.facts.agreements_involving(user).await?;
        reachable.extend(agreements.iter().filter_map(|l| l.counterpart_of(user)));

        let bids = self.facts.active_bids_involving(user).await?;
        reachable.extend(bids.iter().filter_map(|l| l.counterpart_of(user)));

        let offers = self.facts.offers_involving(user).await?;
        reachable.extend(offers.iter().filter_map(|l| l.counterpart_of(user)));

        reachable.remove(&user);
        debug!(count = reachable.len(), "resolved messageable users");
        Ok(reachable)
    }
}
