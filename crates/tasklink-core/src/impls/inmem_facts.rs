//! InMemoryFacts - 開発・テスト用の facts ストア
//!
//! # 実装詳細
//! - tasks / bids / offers / agreements を 1 つの `RwLock` で保持
//! - 読み取りは read lock 下のスナップショット
//! - 書き込み API は外部 CRUD 層の代わり（テストと CLI fixture 用）
//!
//! Bid / Agreement の customer は task を引いて解決します。
//! task が存在しない bid / agreement は join に失敗するので link を作りません。

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{
    Agreement, AgreementId, AgreementLink, AgreementStatus, Bid, BidId, BidLink, FactsError,
    Offer, OfferId, OfferLink, PairLink, Task, TaskId, TaskRelations, UserId,
};
use crate::impls::fixture::FactSeed;
use crate::ports::RelationshipFacts;

#[derive(Debug, Default)]
struct FactsState {
    tasks: BTreeMap<TaskId, Task>,
    bids: BTreeMap<BidId, Bid>,
    offers: BTreeMap<OfferId, Offer>,
    agreements: BTreeMap<AgreementId, Agreement>,
}

impl FactsState {
    /// 最大の key + 1。`i64::MAX` まで使い切っていたらエラー
    fn next_key<K: Copy + Into<i64>, V>(
        map: &BTreeMap<K, V>,
        entity: &'static str,
    ) -> Result<i64, FactsError> {
        match map.keys().next_back() {
            None => Ok(1),
            Some(last) => Into::<i64>::into(*last)
                .checked_add(1)
                .ok_or_else(|| FactsError::Other(format!("{entity} id space exhausted"))),
        }
    }

    fn customer_of(&self, task_id: TaskId) -> Option<UserId> {
        self.tasks.get(&task_id).map(|t| t.customer_id)
    }

    fn require_task(&self, task_id: TaskId) -> Result<&Task, FactsError> {
        self.tasks
            .get(&task_id)
            .ok_or_else(|| FactsError::not_found("task", task_id))
    }

    fn agreement_links(&self) -> impl Iterator<Item = AgreementLink> + '_ {
        self.agreements.values().filter_map(|a| {
            self.customer_of(a.task_id).map(|customer_id| AgreementLink {
                tasker_id: a.tasker_id,
                customer_id,
                status: a.status,
            })
        })
    }

    fn active_bid_links(&self) -> impl Iterator<Item = BidLink> + '_ {
        self.bids.values().filter(|b| b.is_active()).filter_map(|b| {
            self.customer_of(b.task_id).map(|customer_id| BidLink {
                tasker_id: b.tasker_id,
                customer_id,
            })
        })
    }

    fn offer_links(&self) -> impl Iterator<Item = OfferLink> + '_ {
        self.offers.values().map(Self::offer_link)
    }

    fn offer_link(o: &Offer) -> OfferLink {
        OfferLink {
            customer_id: o.customer_id,
            tasker_id: o.tasker_id,
            accepted: o.accepted,
        }
    }

    fn task_relations(&self, task_id: TaskId) -> Option<TaskRelations> {
        let customer_id = self.customer_of(task_id)?;
        let mut rel = TaskRelations::new(task_id, customer_id);
        rel.agreements = self
            .agreements
            .values()
            .filter(|a| a.task_id == task_id)
            .map(|a| AgreementLink {
                tasker_id: a.tasker_id,
                customer_id,
                status: a.status,
            })
            .collect();
        rel.active_bids = self
            .bids
            .values()
            .filter(|b| b.task_id == task_id && b.is_active())
            .map(|b| BidLink {
                tasker_id: b.tasker_id,
                customer_id,
            })
            .collect();
        rel.offers = self
            .offers
            .values()
            .filter(|o| o.task_id == task_id)
            .map(Self::offer_link)
            .collect();
        Some(rel)
    }
}

/// InMemoryFacts は開発用の RelationshipFacts 実装
///
/// # 使用例
/// ```ignore
/// let facts = InMemoryFacts::new();
/// let task = facts.post_task(customer, "Fix sink").await?;
/// let bid = facts.place_bid(task, tasker, 90.0).await?;
/// facts.withdraw_bid(bid).await?;
/// ```
#[derive(Debug, Default)]
pub struct InMemoryFacts {
    state: RwLock<FactsState>,
}

impl InMemoryFacts {
    pub fn new() -> Self {
        Self::default()
    }

    /// fixture から構築する（id は fixture に書かれたものをそのまま使う）
    pub fn from_seed(seed: FactSeed) -> Self {
        let state = FactsState {
            tasks: seed.tasks.into_iter().map(|t| (t.id, t)).collect(),
            bids: seed.bids.into_iter().map(|b| (b.id, b)).collect(),
            offers: seed.offers.into_iter().map(|o| (o.id, o)).collect(),
            agreements: seed.agreements.into_iter().map(|a| (a.id, a)).collect(),
        };
        Self {
            state: RwLock::new(state),
        }
    }

    pub async fn post_task(
        &self,
        customer_id: UserId,
        title: impl Into<String>,
    ) -> Result<TaskId, FactsError> {
        let mut state = self.state.write().await;
        let id = TaskId::new(FactsState::next_key(&state.tasks, "task")?);
        state.tasks.insert(id, Task::new(id, customer_id, title));
        Ok(id)
    }

    pub async fn place_bid(
        &self,
        task_id: TaskId,
        tasker_id: UserId,
        amount: f64,
    ) -> Result<BidId, FactsError> {
        let mut state = self.state.write().await;
        state.require_task(task_id)?;
        let id = BidId::new(FactsState::next_key(&state.bids, "bid")?);
        state.bids.insert(id, Bid::new(id, task_id, tasker_id, amount));
        Ok(id)
    }

    /// bid を取り下げる（一方向。再アクティブ化の API は無い）
    pub async fn withdraw_bid(&self, bid_id: BidId) -> Result<(), FactsError> {
        let mut state = self.state.write().await;
        let bid = state
            .bids
            .get_mut(&bid_id)
            .ok_or_else(|| FactsError::not_found("bid", bid_id))?;
        bid.withdrawn = true;
        Ok(())
    }

    pub async fn send_offer(
        &self,
        task_id: TaskId,
        customer_id: UserId,
        tasker_id: UserId,
        amount: f64,
    ) -> Result<OfferId, FactsError> {
        let mut state = self.state.write().await;
        state.require_task(task_id)?;
        let id = OfferId::new(FactsState::next_key(&state.offers, "offer")?);
        state
            .offers
            .insert(id, Offer::new(id, task_id, customer_id, tasker_id, amount));
        Ok(id)
    }

    pub async fn accept_offer(&self, offer_id: OfferId) -> Result<(), FactsError> {
        let mut state = self.state.write().await;
        let offer = state
            .offers
            .get_mut(&offer_id)
            .ok_or_else(|| FactsError::not_found("offer", offer_id))?;
        offer.accepted = true;
        Ok(())
    }

    pub async fn form_agreement(
        &self,
        task_id: TaskId,
        tasker_id: UserId,
        amount: f64,
        status: AgreementStatus,
    ) -> Result<AgreementId, FactsError> {
        let mut state = self.state.write().await;
        state.require_task(task_id)?;
        let id = AgreementId::new(FactsState::next_key(&state.agreements, "agreement")?);
        let mut agreement = Agreement::new(id, task_id, tasker_id, amount);
        agreement.status = status;
        state.agreements.insert(id, agreement);
        Ok(id)
    }

    pub async fn set_agreement_status(
        &self,
        agreement_id: AgreementId,
        status: AgreementStatus,
    ) -> Result<(), FactsError> {
        let mut state = self.state.write().await;
        let agreement = state
            .agreements
            .get_mut(&agreement_id)
            .ok_or_else(|| FactsError::not_found("agreement", agreement_id))?;
        agreement.status = status;
        Ok(())
    }

    pub async fn bid(&self, bid_id: BidId) -> Option<Bid> {
        self.state.read().await.bids.get(&bid_id).cloned()
    }
}

#[async_trait]
impl RelationshipFacts for InMemoryFacts {
    async fn agreements_involving(&self, user: UserId) -> Result<Vec<AgreementLink>, FactsError> {
        let state = self.state.read().await;
        Ok(state
            .agreement_links()
            .filter(|l| l.counterpart_of(user).is_some())
            .collect())
    }

    async fn active_bids_involving(&self, user: UserId) -> Result<Vec<BidLink>, FactsError> {
        let state = self.state.read().await;
        Ok(state
            .active_bid_links()
            .filter(|l| l.counterpart_of(user).is_some())
            .collect())
    }

    async fn offers_involving(&self, user: UserId) -> Result<Vec<OfferLink>, FactsError> {
        let state = self.state.read().await;
        Ok(state
            .offer_links()
            .filter(|l| l.counterpart_of(user).is_some())
            .collect())
    }

    async fn task_relations(&self, task: TaskId) -> Result<Option<TaskRelations>, FactsError> {
        Ok(self.state.read().await.task_relations(task))
    }

    // ペア検索は Vec を作らずに lock 下で直接走査する

    async fn agreement_between(&self, a: UserId, b: UserId) -> Result<bool, FactsError> {
        let state = self.state.read().await;
        Ok(state.agreement_links().any(|l| l.connects(a, b)))
    }

    async fn active_bid_between(&self, a: UserId, b: UserId) -> Result<bool, FactsError> {
        let state = self.state.read().await;
        Ok(state.active_bid_links().any(|l| l.connects(a, b)))
    }

    async fn offer_between(&self, a: UserId, b: UserId) -> Result<bool, FactsError> {
        let state = self.state.read().await;
        Ok(state.offer_links().any(|l| l.connects(a, b)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUSTOMER: UserId = UserId::new(1);
    const TASKER: UserId = UserId::new(2);
    const OTHER: UserId = UserId::new(3);

    #[tokio::test]
    async fn ids_are_assigned_sequentially() {
        let facts = InMemoryFacts::new();
        let t1 = facts.post_task(CUSTOMER, "one").await.unwrap();
        let t2 = facts.post_task(CUSTOMER, "two").await.unwrap();
        assert_eq!(t1, TaskId::new(1));
        assert_eq!(t2, TaskId::new(2));
    }

    #[tokio::test]
    async fn bid_resolves_customer_through_task() {
        let facts = InMemoryFacts::new();
        let task = facts.post_task(CUSTOMER, "Fix sink").await.unwrap();
        facts.place_bid(task, TASKER, 90.0).await.unwrap();

        let as_tasker = facts.active_bids_involving(TASKER).await.unwrap();
        let as_customer = facts.active_bids_involving(CUSTOMER).await.unwrap();
        let expected = BidLink {
            tasker_id: TASKER,
            customer_id: CUSTOMER,
        };
        assert_eq!(as_tasker, vec![expected]);
        assert_eq!(as_customer, vec![expected]);
        assert!(facts.active_bids_involving(OTHER).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn withdrawn_bids_are_excluded() {
        let facts = InMemoryFacts::new();
        let task = facts.post_task(CUSTOMER, "Fix sink").await.unwrap();
        let bid = facts.place_bid(task, TASKER, 90.0).await.unwrap();
        facts.withdraw_bid(bid).await.unwrap();

        assert!(facts.active_bids_involving(TASKER).await.unwrap().is_empty());
        assert!(!facts.active_bid_between(CUSTOMER, TASKER).await.unwrap());
        assert!(facts.bid(bid).await.unwrap().withdrawn);
    }

    #[tokio::test]
    async fn writes_against_unknown_rows_fail() {
        let facts = InMemoryFacts::new();
        let err = facts
            .place_bid(TaskId::new(99), TASKER, 10.0)
            .await
            .unwrap_err();
        assert!(matches!(err, FactsError::NotFound { entity: "task", .. }));

        let err = facts.withdraw_bid(BidId::new(5)).await.unwrap_err();
        assert!(matches!(err, FactsError::NotFound { entity: "bid", .. }));

        let err = facts.accept_offer(OfferId::new(5)).await.unwrap_err();
        assert!(matches!(err, FactsError::NotFound { entity: "offer", .. }));
    }

    #[tokio::test]
    async fn orphan_rows_from_seed_produce_no_links() {
        let seed = FactSeed {
            bids: vec![Bid::new(BidId::new(1), TaskId::new(404), TASKER, 1.0)],
            agreements: vec![Agreement::new(
                AgreementId::new(1),
                TaskId::new(404),
                TASKER,
                1.0,
            )],
            ..FactSeed::default()
        };
        let facts = InMemoryFacts::from_seed(seed);
        assert!(facts.active_bids_involving(TASKER).await.unwrap().is_empty());
        assert!(facts.agreements_involving(TASKER).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn exhausted_id_space_is_an_error_not_a_panic() {
        let seed = FactSeed {
            tasks: vec![Task::new(TaskId::new(i64::MAX), CUSTOMER, "last")],
            ..FactSeed::default()
        };
        let facts = InMemoryFacts::from_seed(seed);

        let err = facts.post_task(CUSTOMER, "one more").await.unwrap_err();
        assert!(matches!(err, FactsError::Other(ref msg) if msg.contains("task")));
        // 他のテーブルはまだ採番できる
        let bid = facts
            .place_bid(TaskId::new(i64::MAX), TASKER, 5.0)
            .await
            .unwrap();
        assert_eq!(bid, BidId::new(1));
    }

    #[tokio::test]
    async fn task_relations_are_scoped_to_one_task() {
        let facts = InMemoryFacts::new();
        let mine = facts.post_task(CUSTOMER, "Fix sink").await.unwrap();
        let other = facts.post_task(OTHER, "Fix roof").await.unwrap();
        facts.place_bid(mine, TASKER, 90.0).await.unwrap();
        let withdrawn = facts.place_bid(mine, OTHER, 80.0).await.unwrap();
        facts.withdraw_bid(withdrawn).await.unwrap();
        facts
            .form_agreement(other, TASKER, 70.0, AgreementStatus::Accepted)
            .await
            .unwrap();

        let rel = facts.task_relations(mine).await.unwrap().unwrap();
        assert_eq!(rel.customer_id, CUSTOMER);
        assert_eq!(
            rel.active_bids,
            vec![BidLink {
                tasker_id: TASKER,
                customer_id: CUSTOMER,
            }]
        );
        assert!(rel.agreements.is_empty());
        assert!(rel.offers.is_empty());

        let rel = facts.task_relations(other).await.unwrap().unwrap();
        assert_eq!(rel.agreements.len(), 1);
        assert!(facts.task_relations(TaskId::new(404)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn pair_lookups_match_default_filtering() {
        let facts = InMemoryFacts::new();
        let task = facts.post_task(CUSTOMER, "Paint fence").await.unwrap();
        facts.send_offer(task, CUSTOMER, TASKER, 50.0).await.unwrap();
        facts
            .form_agreement(task, TASKER, 50.0, AgreementStatus::Pending)
            .await
            .unwrap();

        assert!(facts.offer_between(TASKER, CUSTOMER).await.unwrap());
        assert!(facts.agreement_between(CUSTOMER, TASKER).await.unwrap());
        assert!(!facts.offer_between(CUSTOMER, OTHER).await.unwrap());

        let offers = facts.offers_involving(TASKER).await.unwrap();
        assert!(offers.iter().any(|o| o.connects(CUSTOMER, TASKER)));
    }
}
