//! RelationshipFacts port - bid / offer / agreement の読み取り専用ビュー
//!
//! 権限判定が外部ストアに要求する唯一のインターフェースです。
//! 実装はリレーショナル DB でも InMemory でも構いません。
//!
//! # 設計原則
//! - 読み取り専用（authorizer は facts を書き換えない）
//! - 取り下げ済み bid はストア側で除外する（`active_bids_involving`）
//! - フィルタはできるだけクエリ層へ押し込む（全行をメモリに載せない）
//! - スナップショット読み取りで十分（一瞬古い結果は許容）

use async_trait::async_trait;

use crate::domain::{
    AgreementLink, BidLink, FactsError, OfferLink, PairLink, TaskId, TaskRelations, UserId,
};

/// RelationshipFacts は user を含む関係を列挙する
///
/// # Thread Safety
/// - `Send + Sync` を要求（複数のリクエストから同時に呼ばれる）
///
/// # ペア検索
/// `agreement_between` などのペア検索はデフォルトで `*_involving` の結果を
/// プロセス内でフィルタします。
/// ペアの条件を 1 本のクエリ（OR 句）で引ける実装は上書きしてください。
#[async_trait]
pub trait RelationshipFacts: Send + Sync {
    /// `user` が tasker または task の customer である agreement（status は問わない）
    async fn agreements_involving(&self, user: UserId) -> Result<Vec<AgreementLink>, FactsError>;

    /// `user` が tasker または task の customer である、取り下げられていない bid
    async fn active_bids_involving(&self, user: UserId) -> Result<Vec<BidLink>, FactsError>;

    /// `user` が customer または tasker である offer（accepted は問わない）
    async fn offers_involving(&self, user: UserId) -> Result<Vec<OfferLink>, FactsError>;

    /// `task` に紐づく agreement / 取り下げられていない bid / offer
    ///
    /// task が存在しなければ `Ok(None)`。
    async fn task_relations(&self, task: TaskId) -> Result<Option<TaskRelations>, FactsError>;

    async fn agreement_between(&self, a: UserId, b: UserId) -> Result<bool, FactsError> {
        Ok(self
            .agreements_involving(a)
            .await?
            .iter()
            .any(|link| link.connects(a, b)))
    }

    async fn active_bid_between(&self, a: UserId, b: UserId) -> Result<bool, FactsError> {
        Ok(self
            .active_bids_involving(a)
            .await?
            .iter()
            .any(|link| link.connects(a, b)))
    }

    async fn offer_between(&self, a: UserId, b: UserId) -> Result<bool, FactsError> {
        Ok(self
            .offers_involving(a)
            .await?
            .iter()
            .any(|link| link.connects(a, b)))
    }
}
