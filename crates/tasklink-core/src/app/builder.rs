//! AppBuilder - facts / message store / clock のワイヤリング
//!
//! # Fail-fast 設計
//! - facts ソースは必須。指定が無ければ build() が BuildError を返す
//! - message store と clock は省略時に InMemory / SystemClock を使う

use std::sync::Arc;

use crate::app::authorizer::RelationshipAuthorizer;
use crate::app::messaging::MessagingService;
use crate::impls::{FactSeed, InMemoryFacts, InMemoryMessageStore};
use crate::ports::{Clock, MessageStore, RelationshipFacts, SystemClock};

/// AppBuilder はアプリケーションを構築
///
/// # 使用例
/// ```ignore
/// let app = AppBuilder::new()
///     .with_seed(FactSeed::load("facts.json")?)
///     .build()?;
/// let ok = app.authorizer().can_message(a, b).await?;
/// ```
#[derive(Default)]
pub struct AppBuilder {
    facts: Option<Arc<dyn RelationshipFacts>>,
    store: Option<Arc<dyn MessageStore>>,
    clock: Option<Arc<dyn Clock>>,
}

/// BuildError はアプリケーション構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("no relationship facts source was configured")]
    MissingFacts,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_facts(mut self, facts: Arc<dyn RelationshipFacts>) -> Self {
        self.facts = Some(facts);
        self
    }

    /// fixture から InMemoryFacts を作って facts ソースにする
    pub fn with_seed(self, seed: FactSeed) -> Self {
        self.with_facts(Arc::new(InMemoryFacts::from_seed(seed)))
    }

    pub fn with_message_store(mut self, store: Arc<dyn MessageStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn build(self) -> Result<App, BuildError> {
        let facts = self.facts.ok_or(BuildError::MissingFacts)?;
        let store: Arc<dyn MessageStore> = match self.store {
            Some(store) => store,
            None => Arc::new(InMemoryMessageStore::new()),
        };
        let clock: Arc<dyn Clock> = match self.clock {
            Some(clock) => clock,
            None => Arc::new(SystemClock),
        };
        Ok(App {
            messaging: MessagingService::new(RelationshipAuthorizer::new(facts), store, clock),
        })
    }
}

/// App は組み立て済みのサービス一式
pub struct App {
    messaging: MessagingService<dyn RelationshipFacts>,
}

impl App {
    pub fn authorizer(&self) -> &RelationshipAuthorizer<dyn RelationshipFacts> {
        self.messaging.authorizer()
    }

    pub fn messaging(&self) -> &MessagingService<dyn RelationshipFacts> {
        &self.messaging
    }
}
