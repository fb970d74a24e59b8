//! tasklink-core
//!
//! タスクマーケットプレイスのメッセージ権限判定と、その周辺のメッセージ送受信。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, state, task/bid/offer/agreement, relation, message, errors）
//! - **ports**: 抽象化レイヤー（RelationshipFacts, MessageStore, Clock）
//! - **app**: アプリケーションロジック（authorizer, messaging, builder, config）
//! - **impls**: 実装（InMemoryFacts など開発用、fixture 読み込み）

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;

pub use app::{App, AppBuilder, AppConfig, MessagingService, RelationshipAuthorizer};
pub use domain::{FactsError, MessagingError, RelationKind, StoreError, UserId};
pub use ports::RelationshipFacts;
