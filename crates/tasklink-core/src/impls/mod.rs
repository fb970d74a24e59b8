//! Impls - ports の実装（開発用・テスト用）
//!
//! # 含まれる実装
//! - **InMemoryFacts**: 開発用の RelationshipFacts
//! - **InMemoryMessageStore**: 開発用の MessageStore
//! - **FactSeed**: JSON fixture の読み込み
//!
//! # 本番用実装
//! リレーショナル DB を使う実装は別クレートに置き、
//! ペア検索（`agreement_between` など）を 1 本のクエリに押し込む想定です。

pub mod fixture;
pub mod inmem_facts;
pub mod inmem_messages;

pub use self::fixture::{FactSeed, FixtureError};
pub use self::inmem_facts::InMemoryFacts;
pub use self::inmem_messages::InMemoryMessageStore;
