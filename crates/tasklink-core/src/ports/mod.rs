//! Ports - 抽象化レイヤー
//!
//! Hexagonal Architecture の「ポート」を定義します。
//! 各 trait は外部システム（リレーショナル DB など）へのインターフェースで、
//! authorizer とメッセージサービスはこれらにだけ依存します。

pub mod clock;
pub mod message_store;
pub mod relationship_facts;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::message_store::MessageStore;
pub use self::relationship_facts::RelationshipFacts;
