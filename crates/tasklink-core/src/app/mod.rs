//! App - アプリケーション層
//!
//! ports を組み合わせてユースケースを実装します。
//!
//! # 主要コンポーネント
//! - **RelationshipAuthorizer**: メッセージ権限の判定（このクレートの中核）
//! - **MessagingService**: 権限ゲート付きの送信・受信箱・既読化
//! - **AppBuilder**: ワイヤリングと起動時検証
//! - **AppConfig**: 環境変数からの設定

pub mod authorizer;
pub mod builder;
pub mod config;
pub mod messaging;

pub use self::authorizer::RelationshipAuthorizer;
pub use self::builder::{App, AppBuilder, BuildError};
pub use self::config::AppConfig;
pub use self::messaging::MessagingService;
