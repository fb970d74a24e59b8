//! AppConfig - 環境変数からの設定
//!
//! | 変数               | 既定値 | 用途                                 |
//! |--------------------|--------|--------------------------------------|
//! | `TASKLINK_LOG`     | `info` | tracing の EnvFilter ディレクティブ  |
//! | `TASKLINK_FIXTURE` | なし   | 起動時に読み込む facts fixture (JSON) |
//!
//! CLI のフラグはこれらを上書きします。

use std::path::PathBuf;

pub const LOG_ENV: &str = "TASKLINK_LOG";
pub const FIXTURE_ENV: &str = "TASKLINK_FIXTURE";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub log_filter: String,
    pub fixture_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            fixture_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意の lookup 関数から組み立てる（テストで環境変数を汚さないため）
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            log_filter: non_empty(LOG_ENV).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            fixture_path: non_empty(FIXTURE_ENV).map(PathBuf::from),
        }
    }

    pub fn with_fixture(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.fixture_path = path;
        }
        self
    }

    pub fn with_log_filter(mut self, filter: Option<String>) -> Self {
        if let Some(filter) = filter {
            self.log_filter = filter;
        }
        self
    }
}
