//! Fixture - JSON から facts を読み込む
//!
//! CLI とテストで使う seed 形式です。
//!
//! ```json
//! {
//!   "tasks":      [{"id": 1, "customer_id": 1, "title": "Fix sink"}],
//!   "bids":       [{"id": 1, "task_id": 1, "tasker_id": 2, "amount": 90.0}],
//!   "offers":     [],
//!   "agreements": []
//! }
//! ```
//!
//! 省略したセクションは空として扱います。

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Agreement, Bid, Offer, Task};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FactSeed {
    pub tasks: Vec<Task>,
    pub bids: Vec<Bid>,
    pub offers: Vec<Offer>,
    pub agreements: Vec<Agreement>,
}

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read fixture {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid fixture: {0}")]
    Parse(#[from] serde_json::Error),
}

impl FactSeed {
    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let seed = Self::from_json(&json)?;
        tracing::debug!(
            path = %path.display(),
            tasks = seed.tasks.len(),
            bids = seed.bids.len(),
            offers = seed.offers.len(),
            agreements = seed.agreements.len(),
            "loaded fixture"
        );
        Ok(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AgreementStatus, UserId};

    #[test]
    fn missing_sections_default_to_empty() {
        let seed = FactSeed::from_json(r#"{"tasks": [{"id": 1, "customer_id": 7}]}"#).unwrap();
        assert_eq!(seed.tasks.len(), 1);
        assert_eq!(seed.tasks[0].customer_id, UserId::new(7));
        assert!(seed.bids.is_empty());
        assert!(seed.agreements.is_empty());
    }

    #[test]
    fn row_flags_default_when_omitted() {
        let seed = FactSeed::from_json(
            r#"{
                "bids": [{"id": 1, "task_id": 1, "tasker_id": 2, "amount": 90.0}],
                "offers": [{"id": 1, "task_id": 1, "customer_id": 1, "tasker_id": 2, "amount": 80.0}],
                "agreements": [{"id": 1, "task_id": 1, "tasker_id": 2, "amount": 80.0, "status": "completed"}]
            }"#,
        )
        .unwrap();
        assert!(!seed.bids[0].withdrawn);
        assert!(!seed.offers[0].accepted);
        assert_eq!(seed.agreements[0].status, AgreementStatus::Completed);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = FactSeed::from_json("{not json").unwrap_err();
        assert!(matches!(err, FixtureError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = FactSeed::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, FixtureError::Io { .. }));
    }
}
