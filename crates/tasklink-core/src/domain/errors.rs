//! Errors - エラー型と分類
//!
//! 権限判定そのものは独自のエラーを持ちません（bool か集合を返すだけ）。
//! ここにあるのは facts ストア / message ストア由来のインフラエラーと、
//! その上に乗るメッセージ送信の業務エラーです。

use thiserror::Error;

use super::{MessageId, TaskId, UserId};

/// ErrorKind はエラーの運用分類
///
/// - Transient: 一時的なエラー（リトライ推奨）
/// - Permanent: 恒久的なエラー（リトライ無意味）
/// - Infrastructure: インフラエラー（DB 到達不能、タイムアウトなど）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transient,
    Permanent,
    Infrastructure,
}

/// FactsError は RelationshipFacts 実装が返すエラー
///
/// authorizer はこれを捕まえず、そのまま呼び出し元へ伝播させます。
#[derive(Debug, Error)]
pub enum FactsError {
    #[error("facts store unavailable: {0}")]
    Unavailable(String),

    #[error("facts query timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("{0}")]
    Other(String),
}

impl FactsError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FactsError::Unavailable(_) => ErrorKind::Infrastructure,
            FactsError::Timeout(_) => ErrorKind::Transient,
            FactsError::NotFound { .. } | FactsError::Other(_) => ErrorKind::Permanent,
        }
    }
}

/// StoreError は MessageStore 実装が返すエラー
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("message store unavailable: {0}")]
    Unavailable(String),

    #[error("{0} not found")]
    NotFound(MessageId),

    #[error("{0}")]
    Other(String),
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Unavailable(_) => ErrorKind::Infrastructure,
            StoreError::NotFound(_) | StoreError::Other(_) => ErrorKind::Permanent,
        }
    }
}

/// MessagingError はメッセージ送信・既読化の失敗
#[derive(Debug, Error)]
pub enum MessagingError {
    #[error(
        "permission denied: {sender} cannot message {receiver}; messaging requires an active bid, offer, or agreement"
    )]
    PermissionDenied { sender: UserId, receiver: UserId },

    #[error(
        "permission denied: {sender} cannot message {receiver} about {task}; they share no bid, offer, or agreement on it"
    )]
    TaskPermissionDenied {
        sender: UserId,
        receiver: UserId,
        task: TaskId,
    },

    #[error("{0} not found")]
    TaskNotFound(TaskId),

    #[error("not authorized: {0} has no agreement")]
    NoAgreement(TaskId),

    #[error("not authorized: the agreement for {0} must be accepted before messaging")]
    AgreementNotAccepted(TaskId),

    #[error("not authorized: {user} is neither the customer nor the agreed tasker of {task}")]
    NotTaskParticipant { user: UserId, task: TaskId },

    #[error("message content must not be empty")]
    EmptyContent,

    #[error("{0} not found")]
    NotFound(MessageId),

    #[error("{user} is not the recipient of {message}")]
    NotRecipient { user: UserId, message: MessageId },

    #[error(transparent)]
    Facts(#[from] FactsError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_denied_message_guides_the_user() {
        let err = MessagingError::PermissionDenied {
            sender: UserId::new(1),
            receiver: UserId::new(2),
        };
        let text = err.to_string();
        assert!(text.starts_with("permission denied"));
        assert!(text.contains("active bid, offer, or agreement"));
    }

    #[test]
    fn facts_errors_are_classified() {
        assert_eq!(
            FactsError::Unavailable("down".into()).kind(),
            ErrorKind::Infrastructure
        );
        assert_eq!(
            FactsError::Timeout(std::time::Duration::from_millis(100)).kind(),
            ErrorKind::Transient
        );
        assert_eq!(FactsError::not_found("bid", 3).kind(), ErrorKind::Permanent);
    }

    #[test]
    fn store_outage_is_not_reported_as_facts_outage() {
        let err: MessagingError = StoreError::Unavailable("disk full".into()).into();
        assert!(matches!(err, MessagingError::Store(StoreError::Unavailable(_))));
        assert_eq!(err.to_string(), "message store unavailable: disk full");
        assert!(!err.to_string().contains("facts"));
        assert_eq!(
            StoreError::Unavailable("x".into()).kind(),
            ErrorKind::Infrastructure
        );
    }

    #[test]
    fn facts_error_converts_into_messaging_error() {
        let err: MessagingError = FactsError::Other("boom".into()).into();
        assert!(matches!(err, MessagingError::Facts(FactsError::Other(_))));
        assert_eq!(err.to_string(), "boom");
    }
}
