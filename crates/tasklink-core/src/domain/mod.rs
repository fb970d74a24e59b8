//! Domain model (ids, records, relation links, messages, errors).
//!
//! レコード型は外部の CRUD 層が所有・更新するもので、
//! 権限判定はそれらを読むだけです。

pub mod agreement;
pub mod bid;
pub mod errors;
pub mod ids;
pub mod message;
pub mod offer;
pub mod relation;
pub mod state;
pub mod task;

pub use agreement::Agreement;
pub use bid::Bid;
pub use errors::{ErrorKind, FactsError, MessagingError, StoreError};
pub use ids::{AgreementId, BidId, Id, IdMarker, MessageId, OfferId, TaskId, UserId};
pub use message::{Message, MessageDraft};
pub use offer::Offer;
pub use relation::{AgreementLink, BidLink, OfferLink, PairLink, RelationKind, TaskRelations};
pub use state::{AgreementStatus, TaskStatus, UserRole};
pub use task::Task;
