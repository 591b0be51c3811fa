use thiserror::Error;

use super::types::ClientId;

/// Invariant violations in the relay's shared state.
///
/// These indicate a bug rather than a client mistake: the offending
/// operation is rejected and logged, and the tables are left as they were.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RelayError {
    #[error("client {0} is already registered")]
    DuplicateClient(ClientId),

    #[error("client {0} cannot be paired with itself")]
    SelfPair(ClientId),

    #[error("client {0} already belongs to a session")]
    AlreadyPaired(ClientId),

    #[error("session table holds a one-sided entry for client {0}")]
    HalfOpenEntry(ClientId),
}
