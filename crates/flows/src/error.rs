//! Flow error taxonomy.

use alloy_primitives::B256;
use superrecords_chainio::{RootReadError, WalletError};
use superrecords_primitives::UnknownFieldError;
use superrecords_recsvc::RecordServiceError;
use thiserror::Error;

use crate::session::OpKind;

/// Errors surfaced by the orchestration flows.
///
/// Every lower-level failure is converted into exactly one of these at the
/// flow boundary so the host can show a distinct message per kind. Nothing
/// is retried automatically; a failed flow is recoverable by re-entering it
/// from the start.
#[derive(Debug, Error)]
pub enum FlowError {
    /// The resolver pointer could not be read. The answer is unknown, and this
    /// must never be presented as "resolver incorrect".
    #[error("resolver check failed: {0}")]
    ResolverCheckFailed(#[source] RootReadError),

    /// A write was attempted while the wallet is connected to the wrong
    /// chain.
    #[error("wrong network: expected chain {expected}, wallet is on chain {actual}")]
    WrongNetwork { expected: u64, actual: u64 },

    /// The user declined a wallet prompt.
    #[error("user rejected the wallet request")]
    UserRejected,

    /// The record service failed or answered with something unusable.
    #[error(transparent)]
    RecordService(#[from] RecordServiceError),

    /// The transaction was included but reverted.
    #[error("transaction {txid} reverted")]
    TransactionReverted { txid: B256 },

    /// A key outside the closed record field set was encountered.
    #[error(transparent)]
    UnknownField(#[from] UnknownFieldError),

    /// Publish was requested but the draft does not differ from the
    /// baseline. Distinct from failure: nothing was attempted.
    #[error("no record changes to publish")]
    EmptyChangeset,

    /// A record operation was attempted before the resolver was confirmed
    /// correct for this name.
    #[error("resolver for {name} has not been verified")]
    ResolverNotVerified { name: String },

    /// An operation of the same kind is already in flight for this name.
    #[error("{op} already in flight for {name}")]
    Busy { op: OpKind, name: String },

    /// Wallet failure other than an explicit user rejection.
    #[error("wallet error: {0}")]
    Wallet(WalletError),
}

impl From<WalletError> for FlowError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::Rejected => FlowError::UserRejected,
            other => FlowError::Wallet(other),
        }
    }
}
