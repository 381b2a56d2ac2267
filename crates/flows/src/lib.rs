//! Orchestration flows.
//!
//! Everything multi-step lives here: the resolver migration state machine,
//! the record publish pipeline, the shared transaction confirmation tracker
//! and the per-name session that gates record operations on a verified
//! resolver and enforces the single-flight rule.

mod error;
mod migration;
mod publish;
mod session;
mod tracker;

pub use error::FlowError;
pub use migration::{MigrationFlow, MigrationOutcome, MigrationParams, MigrationState};
pub use publish::{publish_records, PublishReceipt};
pub use session::{OpKind, ProfileSession, ResolverGate};
pub use tracker::{submit_and_confirm, TxPhase};
