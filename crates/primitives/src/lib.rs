//! Core types shared across the record pipeline.
//!
//! Everything here is plain data: the closed record field set with its wire
//! key mapping, record snapshots and changesets, the chain registry, and the
//! name handle. IO lives in the `chainio` and `recsvc` crates.

pub mod chain;
pub mod field;
pub mod name;
pub mod records;

pub use chain::SpokeChain;
pub use field::{RecordField, UnknownFieldError, WireKey};
pub use name::NsName;
pub use records::{Changeset, RecordSnapshot, RecordValue};

/// String form of the zero address, used to explicitly clear an on-chain
/// address record.
pub const ZERO_ADDRESS_STR: &str = "0x0000000000000000000000000000000000000000";
