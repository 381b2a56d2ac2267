//! Wire-format encoding of record changesets.
//!
//! Pure mapping between the closed field set and the record service's wire
//! payload: namespaced text keys, coin-typed address entries, the lifted
//! redirect key, and value normalization (handle `@`-stripping, zero-address
//! substitution on clears). Unknown fields are unrepresentable here: the
//! field set is a closed enum, and reverse lookups fail with
//! [`UnknownFieldError`].

mod encode;
mod payload;
mod urls;

pub use encode::{encode_changeset, strip_handle};
pub use payload::{AddrRecord, RecordsPayload, TextRecord};
pub use superrecords_primitives::UnknownFieldError;
pub use urls::{avatar_url, header_url, SourcePlatform};
