//! Deterministic fakes and builders for flow tests.
//!
//! The mockall mocks generated in `chainio`/`recsvc` cover single-call
//! expectations; the fakes here are for multi-step flows where recorded
//! interaction history matters more than call expectations.

mod record_service;
mod wallet;

use alloy_primitives::{Address, B256};
use superrecords_primitives::{NsName, RecordField, RecordSnapshot, RecordValue};

pub use record_service::FakeRecordService;
pub use wallet::{FakeWallet, SubmittedCall};

/// A fixed name with a fixed node.
pub fn test_name() -> NsName {
    NsName::new("alice.eth", B256::repeat_byte(0x11))
}

/// The wallet account snapshots are keyed by in tests.
pub fn test_owner() -> Address {
    Address::repeat_byte(0xa1)
}

/// Builds a snapshot from `(field, value)` pairs with zero sync delay.
pub fn snapshot(entries: &[(RecordField, &str)]) -> RecordSnapshot {
    entries
        .iter()
        .map(|(field, value)| (*field, RecordValue::new(*value)))
        .collect()
}
