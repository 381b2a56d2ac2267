//! Record service client.
//!
//! The record service is the oracle that knows how to turn a record payload
//! into calldata for the spoke-chain resolver. We trust it: the returned
//! call blobs are opaque bytes and are never decoded or validated here.

mod client;

#[cfg(any(test, feature = "test-utils"))]
pub use client::MockRecordService;
pub use client::{HttpRecordService, MulticallBundle, RecordService, RecordServiceError};
