//! In-memory record service.

use alloy_primitives::{Address, Bytes, B256};
use async_trait::async_trait;
use parking_lot::Mutex;
use superrecords_codec::RecordsPayload;
use superrecords_primitives::RecordSnapshot;
use superrecords_recsvc::{MulticallBundle, RecordService, RecordServiceError};

#[derive(Debug)]
struct ServiceState {
    snapshot: RecordSnapshot,
    calls: Vec<Bytes>,
    fail_fetches: bool,
    fail_builds: bool,
    fetch_count: usize,
    payloads: Vec<RecordsPayload>,
}

/// A record service serving canned data and recording every build request.
///
/// Mirrors the real trust boundary: whatever payload comes in, the canned
/// call blobs go out unchanged and undecoded.
#[derive(Debug)]
pub struct FakeRecordService {
    state: Mutex<ServiceState>,
}

impl Default for FakeRecordService {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeRecordService {
    /// Service with an empty snapshot and a single canned call blob.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ServiceState {
                snapshot: RecordSnapshot::new(),
                calls: vec![Bytes::from_static(&[0x00])],
                fail_fetches: false,
                fail_builds: false,
                fetch_count: 0,
                payloads: Vec::new(),
            }),
        }
    }

    pub fn with_snapshot(self, snapshot: RecordSnapshot) -> Self {
        self.state.lock().snapshot = snapshot;
        self
    }

    pub fn with_calls(self, calls: Vec<Bytes>) -> Self {
        self.state.lock().calls = calls;
        self
    }

    /// Every fetch answers with a server error.
    pub fn failing_fetches(self) -> Self {
        self.state.lock().fail_fetches = true;
        self
    }

    /// Every build request answers with a server error.
    pub fn failing_builds(self) -> Self {
        self.state.lock().fail_builds = true;
        self
    }

    /// Swaps the snapshot served by subsequent fetches.
    pub fn set_snapshot(&self, snapshot: RecordSnapshot) {
        self.state.lock().snapshot = snapshot;
    }

    /// Payloads received by `build_multicall`, in order.
    pub fn recorded_payloads(&self) -> Vec<RecordsPayload> {
        self.state.lock().payloads.clone()
    }

    /// Number of snapshot fetches served.
    pub fn fetch_count(&self) -> usize {
        self.state.lock().fetch_count
    }
}

#[async_trait]
impl RecordService for FakeRecordService {
    async fn fetch_records(
        &self,
        _node: B256,
        _addr: Address,
    ) -> Result<RecordSnapshot, RecordServiceError> {
        let mut state = self.state.lock();
        if state.fail_fetches {
            return Err(RecordServiceError::Status(500));
        }
        state.fetch_count += 1;
        Ok(state.snapshot.clone())
    }

    async fn build_multicall(
        &self,
        payload: &RecordsPayload,
    ) -> Result<MulticallBundle, RecordServiceError> {
        let mut state = self.state.lock();
        if state.fail_builds {
            return Err(RecordServiceError::Status(500));
        }
        state.payloads.push(payload.clone());
        Ok(MulticallBundle {
            calls: state.calls.clone(),
        })
    }
}
