//! HTTP client for the record service.

use std::collections::BTreeMap;

use alloy_primitives::{Address, Bytes, B256};
use async_trait::async_trait;
use serde::Deserialize;
use superrecords_codec::RecordsPayload;
use superrecords_primitives::{RecordField, RecordSnapshot, RecordValue};
use thiserror::Error;
use tracing::{debug, warn};

/// Pre-encoded record calls, ready to be batched through `multicall`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct MulticallBundle {
    /// Opaque call blobs. Their internal structure is the service's
    /// business, not ours.
    pub calls: Vec<Bytes>,
}

/// Access to the remote record service.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait RecordService: Send + Sync {
    /// Fetches the last-known-published records for `(node, addr)`.
    async fn fetch_records(
        &self,
        node: B256,
        addr: Address,
    ) -> Result<RecordSnapshot, RecordServiceError>;

    /// Asks the service to encode a record payload into multicall blobs.
    async fn build_multicall(
        &self,
        payload: &RecordsPayload,
    ) -> Result<MulticallBundle, RecordServiceError>;
}

/// One record entry as the service serves it.
#[derive(Clone, Debug, Deserialize)]
struct RawRecord {
    value: String,
    #[serde(default)]
    countdown: u64,
}

/// Reqwest-backed record service client.
#[derive(Debug, Clone)]
pub struct HttpRecordService {
    http: reqwest::Client,
    base_url: String,
}

impl HttpRecordService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    fn records_url(&self, node: B256, addr: Address) -> String {
        format!("{}/records?node={node}&addr={addr}", self.base_url)
    }

    fn multicall_url(&self) -> String {
        format!("{}/multicall", self.base_url)
    }
}

#[async_trait]
impl RecordService for HttpRecordService {
    async fn fetch_records(
        &self,
        node: B256,
        addr: Address,
    ) -> Result<RecordSnapshot, RecordServiceError> {
        let url = self.records_url(node, addr);
        debug!(%url, "fetching records");

        let resp = self.http.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(RecordServiceError::Status(status.as_u16()));
        }

        let body = resp.bytes().await?;
        let raw: BTreeMap<String, RawRecord> = serde_json::from_slice(&body)
            .map_err(|e| RecordServiceError::malformed(e.to_string()))?;

        Ok(snapshot_from_wire(raw))
    }

    async fn build_multicall(
        &self,
        payload: &RecordsPayload,
    ) -> Result<MulticallBundle, RecordServiceError> {
        let url = self.multicall_url();
        debug!(%url, name = %payload.ens_name, "requesting multicall encoding");

        let resp = self.http.post(&url).json(payload).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(RecordServiceError::Status(status.as_u16()));
        }

        let body = resp.bytes().await?;
        let bundle: MulticallBundle = serde_json::from_slice(&body)
            .map_err(|e| RecordServiceError::malformed(e.to_string()))?;

        debug!(calls = bundle.calls.len(), "multicall encoding received");
        Ok(bundle)
    }
}

/// Builds a snapshot from a wire-keyed response map.
///
/// The service response is authoritative but not trusted to stay within the
/// closed field set forever; keys we do not know are skipped, not fatal.
fn snapshot_from_wire(raw: BTreeMap<String, RawRecord>) -> RecordSnapshot {
    let mut snapshot = RecordSnapshot::new();
    for (key, record) in raw {
        match RecordField::from_wire_key(&key) {
            Ok(field) => {
                snapshot.insert(field, RecordValue::with_delay(record.value, record.countdown));
            }
            Err(err) => warn!(%err, "skipping record with unknown wire key"),
        }
    }
    snapshot
}

/// Errors talking to the record service.
///
/// Nothing here is retried automatically; the caller decides whether to
/// re-prompt the user.
#[derive(Debug, Error)]
pub enum RecordServiceError {
    /// Request never completed.
    #[error("record service request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-success status.
    #[error("record service returned status {0}")]
    Status(u16),

    /// Response body did not parse.
    #[error("malformed record service response: {0}")]
    Malformed(String),
}

impl RecordServiceError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;

    use super::*;

    #[test]
    fn snapshot_parse_maps_wire_keys() {
        let raw: BTreeMap<String, RawRecord> = serde_json::from_str(
            r#"{
                "name": {"value": "Ada Lovelace", "countdown": 0},
                "com.twitter": {"value": "ada", "countdown": 120},
                "60": {"value": "0x1111111111111111111111111111111111111111"},
                "redirect": {"value": "https://a.com", "countdown": 0}
            }"#,
        )
        .unwrap();

        let snapshot = snapshot_from_wire(raw);

        assert_eq!(snapshot.value(RecordField::Name), "Ada Lovelace");
        assert_eq!(snapshot.value(RecordField::Twitter), "ada");
        assert_eq!(
            snapshot.get(RecordField::Twitter).unwrap().sync_delay_secs,
            120
        );
        assert_eq!(
            snapshot.value(RecordField::Mainnet),
            "0x1111111111111111111111111111111111111111"
        );
        assert_eq!(snapshot.value(RecordField::Redirect), "https://a.com");
    }

    #[test]
    fn snapshot_parse_skips_unknown_keys() {
        let raw: BTreeMap<String, RawRecord> = serde_json::from_str(
            r#"{
                "email": {"value": "ada@a.com"},
                "com.myspace": {"value": "tom"}
            }"#,
        )
        .unwrap();

        let snapshot = snapshot_from_wire(raw);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.value(RecordField::Email), "ada@a.com");
    }

    #[test]
    fn multicall_bundle_decodes_hex_blobs() {
        let bundle: MulticallBundle =
            serde_json::from_str(r#"{"calls": ["0xdeadbeef", "0xc0ffee"]}"#).unwrap();

        assert_eq!(bundle.calls.len(), 2);
        assert_eq!(bundle.calls[0].as_ref(), &[0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn urls_embed_node_and_address() {
        let svc = HttpRecordService::new("https://records.example/api/");
        let node = B256::repeat_byte(0x22);
        let addr = address!("00000000000000000000000000000000000000aa");

        let url = svc.records_url(node, addr);
        assert!(url.starts_with("https://records.example/api/records?node=0x2222"));
        assert!(url.contains("&addr=0x"));
        assert_eq!(svc.multicall_url(), "https://records.example/api/multicall");
    }
}
