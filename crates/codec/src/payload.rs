//! Record service write payload.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A text record entry. Serializes as a single-entry map, e.g.
/// `{"com.twitter": "bob"}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextRecord {
    pub key: &'static str,
    pub value: String,
}

impl Serialize for TextRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.key, &self.value)?;
        map.end()
    }
}

/// An address record entry. Serializes as a single-entry map keyed by the
/// decimal coin type, e.g. `{"60": "0xd8dA…"}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddrRecord {
    pub coin_type: u64,
    pub value: String,
}

impl Serialize for AddrRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.coin_type.to_string(), &self.value)?;
        map.end()
    }
}

/// The POST body sent to the record service's multicall builder.
///
/// `redirect` is a top-level key rather than a `text_array` entry: on the
/// wire it is a distinct record kind, and it is carried even when empty (an
/// empty string clears the redirect).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordsPayload {
    pub ens_name: String,
    pub text_array: Vec<TextRecord>,
    pub addr_array: Vec<AddrRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl RecordsPayload {
    pub fn new(ens_name: impl Into<String>) -> Self {
        Self {
            ens_name: ens_name.into(),
            text_array: Vec::new(),
            addr_array: Vec::new(),
            redirect: None,
        }
    }

    /// True when the payload carries no record changes at all.
    pub fn is_empty(&self) -> bool {
        self.text_array.is_empty() && self.addr_array.is_empty() && self.redirect.is_none()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn payload_wire_shape() {
        let payload = RecordsPayload {
            ens_name: "alice.eth".to_owned(),
            text_array: vec![TextRecord {
                key: "com.twitter",
                value: "bob".to_owned(),
            }],
            addr_array: vec![AddrRecord {
                coin_type: 60,
                value: "0x0000000000000000000000000000000000000000".to_owned(),
            }],
            redirect: Some(String::new()),
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "ensName": "alice.eth",
                "textArray": [{"com.twitter": "bob"}],
                "addrArray": [{"60": "0x0000000000000000000000000000000000000000"}],
                "redirect": "",
            })
        );
    }

    #[test]
    fn absent_redirect_is_omitted() {
        let payload = RecordsPayload::new("alice.eth");
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("redirect").is_none());
        assert!(payload.is_empty());
    }
}
