//! Changeset → wire payload encoding.

use superrecords_primitives::{Changeset, WireKey, ZERO_ADDRESS_STR};

use crate::payload::{AddrRecord, RecordsPayload, TextRecord};

/// Strips one leading `@` from a social handle.
pub fn strip_handle(value: &str) -> &str {
    value.strip_prefix('@').unwrap_or(value)
}

/// Encodes a changeset into the record service's write payload.
///
/// Total over the closed field set. Cleared address records are substituted
/// with the zero address so the on-chain record is explicitly zeroed; the
/// redirect entry is lifted to a top-level key and kept even when empty.
pub fn encode_changeset(ens_name: &str, changeset: &Changeset) -> RecordsPayload {
    let mut payload = RecordsPayload::new(ens_name);

    for (field, value) in changeset.iter() {
        match field.wire_key() {
            WireKey::Redirect => {
                payload.redirect = Some(value.to_owned());
            }
            WireKey::Address(coin_type) => {
                let value = if value.is_empty() {
                    ZERO_ADDRESS_STR
                } else {
                    value
                };
                payload.addr_array.push(AddrRecord {
                    coin_type,
                    value: value.to_owned(),
                });
            }
            WireKey::Text(key) => {
                let value = if field.is_handle() {
                    strip_handle(value)
                } else {
                    value
                };
                payload.text_array.push(TextRecord {
                    key,
                    value: value.to_owned(),
                });
            }
        }
    }

    payload
}

#[cfg(test)]
mod tests {
    use superrecords_primitives::RecordField;

    use super::*;

    fn changeset(entries: &[(RecordField, &str)]) -> Changeset {
        entries
            .iter()
            .map(|(field, value)| (*field, (*value).to_owned()))
            .collect()
    }

    #[test]
    fn twitter_handle_is_stripped_and_namespaced() {
        let payload = encode_changeset(
            "alice.eth",
            &changeset(&[(RecordField::Twitter, "@bob")]),
        );

        assert_eq!(
            payload.text_array,
            vec![TextRecord {
                key: "com.twitter",
                value: "bob".to_owned(),
            }]
        );
        assert!(payload.addr_array.is_empty());
        assert!(payload.redirect.is_none());
    }

    #[test]
    fn cleared_address_becomes_zero_address() {
        let payload = encode_changeset(
            "alice.eth",
            &changeset(&[(RecordField::Optimism, "")]),
        );

        assert_eq!(
            payload.addr_array,
            vec![AddrRecord {
                coin_type: 2147483658,
                value: ZERO_ADDRESS_STR.to_owned(),
            }]
        );
    }

    #[test]
    fn set_address_is_passed_through() {
        let payload = encode_changeset(
            "alice.eth",
            &changeset(&[(RecordField::Mainnet, "0x1111111111111111111111111111111111111111")]),
        );

        assert_eq!(payload.addr_array[0].coin_type, 60);
        assert_eq!(
            payload.addr_array[0].value,
            "0x1111111111111111111111111111111111111111"
        );
    }

    #[test]
    fn redirect_is_lifted_even_when_empty() {
        let payload = encode_changeset("alice.eth", &changeset(&[(RecordField::Redirect, "")]));

        assert_eq!(payload.redirect.as_deref(), Some(""));
        assert!(payload.text_array.is_empty());
    }

    #[test]
    fn plain_text_records_keep_their_value() {
        let payload = encode_changeset(
            "alice.eth",
            &changeset(&[
                (RecordField::Description, "hello world"),
                (RecordField::Github, "octocat"),
            ]),
        );

        let keys: Vec<_> = payload.text_array.iter().map(|r| r.key).collect();
        assert_eq!(keys, vec!["description", "com.github"]);
    }

    #[test]
    fn strip_handle_only_removes_one_prefix() {
        assert_eq!(strip_handle("@bob"), "bob");
        assert_eq!(strip_handle("bob"), "bob");
        assert_eq!(strip_handle("@@bob"), "@bob");
        assert_eq!(strip_handle(""), "");
    }
}
