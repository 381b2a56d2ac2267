//! The closed record field set and its wire-key mapping.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// ENSIP-11 coin type for root-chain (mainnet) address records.
const COIN_TYPE_MAINNET: u64 = 60;
const COIN_TYPE_OPTIMISM: u64 = 2147483658;
const COIN_TYPE_BASE: u64 = 2147492101;
const COIN_TYPE_ARBITRUM: u64 = 2147525809;
const COIN_TYPE_LINEA: u64 = 2147542792;
const COIN_TYPE_POLYGON: u64 = 2147483785;

/// A profile record field understood by the record pipeline.
///
/// The set is closed: every field maps to exactly one wire key
/// ([`RecordField::wire_key`]) and every wire key maps back to exactly one
/// field ([`RecordField::from_wire_key`]).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordField {
    /// Display name.
    Name,
    /// Bio text.
    Description,
    /// Website URL.
    Url,
    /// Redirect target. Distinct record kind on the wire, derived from the
    /// website field by the diff engine.
    Redirect,
    /// Contact email.
    Email,
    /// Avatar image URL.
    Avatar,
    /// Header image URL.
    Header,
    Twitter,
    Farcaster,
    Github,
    Discord,
    Telegram,
    /// Root-chain address record.
    Mainnet,
    Optimism,
    Base,
    Arbitrum,
    Linea,
    Polygon,
}

/// Wire representation of a record field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WireKey {
    /// General text record with a (possibly namespaced) key.
    Text(&'static str),
    /// Address record identified by coin type.
    Address(u64),
    /// The redirect record, lifted to a top-level payload key.
    Redirect,
}

impl fmt::Display for WireKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireKey::Text(key) => f.write_str(key),
            WireKey::Address(coin_type) => write!(f, "{coin_type}"),
            WireKey::Redirect => f.write_str("redirect"),
        }
    }
}

impl RecordField {
    /// Every field, in a stable order.
    pub const ALL: [RecordField; 18] = [
        RecordField::Name,
        RecordField::Description,
        RecordField::Url,
        RecordField::Redirect,
        RecordField::Email,
        RecordField::Avatar,
        RecordField::Header,
        RecordField::Twitter,
        RecordField::Farcaster,
        RecordField::Github,
        RecordField::Discord,
        RecordField::Telegram,
        RecordField::Mainnet,
        RecordField::Optimism,
        RecordField::Base,
        RecordField::Arbitrum,
        RecordField::Linea,
        RecordField::Polygon,
    ];

    /// Returns the wire key this field is published under.
    pub fn wire_key(&self) -> WireKey {
        match self {
            RecordField::Name => WireKey::Text("name"),
            RecordField::Description => WireKey::Text("description"),
            RecordField::Url => WireKey::Text("url"),
            RecordField::Redirect => WireKey::Redirect,
            RecordField::Email => WireKey::Text("email"),
            RecordField::Avatar => WireKey::Text("avatar"),
            RecordField::Header => WireKey::Text("header"),
            RecordField::Twitter => WireKey::Text("com.twitter"),
            RecordField::Farcaster => WireKey::Text("xyz.farcaster"),
            RecordField::Github => WireKey::Text("com.github"),
            RecordField::Discord => WireKey::Text("com.discord"),
            RecordField::Telegram => WireKey::Text("org.telegram"),
            RecordField::Mainnet => WireKey::Address(COIN_TYPE_MAINNET),
            RecordField::Optimism => WireKey::Address(COIN_TYPE_OPTIMISM),
            RecordField::Base => WireKey::Address(COIN_TYPE_BASE),
            RecordField::Arbitrum => WireKey::Address(COIN_TYPE_ARBITRUM),
            RecordField::Linea => WireKey::Address(COIN_TYPE_LINEA),
            RecordField::Polygon => WireKey::Address(COIN_TYPE_POLYGON),
        }
    }

    /// Reverse wire-key lookup. Accepts text keys, decimal coin types and
    /// `redirect`.
    pub fn from_wire_key(key: &str) -> Result<Self, UnknownFieldError> {
        RecordField::ALL
            .iter()
            .copied()
            .find(|field| field.wire_key().to_string() == key)
            .ok_or_else(|| UnknownFieldError(key.to_owned()))
    }

    /// True for per-chain address records.
    pub fn is_address(&self) -> bool {
        matches!(self.wire_key(), WireKey::Address(_))
    }

    /// Coin type for address fields, `None` otherwise.
    pub fn coin_type(&self) -> Option<u64> {
        match self.wire_key() {
            WireKey::Address(coin_type) => Some(coin_type),
            _ => None,
        }
    }

    /// Social handle fields whose values carry an optional leading `@`.
    pub fn is_handle(&self) -> bool {
        matches!(
            self,
            RecordField::Twitter | RecordField::Farcaster | RecordField::Telegram
        )
    }

    /// Short field name, as used in drafts and CLI output.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordField::Name => "name",
            RecordField::Description => "description",
            RecordField::Url => "url",
            RecordField::Redirect => "redirect",
            RecordField::Email => "email",
            RecordField::Avatar => "avatar",
            RecordField::Header => "header",
            RecordField::Twitter => "twitter",
            RecordField::Farcaster => "farcaster",
            RecordField::Github => "github",
            RecordField::Discord => "discord",
            RecordField::Telegram => "telegram",
            RecordField::Mainnet => "mainnet",
            RecordField::Optimism => "optimism",
            RecordField::Base => "base",
            RecordField::Arbitrum => "arbitrum",
            RecordField::Linea => "linea",
            RecordField::Polygon => "polygon",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordField {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordField::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownFieldError(s.to_owned()))
    }
}

/// A key that does not belong to the closed field set.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown record field key: {0}")]
pub struct UnknownFieldError(pub String);

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn wire_key_mapping_is_injective() {
        let keys: BTreeSet<String> = RecordField::ALL
            .iter()
            .map(|field| field.wire_key().to_string())
            .collect();
        assert_eq!(keys.len(), RecordField::ALL.len());
    }

    #[test]
    fn wire_key_round_trips() {
        for field in RecordField::ALL {
            let key = field.wire_key().to_string();
            assert_eq!(RecordField::from_wire_key(&key).unwrap(), field);
        }
    }

    #[test]
    fn field_name_round_trips() {
        for field in RecordField::ALL {
            assert_eq!(field.as_str().parse::<RecordField>().unwrap(), field);
        }
    }

    #[test]
    fn unknown_wire_key_is_rejected() {
        let err = RecordField::from_wire_key("com.myspace").unwrap_err();
        assert_eq!(err, UnknownFieldError("com.myspace".to_owned()));
    }

    #[test]
    fn address_fields_have_coin_types() {
        assert_eq!(RecordField::Mainnet.coin_type(), Some(60));
        assert_eq!(RecordField::Optimism.coin_type(), Some(2147483658));
        assert_eq!(RecordField::Twitter.coin_type(), None);
        assert!(RecordField::Polygon.is_address());
        assert!(!RecordField::Redirect.is_address());
    }

    #[test]
    fn social_namespaces_match_wire_format() {
        assert_eq!(RecordField::Twitter.wire_key().to_string(), "com.twitter");
        assert_eq!(
            RecordField::Farcaster.wire_key().to_string(),
            "xyz.farcaster"
        );
        assert_eq!(
            RecordField::Telegram.wire_key().to_string(),
            "org.telegram"
        );
    }

    #[test]
    fn serde_names_are_lowercase() {
        let json = serde_json::to_string(&RecordField::Farcaster).unwrap();
        assert_eq!(json, "\"farcaster\"");
        let parsed: RecordField = serde_json::from_str("\"mainnet\"").unwrap();
        assert_eq!(parsed, RecordField::Mainnet);
    }
}
