//! Avatar/header rendering-service URL templating.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Social platform an avatar or header image is sourced from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourcePlatform {
    X,
    Farcaster,
}

impl SourcePlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourcePlatform::X => "x",
            SourcePlatform::Farcaster => "farcaster",
        }
    }
}

impl fmt::Display for SourcePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendering-service URL for an avatar image derived from `username`.
pub fn avatar_url(platform: SourcePlatform, username: &str) -> String {
    format!(
        "https://api.avatar.{}.superrecords.xyz/?user={}",
        platform.as_str(),
        username
    )
}

/// Rendering-service URL for a header image derived from `username`.
pub fn header_url(platform: SourcePlatform, username: &str) -> String {
    format!(
        "https://api.header.{}.superrecords.xyz/?user={}",
        platform.as_str(),
        username
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_schemes_differ_per_field() {
        let avatar = avatar_url(SourcePlatform::X, "bob");
        let header = header_url(SourcePlatform::X, "bob");

        assert_eq!(avatar, "https://api.avatar.x.superrecords.xyz/?user=bob");
        assert_eq!(header, "https://api.header.x.superrecords.xyz/?user=bob");
        assert_ne!(avatar, header);
    }

    #[test]
    fn platform_selects_host_segment() {
        assert!(avatar_url(SourcePlatform::Farcaster, "bob").contains(".farcaster."));
    }
}
