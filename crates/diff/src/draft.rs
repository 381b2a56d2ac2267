//! Editable draft state.

use superrecords_codec::SourcePlatform;
use superrecords_primitives::{RecordField, RecordSnapshot};

/// Pending edits for one name.
///
/// Initialized from a [`RecordSnapshot`] when an editor opens, mutated freely
/// by user input, and discarded when the editor closes or the selected name
/// changes. The avatar/header platform selectors start unset: an image is
/// only re-derived when the user explicitly picks a source.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DraftState {
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub website: String,
    /// Mirror the website value into the redirect record.
    pub use_website_as_redirect: bool,
    pub email: String,

    pub avatar_platform: Option<SourcePlatform>,
    pub avatar_username: String,
    pub header_platform: Option<SourcePlatform>,
    pub header_username: String,

    pub twitter: String,
    pub farcaster: String,
    pub github: String,
    pub discord: String,
    pub telegram: String,

    pub mainnet: String,
    pub optimism: String,
    pub base: String,
    pub arbitrum: String,
    pub linea: String,
    pub polygon: String,
}

impl DraftState {
    /// Builds a draft mirroring `snapshot`, so that an untouched draft diffs
    /// to an empty changeset.
    pub fn from_snapshot(snapshot: &RecordSnapshot) -> Self {
        let full_name = snapshot.value(RecordField::Name);
        let (first_name, last_name) = match full_name.split_once(' ') {
            Some((first, last)) => (first.to_owned(), last.to_owned()),
            None => (full_name.to_owned(), String::new()),
        };

        Self {
            first_name,
            last_name,
            bio: snapshot.value(RecordField::Description).to_owned(),
            website: snapshot.value(RecordField::Url).to_owned(),
            use_website_as_redirect: !snapshot.value(RecordField::Redirect).is_empty(),
            email: snapshot.value(RecordField::Email).to_owned(),
            avatar_platform: None,
            avatar_username: String::new(),
            header_platform: None,
            header_username: String::new(),
            twitter: snapshot.value(RecordField::Twitter).to_owned(),
            farcaster: snapshot.value(RecordField::Farcaster).to_owned(),
            github: snapshot.value(RecordField::Github).to_owned(),
            discord: snapshot.value(RecordField::Discord).to_owned(),
            telegram: snapshot.value(RecordField::Telegram).to_owned(),
            mainnet: snapshot.value(RecordField::Mainnet).to_owned(),
            optimism: snapshot.value(RecordField::Optimism).to_owned(),
            base: snapshot.value(RecordField::Base).to_owned(),
            arbitrum: snapshot.value(RecordField::Arbitrum).to_owned(),
            linea: snapshot.value(RecordField::Linea).to_owned(),
            polygon: snapshot.value(RecordField::Polygon).to_owned(),
        }
    }

    /// Space-joined display name, trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }

    /// Draft value for a social field.
    pub(crate) fn social_value(&self, field: RecordField) -> Option<&str> {
        match field {
            RecordField::Twitter => Some(&self.twitter),
            RecordField::Farcaster => Some(&self.farcaster),
            RecordField::Github => Some(&self.github),
            RecordField::Discord => Some(&self.discord),
            RecordField::Telegram => Some(&self.telegram),
            _ => None,
        }
    }

    /// Draft value for a per-chain address field.
    pub(crate) fn address_value(&self, field: RecordField) -> Option<&str> {
        match field {
            RecordField::Mainnet => Some(&self.mainnet),
            RecordField::Optimism => Some(&self.optimism),
            RecordField::Base => Some(&self.base),
            RecordField::Arbitrum => Some(&self.arbitrum),
            RecordField::Linea => Some(&self.linea),
            RecordField::Polygon => Some(&self.polygon),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use superrecords_primitives::RecordValue;

    use super::*;

    #[test]
    fn name_splits_on_first_space() {
        let snapshot: RecordSnapshot =
            [(RecordField::Name, RecordValue::new("Ada Lovelace King"))]
                .into_iter()
                .collect();
        let draft = DraftState::from_snapshot(&snapshot);

        assert_eq!(draft.first_name, "Ada");
        assert_eq!(draft.last_name, "Lovelace King");
        assert_eq!(draft.full_name(), "Ada Lovelace King");
    }

    #[test]
    fn single_word_name_has_empty_last_name() {
        let snapshot: RecordSnapshot = [(RecordField::Name, RecordValue::new("ada"))]
            .into_iter()
            .collect();
        let draft = DraftState::from_snapshot(&snapshot);

        assert_eq!(draft.first_name, "ada");
        assert_eq!(draft.last_name, "");
        assert_eq!(draft.full_name(), "ada");
    }

    #[test]
    fn redirect_toggle_mirrors_baseline() {
        let with_redirect: RecordSnapshot =
            [(RecordField::Redirect, RecordValue::new("https://a.com"))]
                .into_iter()
                .collect();
        assert!(DraftState::from_snapshot(&with_redirect).use_website_as_redirect);
        assert!(!DraftState::from_snapshot(&RecordSnapshot::new()).use_website_as_redirect);
    }

    #[test]
    fn image_sources_start_unset() {
        let snapshot: RecordSnapshot = [
            (RecordField::Avatar, RecordValue::new("https://img/a.png")),
            (RecordField::Header, RecordValue::new("https://img/h.png")),
        ]
        .into_iter()
        .collect();
        let draft = DraftState::from_snapshot(&snapshot);

        assert_eq!(draft.avatar_platform, None);
        assert_eq!(draft.header_platform, None);
        assert!(draft.avatar_username.is_empty());
    }
}
