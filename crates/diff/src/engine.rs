//! The diff engine.

use superrecords_codec::{avatar_url, header_url, strip_handle};
use superrecords_primitives::{Changeset, RecordField, RecordSnapshot};

use crate::draft::DraftState;

const SOCIAL_FIELDS: [RecordField; 5] = [
    RecordField::Twitter,
    RecordField::Farcaster,
    RecordField::Github,
    RecordField::Discord,
    RecordField::Telegram,
];

const ADDRESS_FIELDS: [RecordField; 6] = [
    RecordField::Mainnet,
    RecordField::Optimism,
    RecordField::Base,
    RecordField::Arbitrum,
    RecordField::Linea,
    RecordField::Polygon,
];

/// Computes the minimal changeset between `baseline` and `draft`.
///
/// A field appears in the result iff its resolved draft value differs from
/// the baseline, with two exceptions: the redirect entry is force-included
/// whenever the toggle state changes (it is derived, not a direct edit
/// target), and avatar/header entries are only considered when a source
/// platform is selected with a non-empty username.
pub fn diff(baseline: &RecordSnapshot, draft: &DraftState) -> Changeset {
    let mut changes = Changeset::new();

    let full_name = draft.full_name();
    if full_name != baseline.value(RecordField::Name) {
        changes.set(RecordField::Name, full_name);
    }

    if draft.bio != baseline.value(RecordField::Description) {
        changes.set(RecordField::Description, draft.bio.clone());
    }

    if draft.website != baseline.value(RecordField::Url) {
        changes.set(RecordField::Url, draft.website.clone());
    }

    // The toggle state recorded in the baseline is simply "is a redirect
    // set". Only a toggle flip touches the redirect record; editing the
    // website alone never does.
    let baseline_toggle = !baseline.value(RecordField::Redirect).is_empty();
    if draft.use_website_as_redirect != baseline_toggle {
        let value = if draft.use_website_as_redirect {
            draft.website.clone()
        } else {
            String::new()
        };
        changes.set(RecordField::Redirect, value);
    }

    if draft.email != baseline.value(RecordField::Email) {
        changes.set(RecordField::Email, draft.email.clone());
    }

    if let Some(platform) = draft.avatar_platform {
        let username = strip_handle(draft.avatar_username.trim());
        if !username.is_empty() {
            let url = avatar_url(platform, username);
            if url != baseline.value(RecordField::Avatar) {
                changes.set(RecordField::Avatar, url);
            }
        }
    }

    if let Some(platform) = draft.header_platform {
        let username = strip_handle(draft.header_username.trim());
        if !username.is_empty() {
            let url = header_url(platform, username);
            if url != baseline.value(RecordField::Header) {
                changes.set(RecordField::Header, url);
            }
        }
    }

    for field in SOCIAL_FIELDS {
        let raw = draft.social_value(field).expect("social field");
        let resolved = if field.is_handle() {
            strip_handle(raw)
        } else {
            raw
        };
        if resolved != baseline.value(field) {
            changes.set(field, resolved.to_owned());
        }
    }

    for field in ADDRESS_FIELDS {
        let value = draft.address_value(field).expect("address field");
        if value != baseline.value(field) {
            changes.set(field, value.to_owned());
        }
    }

    changes
}
