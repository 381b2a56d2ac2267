use std::{fs, path::PathBuf, str::FromStr};

use alloy_primitives::{Address, B256};
use argh::FromArgs;
use serde::Deserialize;
use superrecords_codec::{encode_changeset, SourcePlatform};
use superrecords_config::Config;
use superrecords_diff::{diff as diff_records, DraftState};
use superrecords_primitives::NsName;
use superrecords_recsvc::{HttpRecordService, RecordService};

use crate::errors::{DisplayableError, DisplayedError};

/// Previews the changeset a draft file would publish
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "diff")]
pub struct DiffArgs {
    /// the name the draft belongs to, e.g. alice.eth
    #[argh(positional)]
    name: String,

    /// namehash node of the name, 0x-prefixed 32-byte hex
    #[argh(positional)]
    node: String,

    /// owner address the records are keyed by
    #[argh(positional)]
    address: String,

    /// TOML draft file with the edited fields
    #[argh(option)]
    draft: PathBuf,

    /// also print the record service payload as JSON
    #[argh(switch)]
    payload: bool,
}

/// Edits loaded from the draft file. Absent fields keep the published
/// baseline value.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DraftFile {
    first_name: Option<String>,
    last_name: Option<String>,
    bio: Option<String>,
    website: Option<String>,
    use_website_as_redirect: Option<bool>,
    email: Option<String>,
    avatar_platform: Option<SourcePlatform>,
    avatar_username: Option<String>,
    header_platform: Option<SourcePlatform>,
    header_username: Option<String>,
    twitter: Option<String>,
    farcaster: Option<String>,
    github: Option<String>,
    discord: Option<String>,
    telegram: Option<String>,
    mainnet: Option<String>,
    optimism: Option<String>,
    base: Option<String>,
    arbitrum: Option<String>,
    linea: Option<String>,
    polygon: Option<String>,
}

impl DraftFile {
    fn apply(self, draft: &mut DraftState) {
        macro_rules! apply {
            ($($field:ident),* $(,)?) => {
                $(if let Some(value) = self.$field {
                    draft.$field = value;
                })*
            };
        }

        apply!(
            first_name,
            last_name,
            bio,
            website,
            use_website_as_redirect,
            email,
            avatar_username,
            header_username,
            twitter,
            farcaster,
            github,
            discord,
            telegram,
            mainnet,
            optimism,
            base,
            arbitrum,
            linea,
            polygon,
        );

        if self.avatar_platform.is_some() {
            draft.avatar_platform = self.avatar_platform;
        }
        if self.header_platform.is_some() {
            draft.header_platform = self.header_platform;
        }
    }
}

pub async fn diff(args: DiffArgs, config: Config) -> Result<(), DisplayedError> {
    let node = B256::from_str(&args.node)
        .user_error(format!("Invalid node '{}'. Must be 0x-prefixed 32-byte hex", args.node))?;
    let address = Address::from_str(&args.address)
        .user_error(format!("Invalid address '{}'", args.address))?;
    let name = NsName::new(args.name, node);

    let raw = fs::read_to_string(&args.draft)
        .user_error(format!("Cannot read draft file {}", args.draft.display()))?;
    let edits: DraftFile = toml::from_str(&raw)
        .user_error(format!("Cannot parse draft file {}", args.draft.display()))?;

    let service = HttpRecordService::new(&config.record_service_url);
    let baseline = service
        .fetch_records(node, address)
        .await
        .internal_error("Record fetch failed")?;

    let mut draft = DraftState::from_snapshot(&baseline);
    edits.apply(&mut draft);

    let changes = diff_records(&baseline, &draft);
    if changes.is_empty() {
        println!("no changes; publish would be a no-op");
        return Ok(());
    }

    println!("{} record(s) would change:", changes.len());
    for (field, value) in changes.iter() {
        if value.is_empty() {
            println!("  {field:<12} (cleared)");
        } else {
            println!("  {field:<12} {value}");
        }
    }

    if args.payload {
        let payload = encode_changeset(name.name(), &changes);
        let json = serde_json::to_string_pretty(&payload)
            .internal_error("Payload serialization failed")?;
        println!("{json}");
    }

    Ok(())
}
