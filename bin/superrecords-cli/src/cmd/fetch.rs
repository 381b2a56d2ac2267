use std::str::FromStr;

use alloy_primitives::{Address, B256};
use argh::FromArgs;
use superrecords_config::Config;
use superrecords_recsvc::{HttpRecordService, RecordService};

use crate::errors::{DisplayableError, DisplayedError};

/// Fetches the published records for a name
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "fetch")]
pub struct FetchArgs {
    /// namehash node of the name, 0x-prefixed 32-byte hex
    #[argh(positional)]
    node: String,

    /// owner address the records are keyed by
    #[argh(positional)]
    address: String,
}

pub async fn fetch(args: FetchArgs, config: Config) -> Result<(), DisplayedError> {
    let node = B256::from_str(&args.node)
        .user_error(format!("Invalid node '{}'. Must be 0x-prefixed 32-byte hex", args.node))?;
    let address = Address::from_str(&args.address)
        .user_error(format!("Invalid address '{}'", args.address))?;

    let service = HttpRecordService::new(&config.record_service_url);
    let snapshot = service
        .fetch_records(node, address)
        .await
        .internal_error("Record fetch failed")?;

    if snapshot.is_empty() {
        println!("no records published");
        return Ok(());
    }

    for (field, record) in snapshot.iter() {
        if record.sync_delay_secs > 0 {
            println!("{field:<12} {} (syncing, {}s)", record.value, record.sync_delay_secs);
        } else {
            println!("{field:<12} {}", record.value);
        }
    }

    Ok(())
}
