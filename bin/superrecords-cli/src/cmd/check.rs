use std::str::FromStr;

use alloy_primitives::B256;
use argh::FromArgs;
use superrecords_chainio::{check_resolver, resolve_wrap_status, RpcRootChainReader};
use superrecords_config::Config;
use superrecords_primitives::NsName;

use crate::errors::{DisplayableError, DisplayedError};

/// Checks whether a name points at the canonical resolver
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "check")]
pub struct CheckArgs {
    /// the name to check, e.g. alice.eth
    #[argh(positional)]
    name: String,

    /// namehash node of the name, 0x-prefixed 32-byte hex
    #[argh(positional)]
    node: String,
}

pub async fn check(args: CheckArgs, config: Config) -> Result<(), DisplayedError> {
    let node = B256::from_str(&args.node)
        .user_error(format!("Invalid node '{}'. Must be 0x-prefixed 32-byte hex", args.node))?;
    let name = NsName::new(args.name, node);

    let reader = RpcRootChainReader::new(&config.root_rpc_url, config.registry)
        .user_error("Invalid root RPC endpoint. Check the config file")?;

    let result = check_resolver(&reader, &name, config.target_resolver)
        .await
        .internal_error("Resolver check failed; the status is unknown")?;

    match result.current_resolver {
        Some(current) if result.is_correct => {
            println!("{name}: resolver up to date ({current})");
        }
        Some(current) => {
            println!("{name}: resolver mismatch");
            println!("  current: {current}");
            println!("  target:  {}", config.target_resolver);
        }
        None => {
            println!("{name}: no resolver set");
            println!("  target: {}", config.target_resolver);
        }
    }

    let wrap = resolve_wrap_status(&reader, &name, config.wrapper)
        .await
        .internal_error("Owner lookup failed")?;
    let admin = if wrap.is_wrapped { "wrapper" } else { "registry" };
    println!("  owner: {} (managed via {admin})", wrap.owner);

    Ok(())
}
