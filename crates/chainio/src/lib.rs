//! Root-chain IO and the wallet seam.
//!
//! The read side talks JSON-RPC to a root-chain node; the write side goes
//! through the user-mediated [`WalletClient`] trait so the library never
//! holds keys or signs anything itself.

pub mod contracts;
mod reader;
mod resolver;
mod wallet;

#[cfg(any(test, feature = "test-utils"))]
pub use reader::MockRootChainReader;
pub use reader::{RootChainReader, RootReadError, RpcRootChainReader};
pub use resolver::{check_resolver, resolve_wrap_status, ResolverCheck, WrapStatus};
#[cfg(any(test, feature = "test-utils"))]
pub use wallet::MockWalletClient;
pub use wallet::{TxReceipt, WalletClient, WalletError};
