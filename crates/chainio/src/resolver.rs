//! Resolver status verification.

use alloy_primitives::Address;
use superrecords_primitives::NsName;
use tracing::debug;

use crate::reader::{RootChainReader, RootReadError};

/// Result of comparing a name's registered resolver to the canonical target.
///
/// Ephemeral: recomputed on every name selection and every explicit check
/// request, never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolverCheck {
    pub name: NsName,
    /// Resolver currently registered, `None` when unset (zero address).
    pub current_resolver: Option<Address>,
    pub is_correct: bool,
}

/// Who administers a name's resolver pointer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrapStatus {
    /// Registry owner of the node.
    pub owner: Address,
    /// True when the owner is the wrapper contract, which then holds the
    /// resolver-setting rights.
    pub is_wrapped: bool,
}

impl WrapStatus {
    /// The contract a `setResolver` write must target.
    pub fn admin_target(&self, registry: Address, wrapper: Address) -> Address {
        if self.is_wrapped {
            wrapper
        } else {
            registry
        }
    }
}

/// Fetches the resolver registered for `name` and compares it against
/// `target`.
///
/// Comparison happens on parsed addresses, so presentation casing can never
/// produce a false mismatch. A read failure is returned as an error; the
/// caller must keep "confirmed wrong" and "unknown" apart and never offer
/// migration off a failed read.
pub async fn check_resolver(
    reader: &impl RootChainReader,
    name: &NsName,
    target: Address,
) -> Result<ResolverCheck, RootReadError> {
    let resolver = reader.resolver_of(name.node()).await?;
    let current_resolver = (resolver != Address::ZERO).then_some(resolver);
    let is_correct = current_resolver == Some(target);

    debug!(name = %name, ?current_resolver, is_correct, "resolver check");

    Ok(ResolverCheck {
        name: name.clone(),
        current_resolver,
        is_correct,
    })
}

/// Reads the registry owner of `name` and decides whether resolver-setting
/// rights sit with the wrapper contract.
pub async fn resolve_wrap_status(
    reader: &impl RootChainReader,
    name: &NsName,
    wrapper: Address,
) -> Result<WrapStatus, RootReadError> {
    let owner = reader.owner_of(name.node()).await?;
    let is_wrapped = owner == wrapper;

    debug!(name = %name, %owner, is_wrapped, "wrap status");

    Ok(WrapStatus { owner, is_wrapped })
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, B256};
    use superrecords_primitives::chain::{REGISTRY_ADDRESS, TARGET_RESOLVER, WRAPPER_ADDRESS};

    use super::*;
    use crate::reader::MockRootChainReader;

    fn test_name() -> NsName {
        NsName::new("alice.eth", B256::repeat_byte(0x11))
    }

    #[tokio::test]
    async fn matching_resolver_is_correct() {
        let mut reader = MockRootChainReader::new();
        reader
            .expect_resolver_of()
            .times(1)
            .returning(|_| Ok(TARGET_RESOLVER));

        let check = check_resolver(&reader, &test_name(), TARGET_RESOLVER)
            .await
            .unwrap();

        assert!(check.is_correct);
        assert_eq!(check.current_resolver, Some(TARGET_RESOLVER));
    }

    #[tokio::test]
    async fn different_resolver_is_mismatched() {
        let mut reader = MockRootChainReader::new();
        reader
            .expect_resolver_of()
            .times(1)
            .returning(|_| Ok(address!("00000000000000000000000000000000deadbeef")));

        let check = check_resolver(&reader, &test_name(), TARGET_RESOLVER)
            .await
            .unwrap();

        assert!(!check.is_correct);
        assert!(check.current_resolver.is_some());
    }

    #[tokio::test]
    async fn zero_resolver_reads_as_unset() {
        let mut reader = MockRootChainReader::new();
        reader
            .expect_resolver_of()
            .times(1)
            .returning(|_| Ok(Address::ZERO));

        let check = check_resolver(&reader, &test_name(), TARGET_RESOLVER)
            .await
            .unwrap();

        assert_eq!(check.current_resolver, None);
        assert!(!check.is_correct);
    }

    #[tokio::test]
    async fn read_failure_is_an_error_not_a_mismatch() {
        let mut reader = MockRootChainReader::new();
        reader
            .expect_resolver_of()
            .times(1)
            .returning(|_| Err(RootReadError::rpc("connection refused")));

        let result = check_resolver(&reader, &test_name(), TARGET_RESOLVER).await;

        assert!(matches!(result, Err(RootReadError::Rpc(_))));
    }

    #[tokio::test]
    async fn wrapper_owner_routes_to_wrapper() {
        let mut reader = MockRootChainReader::new();
        reader
            .expect_owner_of()
            .times(1)
            .returning(|_| Ok(WRAPPER_ADDRESS));

        let status = resolve_wrap_status(&reader, &test_name(), WRAPPER_ADDRESS)
            .await
            .unwrap();

        assert!(status.is_wrapped);
        assert_eq!(
            status.admin_target(REGISTRY_ADDRESS, WRAPPER_ADDRESS),
            WRAPPER_ADDRESS
        );
    }

    #[tokio::test]
    async fn direct_owner_routes_to_registry() {
        let holder = address!("00000000000000000000000000000000000000aa");
        let mut reader = MockRootChainReader::new();
        reader.expect_owner_of().times(1).returning(move |_| Ok(holder));

        let status = resolve_wrap_status(&reader, &test_name(), WRAPPER_ADDRESS)
            .await
            .unwrap();

        assert!(!status.is_wrapped);
        assert_eq!(
            status.admin_target(REGISTRY_ADDRESS, WRAPPER_ADDRESS),
            REGISTRY_ADDRESS
        );
    }
}
