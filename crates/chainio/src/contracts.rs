//! Contract call encodings.
//!
//! Only the calls this system issues itself are bound here. Record-setting
//! calldata is never constructed locally; it comes pre-encoded from the
//! record service and is batched through `multicall`.

use alloy_primitives::{Address, Bytes, B256};
use alloy_sol_types::{sol, SolCall};

sol! {
    /// Registry / wrapper surface used for resolver management.
    function resolver(bytes32 node) external view returns (address);
    function owner(bytes32 node) external view returns (address);
    function setResolver(bytes32 node, address resolver) external;

    /// Record write batching on the spoke-chain resolver contract.
    function multicall(bytes[] calldata data) external returns (bytes[] memory results);
}

/// Calldata for `resolver(node)`.
pub fn encode_resolver_query(node: B256) -> Vec<u8> {
    resolverCall { node }.abi_encode()
}

/// Calldata for `owner(node)`.
pub fn encode_owner_query(node: B256) -> Vec<u8> {
    ownerCall { node }.abi_encode()
}

/// Calldata for `setResolver(node, resolver)`.
pub fn encode_set_resolver(node: B256, resolver: Address) -> Vec<u8> {
    setResolverCall { node, resolver }.abi_encode()
}

/// Calldata for `multicall(calls)` over opaque pre-encoded record calls.
pub fn encode_multicall(calls: Vec<Bytes>) -> Vec<u8> {
    multicallCall { data: calls }.abi_encode()
}

/// Decodes a single `address` return value.
pub(crate) fn decode_address_return(raw: &[u8]) -> Result<Address, alloy_sol_types::Error> {
    resolverCall::abi_decode_returns(raw)
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, b256, bytes};

    use super::*;

    #[test]
    fn selectors_match_deployed_abis() {
        assert_eq!(resolverCall::SELECTOR, [0x01, 0x78, 0xb8, 0xbf]);
        assert_eq!(ownerCall::SELECTOR, [0x02, 0x57, 0x1b, 0xe3]);
        assert_eq!(setResolverCall::SELECTOR, [0x18, 0x96, 0xf7, 0x0a]);
        assert_eq!(multicallCall::SELECTOR, [0xac, 0x96, 0x50, 0xd8]);
    }

    #[test]
    fn set_resolver_encodes_node_then_address() {
        let node = b256!("1111111111111111111111111111111111111111111111111111111111111111");
        let resolver = address!("4025fE371f146F8315e76B944c36E9f03B64002C");

        let data = encode_set_resolver(node, resolver);
        assert_eq!(data.len(), 4 + 32 + 32);
        assert_eq!(&data[4..36], node.as_slice());
        assert_eq!(&data[48..68], resolver.as_slice());
    }

    #[test]
    fn address_return_decodes_from_padded_word() {
        let resolver = address!("4025fE371f146F8315e76B944c36E9f03B64002C");
        let mut word = [0u8; 32];
        word[12..].copy_from_slice(resolver.as_slice());

        assert_eq!(decode_address_return(&word).unwrap(), resolver);
    }

    #[test]
    fn multicall_accepts_opaque_blobs() {
        let calls = vec![bytes!("deadbeef"), bytes!("c0ffee")];
        let data = encode_multicall(calls);
        assert_eq!(&data[..4], multicallCall::SELECTOR.as_slice());
    }
}
