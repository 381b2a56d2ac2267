//! Name handle.

use std::fmt;

use alloy_primitives::B256;

/// A name under management, together with its registry node.
///
/// The node (namehash) is supplied by the caller; this system never computes
/// it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NsName {
    name: String,
    node: B256,
}

impl NsName {
    pub fn new(name: impl Into<String>, node: B256) -> Self {
        Self {
            name: name.into(),
            node,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn node(&self) -> B256 {
        self.node
    }
}

impl fmt::Display for NsName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
