//! Cache configuration

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// What `insert` does when the key is already present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Overwrite the stored value in place and splay the existing node
    #[default]
    Replace,

    /// Route ties right and add a second node for the same key.
    ///
    /// Older nodes stay in the tree; `find` returns whichever node it meets
    /// first on the search path.
    Shadow,
}

impl DuplicatePolicy {
    /// Policy name as accepted by `FromStr`
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicatePolicy::Replace => "replace",
            DuplicatePolicy::Shadow => "shadow",
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DuplicatePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "replace" => Ok(DuplicatePolicy::Replace),
            "shadow" => Ok(DuplicatePolicy::Shadow),
            _ => Err(Error::InvalidPolicy(s.to_string())),
        }
    }
}

/// Configuration for a [`SplayCache`](crate::SplayCache)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheConfig {
    /// Handling of re-inserted keys
    pub duplicate_policy: DuplicatePolicy,
}

impl CacheConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duplicate-key policy
    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }
}
