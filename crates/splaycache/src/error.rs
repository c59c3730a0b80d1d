//! Error types for splaycache

use std::fmt;

/// Result type alias for splaycache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache consumers
///
/// Cache lookups never fail: a miss is reported as `None`. Errors only
/// come from configuration parsing and from the memoized computations
/// layered on top of the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Unknown duplicate-key policy name
    InvalidPolicy(String),

    /// Memoized value does not fit the result type
    Overflow {
        /// Argument whose result overflowed
        n: u64,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidPolicy(name) => write!(
                f,
                "Invalid duplicate policy: {:?} (expected \"replace\" or \"shadow\")",
                name
            ),
            Error::Overflow { n } => write!(f, "Arithmetic overflow computing fibonacci({})", n),
        }
    }
}

impl std::error::Error for Error {}
