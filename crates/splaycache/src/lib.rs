//! # splaycache
//!
//! Adaptive memoization cache backed by a splay tree.
//!
//! ## Architecture
//! - **SplayTree**: arena of index-linked nodes, splayed on every hit and insert
//! - **SplayCache**: wraps the tree with hit/miss statistics and tracing
//! - **memo**: memoized Fibonacci using an explicitly passed cache
//!
//! Recently touched keys sit near the root, so skewed access patterns pay
//! less than the amortized O(log n) per operation. Nothing is ever evicted;
//! `clear` drops the whole tree.
//!
//! ```
//! use splaycache::SplayCache;
//!
//! let mut cache = SplayCache::new();
//! cache.insert(5, "five");
//! cache.insert(3, "three");
//!
//! assert_eq!(cache.get(&5), Some(&"five"));
//! assert_eq!(cache.tree().root_key(), Some(&5));
//! ```

#![warn(missing_docs)]

mod cache;
mod config;
mod error;
pub mod memo;
mod stats;
mod tree;

pub use cache::SplayCache;
pub use config::{CacheConfig, DuplicatePolicy};
pub use error::{Error, Result};
pub use stats::CacheStats;
pub use tree::{Iter, SplayTree};
