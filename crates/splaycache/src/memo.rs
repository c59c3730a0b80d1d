//! Memoized Fibonacci on top of a splay cache
//!
//! The cache is passed in explicitly so callers decide its lifetime and can
//! share it across calls.

use crate::cache::SplayCache;
use crate::error::{Error, Result};

/// Largest `n` whose Fibonacci number fits in a `u128`
pub const MAX_FIBONACCI_N: u64 = 186;

/// Compute the `n`th Fibonacci number, memoizing every intermediate result.
///
/// Looks `n` up first; on a miss the value is computed recursively and
/// inserted before returning. `fibonacci(0) == 0`, `fibonacci(1) == 1`.
///
/// # Errors
/// * `Error::Overflow` - `n` is larger than [`MAX_FIBONACCI_N`]
pub fn fibonacci(n: u64, cache: &mut SplayCache<u64, u128>) -> Result<u128> {
    if n <= 1 {
        return Ok(n as u128);
    }
    if n > MAX_FIBONACCI_N {
        return Err(Error::Overflow { n });
    }

    if let Some(&value) = cache.get(&n) {
        return Ok(value);
    }

    let value = fibonacci(n - 1, cache)?
        .checked_add(fibonacci(n - 2, cache)?)
        .ok_or(Error::Overflow { n })?;
    cache.insert(n, value);
    Ok(value)
}
