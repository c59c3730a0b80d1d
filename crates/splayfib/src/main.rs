//! splayfib - memoized Fibonacci through a splay cache

use anyhow::{Context, Result};
use clap::Parser;
use splaycache::memo::{fibonacci, MAX_FIBONACCI_N};
use splaycache::{CacheConfig, DuplicatePolicy, SplayCache};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Fibonacci indices to compute, in order, sharing one cache
    #[arg(default_values_t = [10u64, 50, 100])]
    values: Vec<u64>,

    /// Handling of re-inserted keys (replace or shadow)
    #[arg(short, long, default_value_t = DuplicatePolicy::Replace)]
    policy: DuplicatePolicy,

    /// Clear the cache before each value
    #[arg(long)]
    cold: bool,

    /// Print cache statistics at the end
    #[arg(short, long)]
    stats: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!("splayfib v{}", env!("CARGO_PKG_VERSION"));
    info!("Duplicate policy: {}", args.policy);
    debug!(?args, "parsed arguments");

    let config = CacheConfig::new().duplicate_policy(args.policy);
    let mut cache = SplayCache::with_config(config);

    for &n in &args.values {
        if args.cold {
            cache.clear();
        }

        let value = fibonacci(n, &mut cache)
            .with_context(|| format!("fibonacci({}) exceeds u128 (max n = {})", n, MAX_FIBONACCI_N))?;
        println!("fib({}) = {}", n, value);
        info!(
            n,
            entries = cache.len(),
            hits = cache.stats().hits(),
            misses = cache.stats().misses(),
            "computed"
        );
    }

    if args.stats {
        let stats = cache.stats();
        let tree = cache.tree();
        println!();
        println!("entries:    {}", cache.len());
        println!("hits:       {}", stats.hits());
        println!("misses:     {}", stats.misses());
        println!("inserts:    {}", stats.inserts());
        println!("hit ratio:  {:.3}", stats.hit_ratio());
        println!("rotations:  {}", tree.rotations());
        println!("height:     {}", tree.height());
        match tree.root_key() {
            Some(key) => println!("root key:   {}", key),
            None => println!("root key:   -"),
        }
    }

    Ok(())
}
