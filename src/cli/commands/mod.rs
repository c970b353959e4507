pub mod input;
pub mod quote;

use crate::cache::BalanceCache;
use crate::cli::SourceArgs;
use crate::core::{Config, SwapError, SwapResult, TokenAccountBalance};
use crate::pool::{load_pools, Pool, Pools, Route};
use log::{info, warn};
use std::collections::HashMap;

/// Resolve a pool id, falling back to the reversed pool for `B/A` ids.
pub fn find_pool(pools: &Pools, id: &str) -> SwapResult<Pool> {
    if let Some(pool) = pools.get(id) {
        return Ok(pool.clone());
    }

    if let Some((a, b)) = id.split_once('/') {
        if let Some(pool) = pools.get(&format!("{}/{}", b, a)) {
            return Ok(pool.reversed());
        }
    }

    Err(SwapError::PoolNotFound(id.to_string()))
}

/// Split a route argument such as `USDC/SOL,SOL/ETH` into pool ids.
pub fn parse_route_ids(route: &str) -> Vec<String> {
    route
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// Load pools and balances from disk and assemble every candidate route with
/// balances attached.
pub async fn load_routes(
    config: &Config,
    source: &SourceArgs,
    routes: &[String],
) -> SwapResult<Vec<Route>> {
    let pools_file = source.pools.as_deref().unwrap_or(&config.pools_file);
    let balances_file = source.balances.as_deref().unwrap_or(&config.balances_file);

    let pools = load_pools(&tokio::fs::read_to_string(pools_file).await?)?;
    let balances: HashMap<String, TokenAccountBalance> =
        serde_json::from_str(&tokio::fs::read_to_string(balances_file).await?)?;

    info!(
        "Loaded {} pools from {} and {} balances from {}",
        pools.len(),
        pools_file,
        balances.len(),
        balances_file
    );

    let cache = BalanceCache::new(config.balance_cache_ttl_secs);
    for (account, balance) in balances {
        cache.set(account, balance).await;
    }

    let mut candidates = Vec::with_capacity(routes.len());
    for route in routes {
        candidates.push(build_route(&pools, &cache, &parse_route_ids(route)).await?);
    }

    Ok(candidates)
}

/// Resolve pool ids and attach cached balances to each hop.
pub async fn build_route(pools: &Pools, cache: &BalanceCache, ids: &[String]) -> SwapResult<Route> {
    let mut hops = Vec::with_capacity(ids.len());
    for id in ids {
        let pool = find_pool(pools, id)?;
        match cache.attach(&pool).await {
            Some(pool) => hops.push(pool),
            None => {
                warn!("No balances for pool {} ({})", id, pool.account);
                return Err(SwapError::BalancesUnavailable);
            }
        }
    }

    Route::new(hops)
}
