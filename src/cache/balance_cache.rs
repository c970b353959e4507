use crate::core::TokenAccountBalance;
use crate::pool::Pool;
use dashmap::DashMap;
use log::debug;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cache entry with TTL
#[derive(Clone, Copy)]
struct CacheEntry {
    balance: TokenAccountBalance,
    expires_at: Instant,
}

/// Thread-safe token account balance cache with TTL, keyed by token account id.
///
/// Whoever fetches balances writes here; pools read a consistent snapshot
/// through [`BalanceCache::attach`].
#[derive(Clone)]
pub struct BalanceCache {
    cache: Arc<DashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl BalanceCache {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            cache: Arc::new(DashMap::new()),
            ttl: Duration::from_secs(ttl_secs),
        }
    }

    /// Get a balance if not expired
    pub async fn get(&self, token_account: &str) -> Option<TokenAccountBalance> {
        if let Some(entry) = self.cache.get(token_account) {
            if entry.expires_at > Instant::now() {
                return Some(entry.balance);
            }
            // Remove expired entry
            drop(entry);
            self.cache.remove(token_account);
        }

        None
    }

    /// Set a balance
    pub async fn set(&self, token_account: impl Into<String>, balance: TokenAccountBalance) {
        let entry = CacheEntry {
            balance,
            expires_at: Instant::now() + self.ttl,
        };
        self.cache.insert(token_account.into(), entry);
    }

    /// Invalidate cache entry
    pub async fn invalidate(&self, token_account: &str) {
        self.cache.remove(token_account);
    }

    /// Clear all cache entries
    pub async fn clear(&self) {
        self.cache.clear();
    }

    /// Get cache size
    pub fn size(&self) -> usize {
        self.cache.len()
    }

    /// Clean up expired entries
    pub async fn cleanup_expired(&self) {
        let now = Instant::now();
        self.cache.retain(|_, entry| entry.expires_at > now);
    }

    /// Re-issue `pool` with both reserve balances from the cache.
    /// `None` when either side is missing or stale.
    pub async fn attach(&self, pool: &Pool) -> Option<Pool> {
        let balance_a = self.get(&pool.token_account_a).await;
        let balance_b = self.get(&pool.token_account_b).await;

        match (balance_a, balance_b) {
            (Some(balance_a), Some(balance_b)) => Some(pool.with_balances(balance_a, balance_b)),
            _ => {
                debug!("Balances for pool {} are not cached", pool.account);
                None
            }
        }
    }
}
