use std::time::Duration;

use moka::sync::Cache;

use crate::config::Config;
use crate::error::LeaveResult;
use crate::model::leave_balance::LeaveBalance;
use crate::service::balance_store::BalanceStore;

/// Snapshots of leave balances as read when a request form is opened.
///
/// Entries may lag behind the store; they only feed the soft pre-check at
/// submission and are invalidated whenever this process debits a balance.
#[derive(Clone)]
pub struct BalanceCache {
    inner: Cache<u64, LeaveBalance>,
}

impl BalanceCache {
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Sized and expired per `BALANCE_CACHE_CAPACITY` / `BALANCE_CACHE_TTL_SECS`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.balance_cache_capacity, config.balance_cache_ttl)
    }

    pub fn get(&self, user_id: u64) -> Option<LeaveBalance> {
        self.inner.get(&user_id)
    }

    pub fn insert(&self, balance: LeaveBalance) {
        self.inner.insert(balance.user_id, balance);
    }

    pub fn invalidate(&self, user_id: u64) {
        self.inner.invalidate(&user_id);
    }

    /// Cached snapshot, falling back to the store on a miss.
    pub fn get_or_load(&self, user_id: u64, store: &dyn BalanceStore) -> LeaveResult<LeaveBalance> {
        if let Some(balance) = self.get(user_id) {
            return Ok(balance);
        }

        let balance = store.load(user_id)?;
        self.insert(balance.clone());
        tracing::debug!(user_id, remaining = balance.remaining, "Balance cache filled");
        Ok(balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LeaveError;
    use crate::service::balance_store::InMemoryBalanceStore;

    fn cache() -> BalanceCache {
        BalanceCache::new(100, Duration::from_secs(60))
    }

    #[test]
    fn miss_loads_from_store_and_keeps_snapshot() {
        let store = InMemoryBalanceStore::new();
        store.insert(LeaveBalance::new(1, 20)).unwrap();
        let cache = cache();

        assert!(cache.get(1).is_none());
        assert_eq!(cache.get_or_load(1, &store).unwrap().remaining, 20);

        // A later write to the store is not visible until invalidation.
        let mut balance = store.load(1).unwrap();
        balance.used = 5;
        balance.remaining = 15;
        store.save(balance).unwrap();
        assert_eq!(cache.get_or_load(1, &store).unwrap().remaining, 20);

        cache.invalidate(1);
        assert_eq!(cache.get_or_load(1, &store).unwrap().remaining, 15);
    }

    #[test]
    fn unknown_user_is_not_cached() {
        let store = InMemoryBalanceStore::new();
        let cache = cache();
        assert_eq!(
            cache.get_or_load(3, &store),
            Err(LeaveError::BalanceNotFound { user_id: 3 })
        );
        assert!(cache.get(3).is_none());
    }

    #[test]
    fn from_config_applies_capacity_and_ttl() {
        let config = Config::from_lookup(|key| match key {
            "BALANCE_CACHE_TTL_SECS" => Some("45".to_string()),
            "BALANCE_CACHE_CAPACITY" => Some("12".to_string()),
            _ => None,
        })
        .unwrap();
        let cache = BalanceCache::from_config(&config);

        let policy = cache.inner.policy();
        assert_eq!(policy.max_capacity(), Some(12));
        assert_eq!(policy.time_to_live(), Some(Duration::from_secs(45)));
    }
}
