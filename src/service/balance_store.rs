use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock};

use tracing::{info, warn};

use crate::error::{LeaveError, LeaveResult};
use crate::model::leave_balance::LeaveBalance;

/// Authoritative owner of leave balances.
///
/// Writes are optimistic: `save` only succeeds when the incoming balance
/// carries the version currently stored, and the stored copy comes back with
/// the version bumped.
pub trait BalanceStore: Send + Sync {
    fn load(&self, user_id: u64) -> LeaveResult<LeaveBalance>;

    /// Register a new balance (HR provisioning). Fails if one already exists.
    fn insert(&self, balance: LeaveBalance) -> LeaveResult<LeaveBalance>;

    fn save(&self, balance: LeaveBalance) -> LeaveResult<LeaveBalance>;

    /// Versioned write of the debit for an approved leave request.
    ///
    /// A leave id is accepted at most once; a second debit for the same id
    /// fails with `AlreadyApplied` whatever version it carries.
    fn save_debit(&self, leave_id: u64, balance: LeaveBalance) -> LeaveResult<LeaveBalance>;
}

#[derive(Debug, Default)]
struct Ledger {
    balances: HashMap<u64, LeaveBalance>,
    applied: HashSet<u64>,
}

impl Ledger {
    fn commit(&mut self, mut balance: LeaveBalance) -> LeaveResult<LeaveBalance> {
        let stored = self
            .balances
            .get_mut(&balance.user_id)
            .ok_or(LeaveError::BalanceNotFound {
                user_id: balance.user_id,
            })?;

        if stored.version != balance.version {
            warn!(
                user_id = balance.user_id,
                expected = balance.version,
                found = stored.version,
                "Refused stale balance write"
            );
            return Err(LeaveError::StaleBalance {
                user_id: balance.user_id,
                expected: balance.version,
                found: stored.version,
            });
        }

        balance.version += 1;
        *stored = balance.clone();
        Ok(balance)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryBalanceStore {
    ledger: RwLock<Ledger>,
}

impl InMemoryBalanceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BalanceStore for InMemoryBalanceStore {
    fn load(&self, user_id: u64) -> LeaveResult<LeaveBalance> {
        let ledger = self.ledger.read().unwrap_or_else(PoisonError::into_inner);
        ledger
            .balances
            .get(&user_id)
            .cloned()
            .ok_or(LeaveError::BalanceNotFound { user_id })
    }

    fn insert(&self, mut balance: LeaveBalance) -> LeaveResult<LeaveBalance> {
        let mut ledger = self.ledger.write().unwrap_or_else(PoisonError::into_inner);
        if ledger.balances.contains_key(&balance.user_id) {
            return Err(LeaveError::DuplicateBalance {
                user_id: balance.user_id,
            });
        }

        balance.version = 0;
        ledger.balances.insert(balance.user_id, balance.clone());
        info!(
            user_id = balance.user_id,
            total_annual = balance.total_annual,
            "Leave balance provisioned"
        );
        Ok(balance)
    }

    fn save(&self, balance: LeaveBalance) -> LeaveResult<LeaveBalance> {
        let mut ledger = self.ledger.write().unwrap_or_else(PoisonError::into_inner);
        ledger.commit(balance)
    }

    fn save_debit(&self, leave_id: u64, balance: LeaveBalance) -> LeaveResult<LeaveBalance> {
        let mut ledger = self.ledger.write().unwrap_or_else(PoisonError::into_inner);
        if ledger.applied.contains(&leave_id) {
            warn!(leave_id, user_id = balance.user_id, "Refused repeated leave debit");
            return Err(LeaveError::AlreadyApplied { leave_id });
        }

        let saved = ledger.commit(balance)?;
        ledger.applied.insert(leave_id);
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_unknown_user_fails() {
        let store = InMemoryBalanceStore::new();
        assert_eq!(
            store.load(9),
            Err(LeaveError::BalanceNotFound { user_id: 9 })
        );
    }

    #[test]
    fn insert_twice_is_refused() {
        let store = InMemoryBalanceStore::new();
        store.insert(LeaveBalance::new(1, 20)).unwrap();
        assert_eq!(
            store.insert(LeaveBalance::new(1, 30)),
            Err(LeaveError::DuplicateBalance { user_id: 1 })
        );
        assert_eq!(store.load(1).unwrap().total_annual, 20);
    }

    #[test]
    fn save_bumps_version() {
        let store = InMemoryBalanceStore::new();
        let mut balance = store.insert(LeaveBalance::new(1, 20)).unwrap();
        balance.used = 2;
        balance.remaining = 18;

        let saved = store.save(balance).unwrap();
        assert_eq!(saved.version, 1);
        assert_eq!(store.load(1).unwrap(), saved);
    }

    #[test]
    fn second_writer_from_same_snapshot_is_stale() {
        let store = InMemoryBalanceStore::new();
        store.insert(LeaveBalance::new(1, 20)).unwrap();

        let first = store.load(1).unwrap();
        let second = first.clone();

        store.save(first).unwrap();
        let err = store.save(second).unwrap_err();
        assert_eq!(
            err,
            LeaveError::StaleBalance {
                user_id: 1,
                expected: 0,
                found: 1,
            }
        );
    }

    #[test]
    fn debit_is_accepted_once_per_leave_id() {
        let store = InMemoryBalanceStore::new();
        store.insert(LeaveBalance::new(1, 20)).unwrap();

        let mut first = store.load(1).unwrap();
        first.used = 3;
        first.remaining = 17;
        store.save_debit(55, first).unwrap();

        // Fresh version, same leave id: still refused.
        let mut again = store.load(1).unwrap();
        again.used = 6;
        again.remaining = 14;
        assert_eq!(
            store.save_debit(55, again),
            Err(LeaveError::AlreadyApplied { leave_id: 55 })
        );
        assert_eq!(store.load(1).unwrap().used, 3);
    }

    #[test]
    fn stale_debit_does_not_consume_leave_id() {
        let store = InMemoryBalanceStore::new();
        store.insert(LeaveBalance::new(1, 20)).unwrap();

        let snapshot = store.load(1).unwrap();
        store.save(snapshot.clone()).unwrap();
        assert!(matches!(
            store.save_debit(8, snapshot),
            Err(LeaveError::StaleBalance { .. })
        ));

        let fresh = store.load(1).unwrap();
        assert_eq!(store.save_debit(8, fresh).unwrap().version, 2);
    }
}
