//! Balance bookkeeping for leave decisions.
//!
//! Nothing here guards against applying the same approval twice. The caller
//! owns that: [`crate::service::leave_workflow::LeaveWorkflow`] only reaches
//! [`apply_approval`] while the request is still pending, and the balance store
//! accepts the resulting debit at most once per leave id.

use tracing::{debug, warn};

use crate::error::{LeaveError, LeaveResult};
use crate::model::leave_balance::LeaveBalance;

/// Consume `request_days` from the balance.
///
/// This always succeeds, even when it overdraws the balance; the sufficiency
/// check belongs to [`precheck`] and to the balance-owning service.
/// Both counters move by the same amount, capped where `used` would overflow.
pub fn apply_approval(mut balance: LeaveBalance, request_days: u32) -> LeaveBalance {
    let days = request_days.min(u32::MAX - balance.used);
    if days < request_days {
        warn!(
            user_id = balance.user_id,
            requested = request_days,
            applied = days,
            "Leave debit capped at counter limit"
        );
    }
    balance.used += days;
    balance.remaining -= i64::from(days);

    if balance.is_overdrawn() {
        warn!(
            user_id = balance.user_id,
            days,
            remaining = balance.remaining,
            "Approval overdrew leave balance"
        );
    } else {
        debug!(
            user_id = balance.user_id,
            days,
            remaining = balance.remaining,
            "Leave balance debited"
        );
    }

    balance
}

/// Rejections leave the balance untouched.
pub fn apply_rejection(balance: LeaveBalance) -> LeaveBalance {
    balance
}

/// Soft check run at submission time against a possibly stale `remaining`.
pub fn precheck(request_days: u32, remaining: i64) -> LeaveResult<()> {
    if i64::from(request_days) > remaining {
        return Err(LeaveError::InsufficientBalance {
            requested: request_days,
            remaining,
        });
    }
    Ok(())
}

/// `used + remaining == total_annual`. A mismatch is reported, never repaired.
pub fn check_consistency(balance: &LeaveBalance) -> LeaveResult<()> {
    if i64::from(balance.used) + balance.remaining != i64::from(balance.total_annual) {
        return Err(LeaveError::InconsistentBalance {
            user_id: balance.user_id,
            total_annual: balance.total_annual,
            used: balance.used,
            remaining: balance.remaining,
        });
    }
    Ok(())
}

/// Share of the annual entitlement already used, rounded to a whole percent.
pub fn utilization_percent(balance: &LeaveBalance) -> u32 {
    if balance.total_annual == 0 {
        return 0;
    }
    let ratio = f64::from(balance.used) / f64::from(balance.total_annual);
    (ratio * 100.0).round() as u32
}
