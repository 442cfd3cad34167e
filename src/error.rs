use chrono::NaiveDate;
use derive_more::Display;

use crate::model::leave_request::LeaveStatus;
use crate::model::role::Role;

/// Domain errors raised by leave validation, decisions and the balance store.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum LeaveError {
    #[display(fmt = "end_date {} must be after start_date {}", end, start)]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[display(fmt = "start_date {} is in the past (today is {})", start, today)]
    DateInPast { start: NaiveDate, today: NaiveDate },

    #[display(
        fmt = "insufficient balance: requested {} days but only {} remaining",
        requested,
        remaining
    )]
    InsufficientBalance { requested: u32, remaining: i64 },

    #[display(
        fmt = "balance of user {} is inconsistent: used {} + remaining {} != total {}",
        user_id,
        used,
        remaining,
        total_annual
    )]
    InconsistentBalance {
        user_id: u64,
        total_annual: u32,
        used: u32,
        remaining: i64,
    },

    #[display(fmt = "leave request {} cannot move from {} to {}", leave_id, from, to)]
    InvalidTransition {
        leave_id: u64,
        from: LeaveStatus,
        to: LeaveStatus,
    },

    #[display(fmt = "a reason is required to reject leave request {}", leave_id)]
    MissingRejectionReason { leave_id: u64 },

    #[display(fmt = "role {} may not decide leave requests", role)]
    Forbidden { role: Role },

    #[display(fmt = "no leave balance for user {}", user_id)]
    BalanceNotFound { user_id: u64 },

    #[display(fmt = "leave balance for user {} already exists", user_id)]
    DuplicateBalance { user_id: u64 },

    #[display(fmt = "leave request {} has already been debited", leave_id)]
    AlreadyApplied { leave_id: u64 },

    #[display(
        fmt = "stale balance for user {}: expected version {}, found {}",
        user_id,
        expected,
        found
    )]
    StaleBalance {
        user_id: u64,
        expected: u64,
        found: u64,
    },
}

impl std::error::Error for LeaveError {}

pub type LeaveResult<T> = Result<T, LeaveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_balance_message_names_both_amounts() {
        let err = LeaveError::InsufficientBalance {
            requested: 7,
            remaining: 3,
        };
        assert_eq!(
            err.to_string(),
            "insufficient balance: requested 7 days but only 3 remaining"
        );
    }

    #[test]
    fn transition_message_uses_wire_status_names() {
        let err = LeaveError::InvalidTransition {
            leave_id: 9,
            from: LeaveStatus::Approved,
            to: LeaveStatus::Rejected,
        };
        assert_eq!(
            err.to_string(),
            "leave request 9 cannot move from approved to rejected"
        );
    }
}
