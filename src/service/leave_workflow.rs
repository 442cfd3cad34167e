use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{error, info, instrument};

use crate::error::{LeaveError, LeaveResult};
use crate::model::leave_balance::LeaveBalance;
use crate::model::leave_request::{LeaveDraft, LeaveRequest, LeaveStatus};
use crate::model::role::Role;
use crate::service::balance_store::BalanceStore;
use crate::service::reconciler;
use crate::utils::balance_cache::BalanceCache;

/// Submission and decision flow for leave requests.
///
/// Submission checks against the cached balance snapshot. Approval reads the
/// authoritative balance and hands the debit to [`BalanceStore::save_debit`],
/// which accepts each leave id once; that is what keeps two copies of the same
/// request from debiting twice. The version check on the same write only
/// catches interleaved writers.
#[derive(Clone)]
pub struct LeaveWorkflow {
    store: Arc<dyn BalanceStore>,
    cache: BalanceCache,
}

impl LeaveWorkflow {
    pub fn new(store: Arc<dyn BalanceStore>, cache: BalanceCache) -> Self {
        Self { store, cache }
    }

    /// Balance shown on the request form; served from the cache when possible.
    pub fn balance_for_form(&self, user_id: u64) -> LeaveResult<LeaveBalance> {
        self.cache.get_or_load(user_id, self.store.as_ref())
    }

    #[instrument(skip(self, draft), fields(start = %draft.start_date, end = %draft.end_date))]
    pub fn submit(
        &self,
        id: u64,
        user_id: u64,
        draft: LeaveDraft,
        today: NaiveDate,
    ) -> LeaveResult<LeaveRequest> {
        draft.validate(today)?;

        let request = LeaveRequest::new(id, user_id, draft);
        let days = request.working_days();
        let snapshot = self.balance_for_form(user_id)?;

        if let Err(e) = reconciler::precheck(days, snapshot.remaining) {
            info!(days, remaining = snapshot.remaining, "Leave request blocked by balance");
            return Err(e);
        }

        info!(leave_id = id, days, "Leave request submitted");
        Ok(request)
    }

    /// Approve a pending request and debit its working days from the balance.
    ///
    /// On any error the request is left untouched, still pending.
    #[instrument(skip(self, request, comment), fields(leave_id = request.id, user_id = request.user_id))]
    pub fn approve(
        &self,
        actor: Role,
        request: &mut LeaveRequest,
        comment: Option<String>,
        now: DateTime<Utc>,
    ) -> LeaveResult<LeaveBalance> {
        ensure_can_decide(actor)?;
        ensure_pending(request, LeaveStatus::Approved)?;

        let balance = self.store.load(request.user_id)?;
        if let Err(e) = reconciler::check_consistency(&balance) {
            error!(error = %e, "Refusing approval on inconsistent balance");
            return Err(e);
        }

        let days = request.working_days();
        let saved = self
            .store
            .save_debit(request.id, reconciler::apply_approval(balance, days))?;
        self.cache.invalidate(request.user_id);

        request.approve(actor, comment, now)?;
        info!(days, remaining = saved.remaining, "Leave approved");
        Ok(saved)
    }

    #[instrument(skip(self, request, reason), fields(leave_id = request.id, user_id = request.user_id))]
    pub fn reject(
        &self,
        actor: Role,
        request: &mut LeaveRequest,
        reason: &str,
        now: DateTime<Utc>,
    ) -> LeaveResult<()> {
        ensure_can_decide(actor)?;
        request.reject(actor, reason, now)?;
        info!("Leave rejected");
        Ok(())
    }
}

fn ensure_can_decide(actor: Role) -> LeaveResult<()> {
    if actor.can_decide_leave() {
        Ok(())
    } else {
        Err(LeaveError::Forbidden { role: actor })
    }
}

fn ensure_pending(request: &LeaveRequest, next: LeaveStatus) -> LeaveResult<()> {
    if request.status.can_transition_to(next) {
        Ok(())
    } else {
        Err(LeaveError::InvalidTransition {
            leave_id: request.id,
            from: request.status,
            to: next,
        })
    }
}
