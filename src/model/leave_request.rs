use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::{LeaveError, LeaveResult};
use crate::model::role::Role;
use crate::utils::working_days::count_working_days;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LeaveType {
    Annual,
    Sick,
    Unpaid,
}

/// `Pending -> {Approved, Rejected}`; both outcomes are terminal.
///
/// The legacy status names (`EnAttente`, `Accepte`, `Rejete`) still parse.
#[derive(
    Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum LeaveStatus {
    #[default]
    #[serde(alias = "EnAttente")]
    #[strum(to_string = "pending", serialize = "EnAttente")]
    Pending,
    #[serde(alias = "Accepte")]
    #[strum(to_string = "approved", serialize = "Accepte")]
    Approved,
    #[serde(alias = "Rejete")]
    #[strum(to_string = "rejected", serialize = "Rejete")]
    Rejected,
}

impl LeaveStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LeaveStatus::Pending)
    }

    pub fn can_transition_to(&self, next: LeaveStatus) -> bool {
        matches!(
            (self, next),
            (LeaveStatus::Pending, LeaveStatus::Approved)
                | (LeaveStatus::Pending, LeaveStatus::Rejected)
        )
    }
}

/// Employee-supplied fields of a new leave request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveDraft {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub leave_type: LeaveType,
    pub comment: Option<String>,
}

impl LeaveDraft {
    /// Creation rules: the start may not lie before `today` and the end must be
    /// strictly after the start.
    pub fn validate(&self, today: NaiveDate) -> LeaveResult<()> {
        if self.start_date < today {
            return Err(LeaveError::DateInPast {
                start: self.start_date,
                today,
            });
        }

        if self.end_date <= self.start_date {
            return Err(LeaveError::InvalidDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: u64,
    pub user_id: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub leave_type: LeaveType,
    pub status: LeaveStatus,
    pub comment: Option<String>,
    pub decision_comment: Option<String>,
    pub decided_by: Option<Role>,
    pub decided_at: Option<DateTime<Utc>>,
}

impl LeaveRequest {
    pub fn new(id: u64, user_id: u64, draft: LeaveDraft) -> Self {
        Self {
            id,
            user_id,
            start_date: draft.start_date,
            end_date: draft.end_date,
            leave_type: draft.leave_type,
            status: LeaveStatus::Pending,
            comment: draft.comment,
            decision_comment: None,
            decided_by: None,
            decided_at: None,
        }
    }

    /// Business days covered by the request, weekends excluded.
    pub fn working_days(&self) -> u32 {
        count_working_days(self.start_date, self.end_date)
    }

    pub fn approve(
        &mut self,
        by: Role,
        comment: Option<String>,
        at: DateTime<Utc>,
    ) -> LeaveResult<()> {
        self.transition(LeaveStatus::Approved)?;
        self.decision_comment = comment;
        self.decided_by = Some(by);
        self.decided_at = Some(at);
        Ok(())
    }

    pub fn reject(&mut self, by: Role, reason: &str, at: DateTime<Utc>) -> LeaveResult<()> {
        if reason.trim().is_empty() {
            return Err(LeaveError::MissingRejectionReason { leave_id: self.id });
        }
        self.transition(LeaveStatus::Rejected)?;
        self.decision_comment = Some(reason.trim().to_string());
        self.decided_by = Some(by);
        self.decided_at = Some(at);
        Ok(())
    }

    fn transition(&mut self, next: LeaveStatus) -> LeaveResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(LeaveError::InvalidTransition {
                leave_id: self.id,
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}
