use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::leave_request::{LeaveRequest, LeaveStatus};

const DEFAULT_PER_PAGE: u64 = 10;
const MAX_PER_PAGE: u64 = 100;

/// Filters used by the validation and reporting screens.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeaveFilter {
    /// Filter by requesting user
    pub user_id: Option<u64>,
    /// Filter by leave status
    pub status: Option<LeaveStatus>,
    /// Earliest start date, inclusive
    pub from: Option<NaiveDate>,
    /// Latest start date, inclusive
    pub to: Option<NaiveDate>,
    /// Pagination page number (start with 1)
    pub page: Option<u64>,
    /// Pagination per page number
    pub per_page: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeavePage {
    pub data: Vec<LeaveRequest>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl LeaveFilter {
    pub fn matches(&self, request: &LeaveRequest) -> bool {
        self.user_id.is_none_or(|id| request.user_id == id)
            && self.status.is_none_or(|s| request.status == s)
            && self.from.is_none_or(|from| request.start_date >= from)
            && self.to.is_none_or(|to| request.start_date <= to)
    }

    /// Matching requests, latest start first, cut down to the requested page.
    pub fn apply(&self, requests: &[LeaveRequest]) -> LeavePage {
        let per_page = self.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE);
        let page = self.page.unwrap_or(1).clamp(1, u64::from(u32::MAX));
        let offset = (page - 1).saturating_mul(per_page);

        let mut matched: Vec<&LeaveRequest> =
            requests.iter().filter(|r| self.matches(r)).collect();
        matched.sort_by(|a, b| b.start_date.cmp(&a.start_date).then(b.id.cmp(&a.id)));

        let total = matched.len() as u64;
        let data = matched
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(per_page as usize)
            .cloned()
            .collect();

        LeavePage {
            data,
            page: page as u32,
            per_page: per_page as u32,
            total,
        }
    }
}
