use serde::{Deserialize, Serialize};

/// Per-user leave entitlement counters.
///
/// `remaining` is stored state owned by the balance service, not a value
/// derived from `total_annual - used`. It goes negative when an approval
/// overdraws the balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveBalance {
    pub user_id: u64,
    pub total_annual: u32,
    pub used: u32,
    pub remaining: i64,
    /// Bumped by the balance store on every accepted write.
    #[serde(default)]
    pub version: u64,
}

impl LeaveBalance {
    /// A fresh entitlement with nothing consumed yet.
    pub fn new(user_id: u64, total_annual: u32) -> Self {
        Self {
            user_id,
            total_annual,
            used: 0,
            remaining: i64::from(total_annual),
            version: 0,
        }
    }

    pub fn is_overdrawn(&self) -> bool {
        self.remaining < 0
    }
}
