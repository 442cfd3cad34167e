use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Actor roles. Numeric ids follow the role table of the identity service.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Role {
    #[strum(to_string = "admin", serialize = "ROLE_ADMIN")]
    Admin = 1,
    #[strum(to_string = "hr", serialize = "ROLE_RH", serialize = "ROLE_HR")]
    Hr = 2,
    #[strum(to_string = "employee", serialize = "ROLE_EMPLOYEE")]
    Employee = 3,
    #[strum(to_string = "manager", serialize = "ROLE_MANAGER")]
    Manager = 4,
}

impl Role {
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Role::Admin),
            2 => Some(Role::Hr),
            3 => Some(Role::Employee),
            4 => Some(Role::Manager),
            _ => None,
        }
    }

    /// Managers, HR and admins may approve or reject leave requests.
    pub fn can_decide_leave(&self) -> bool {
        matches!(self, Role::Admin | Role::Hr | Role::Manager)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn from_id_maps_known_ids() {
        assert_eq!(Role::from_id(2), Some(Role::Hr));
        assert_eq!(Role::from_id(4), Some(Role::Manager));
        assert_eq!(Role::from_id(0), None);
        assert_eq!(Role::from_id(5), None);
    }

    #[test]
    fn parses_identity_role_names() {
        assert_eq!(Role::from_str("ROLE_RH").unwrap(), Role::Hr);
        assert_eq!(Role::from_str("role_manager").unwrap(), Role::Manager);
        assert_eq!(Role::from_str("employee").unwrap(), Role::Employee);
        assert!(Role::from_str("ROLE_GUEST").is_err());
    }

    #[test]
    fn only_employees_cannot_decide() {
        assert!(Role::Admin.can_decide_leave());
        assert!(Role::Hr.can_decide_leave());
        assert!(Role::Manager.can_decide_leave());
        assert!(!Role::Employee.can_decide_leave());
    }
}
