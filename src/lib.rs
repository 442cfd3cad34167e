//! Leave request rules: working-day counting, request validation and
//! decisions, and leave-balance bookkeeping.

pub mod config;
pub mod error;
pub mod model;
pub mod service;
pub mod telemetry;
pub mod utils;

pub use error::{LeaveError, LeaveResult};
pub use model::leave_balance::LeaveBalance;
pub use model::leave_request::{LeaveDraft, LeaveRequest, LeaveStatus, LeaveType};
pub use model::role::Role;
pub use service::leave_workflow::LeaveWorkflow;
pub use utils::working_days::count_working_days;
