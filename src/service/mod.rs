pub mod balance_store;
pub mod leave_workflow;
pub mod reconciler;
