pub mod balance_cache;
pub mod request_filter;
pub mod working_days;
