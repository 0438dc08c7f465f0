pub mod basic_auth;
pub mod https;
pub mod rate_limit;
pub mod request_log;
