pub mod auth;
pub mod cors;
pub mod http;
pub mod recover;
pub mod request_log;
