//! Application use cases.

pub mod export_testcases;
pub mod send_message;
