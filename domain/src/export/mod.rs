//! Test-case export.
//!
//! Replies in the test-case-generation scenario carry a markdown table;
//! [`table`] extracts it and serializes it to CSV for spreadsheet import.

pub mod table;
