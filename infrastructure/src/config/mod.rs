//! Configuration loading.

mod file_config;
mod loader;

pub use file_config::{FileChatConfig, FileConfig, FileReplConfig, FileServerConfig};
pub use loader::ConfigLoader;
