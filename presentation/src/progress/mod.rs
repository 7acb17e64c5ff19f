//! Streaming reply rendering.

pub mod printer;
