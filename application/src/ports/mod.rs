//! Ports — interfaces implemented by the infrastructure and presentation
//! layers.

pub mod chat_gateway;
pub mod reply_observer;
