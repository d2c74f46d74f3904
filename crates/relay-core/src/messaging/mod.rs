//! Messenger-facing model: normalized inbound updates, outbound calls, and the port.

pub mod port;
pub mod types;
