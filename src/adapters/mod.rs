//! Infrastructure adapters implementing the outbound and inbound ports.

pub mod http;
pub mod postgres;
pub mod stripe;
