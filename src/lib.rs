//! Subsync - Stripe subscription reconciliation service
//!
//! Receives signed webhook events from Stripe, verifies their authenticity,
//! and reconciles subscription lifecycle state into a PostgreSQL database.
//! Also exposes a checkout endpoint that provisions Stripe customers and
//! starts subscription checkout sessions.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
