//! Infrastructure implementations.
//!
//! Port traits, their storage adapters, configuration and logging setup.

pub mod config;
pub mod persistence;
pub mod ports;
pub mod telemetry;
