//! Infrastructure implementations.
//!
//! Contains the definition parser port, its JSON implementation, source
//! discovery, the flag-backed condition evaluator and configuration.

pub mod config;
pub mod flags;
pub mod json_definitions;
pub mod ports;
pub mod sources;
