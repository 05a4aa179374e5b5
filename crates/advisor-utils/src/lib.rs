//! Shared utilities for the stock advisor
//!
//! This crate provides logging setup and the session configuration shared
//! across the workspace.

pub mod config;
pub mod logging;

pub use config::{AdvisorConfig, AdvisorConfigBuilder, ConfigError, EarlyStopping};
pub use logging::init_tracing;
