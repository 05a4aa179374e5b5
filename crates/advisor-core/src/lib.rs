//! Core abstractions for the stock advisor
//!
//! This crate defines the traits and error types shared by the LLM client,
//! the tool registry, the reasoning loop and the interaction shell.

pub mod agent;
pub mod error;

pub use agent::Agent;
pub use error::{Error, Result};
