//! Execution events
//!
//! Implement [`ExecutorEventHandler`] to watch the reasoning loop step by
//! step, e.g. to stream intermediate thoughts to a terminal.

use crate::parser::ParseError;
use async_trait::async_trait;

/// Callbacks fired by the executor; every method defaults to a no-op
#[async_trait]
pub trait ExecutorEventHandler: Send + Sync {
    /// Called with the model's reasoning for an iteration
    async fn on_thought(&self, _iteration: usize, _thought: &str) {}

    /// Called before a tool is invoked
    async fn on_tool_start(&self, _name: &str, _input: &str) {}

    /// Called after a tool returns
    ///
    /// `Ok` carries the observation of a tool that ran, `Err` the observation
    /// of one that failed or does not exist.
    async fn on_tool_done(
        &self,
        _name: &str,
        _observation: std::result::Result<&str, &str>,
        _duration_ms: u64,
    ) {
    }

    /// Called when the model output could not be parsed
    async fn on_parse_error(&self, _error: &ParseError) {}

    /// Called with the final answer (or the early-stop message)
    async fn on_complete(&self, _output: &str) {}

    /// Called when the run aborts with an error
    async fn on_error(&self, _error: &str) {}
}
