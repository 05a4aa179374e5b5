//! Reasoning loop for the stock advisor
//!
//! This crate provides the ReAct executor that alternates between asking the
//! model for its next step and running the requested tool, along with the
//! output parser, the prompt, the reasoning trace and an [`Agent`] wrapper.
//!
//! [`Agent`]: advisor_core::Agent

pub mod agents;
pub mod events;
pub mod executor;
pub mod parser;
pub mod prompt;
pub mod trace;

// Re-export key types
pub use agents::ToolAgent;
pub use events::ExecutorEventHandler;
pub use executor::{
    AgentExecutor, AgentExecutorBuilder, AgentOutcome, AgentRun, DEFAULT_STOP_SEQUENCES,
    EARLY_STOP_MESSAGE, ExecutorConfig,
};
pub use parser::{AgentAction, AgentFinish, AgentStep, ParseError};
pub use prompt::AdvisorPrompt;
pub use trace::TraceStep;
