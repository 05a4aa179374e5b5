//! Agent implementations backed by the executor

pub mod tool;

pub use tool::ToolAgent;
