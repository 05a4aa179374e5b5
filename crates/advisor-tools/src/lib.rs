//! Tool framework for the stock advisor
//!
//! A tool takes exactly one string and produces one [`ToolOutcome`], which
//! the reasoning loop renders into an observation. Tools are registered
//! once at startup in a [`ToolRegistry`] and looked up by name.

pub mod outcome;
pub mod registry;
pub mod tool;

pub use outcome::ToolOutcome;
pub use registry::ToolRegistry;
pub use tool::Tool;
