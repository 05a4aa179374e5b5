//! Core Agent trait definition

use crate::Result;
use async_trait::async_trait;

/// Core trait that all agents must implement
///
/// The input/output types are plain strings: a question goes in, a final
/// answer comes out. Anything richer (intermediate steps, termination
/// reason) is exposed by the concrete agent type.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Process input and return output
    async fn process(&self, input: String) -> Result<String>;

    /// Get the agent's name
    fn name(&self) -> &str;
}
