//! Tool trait definition

use crate::ToolOutcome;
use async_trait::async_trait;

/// Trait for tools that the reasoning loop can invoke
///
/// Every tool has the same shape: one string in, one outcome out. The
/// model writes the input after `Action Input:` and reads the rendered
/// outcome back as the observation.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Run the tool with the model-supplied input
    ///
    /// Failures are reported through [`ToolOutcome::Failed`] rather than a
    /// `Result`, since a failing tool is something the model should see.
    async fn invoke(&self, input: &str) -> ToolOutcome;

    /// Get the tool's name
    ///
    /// Must be unique within a ToolRegistry and is matched verbatim against
    /// the model's `Action:` line.
    fn name(&self) -> &str;

    /// Get the tool's description
    ///
    /// This description helps the LLM understand when to use this tool
    fn description(&self) -> &str;
}
