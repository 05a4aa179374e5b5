//! Tool agent implementation (wraps AgentExecutor)

use crate::executor::{AgentExecutor, AgentRun};
use advisor_core::{Agent, Result};
use async_trait::async_trait;
use tracing::info;

/// An agent that answers through the ReAct loop
///
/// `ToolAgent` exposes the executor behind the [`Agent`] trait. The answer
/// it returns is the final answer, or the early-stopping output when the
/// iteration cap was reached.
///
/// # Example
///
/// ```no_run
/// use advisor_core::Agent;
/// use advisor_runtime::{AgentExecutor, ToolAgent};
/// # use std::sync::Arc;
///
/// # async fn example(provider: Arc<dyn advisor_llm::LLMProvider>) -> advisor_core::Result<()> {
/// let executor = AgentExecutor::builder().provider(provider).build()?;
/// let agent = ToolAgent::new(executor, "advisor");
///
/// let answer = agent.process("Is Tesla a good investment choice right now?".to_string()).await?;
/// println!("{answer}");
/// # Ok(())
/// # }
/// ```
pub struct ToolAgent {
    executor: AgentExecutor,
    name: String,
}

impl ToolAgent {
    /// Create a new tool agent
    pub fn new(executor: AgentExecutor, name: impl Into<String>) -> Self {
        Self {
            executor,
            name: name.into(),
        }
    }

    /// Run the loop and keep the trace
    pub async fn run(&self, input: impl Into<String>) -> Result<AgentRun> {
        self.executor.run(input).await
    }
}

#[async_trait]
impl Agent for ToolAgent {
    async fn process(&self, input: String) -> Result<String> {
        let run = self.executor.run(input).await?;
        info!(
            agent = %self.name,
            steps = run.trace.len(),
            finished = run.outcome.is_finished(),
            "Agent run complete"
        );
        Ok(run.outcome.into_output())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
