//! Financial-advisor ReAct prompt
//!
//! The prompt lists the registered tools, spells out the research steps and
//! the ReAct answer format, then closes with the question and the scratchpad.

use advisor_core::{Error, Result};
use advisor_tools::ToolRegistry;
use minijinja::{Environment, context};
use serde::Serialize;

/// Default financial-advisor template
pub const DEFAULT_TEMPLATE: &str = r#"You are a financial advisor. Provide stock recommendations for the given query.
Answer the questions as best as you can. You have access to the following tools:

{% for tool in tools -%}
- {{ tool.name }}: {{ tool.description }}
{% endfor %}
Steps to follow:
1. Identify the company name and search for the "company name + stock ticker."
2. Use "Get Stock Historical Price" to get historical prices.
3. Use "Get Financial Statements" to get financial data.
4. Use "Get Recent News" to search for stock-related news.
5. Analyze the stock and give a detailed recommendation: Buy, Hold, or Sell.

Use the following format:

Question: the input question you must answer
Thought: you should always think about what to do
Action: the action to take, should be one of [{{ tool_names }}]
Action Input: the input to the action, e.g. company name or stock ticker
Observation: the result of the action
... (this Thought/Action/Action Input/Observation can repeat N times)
Thought: I now know the final answer
Final Answer: the stock recommendation (Buy, Hold, or Sell) with justification

Begin!

Question: {{ input }}
Thought: {{ agent_scratchpad }}"#;

#[derive(Serialize)]
struct ToolView<'a> {
    name: &'a str,
    description: &'a str,
}

/// Renders the ReAct prompt for one reasoning step
#[derive(Debug, Clone)]
pub struct AdvisorPrompt {
    template: String,
}

impl Default for AdvisorPrompt {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

impl AdvisorPrompt {
    /// Use a custom template
    ///
    /// The template sees `tools` (a list of `name`/`description`),
    /// `tool_names`, `input` and `agent_scratchpad`.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Raw template text
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Render the prompt for a question and the scratchpad so far
    pub fn render(&self, input: &str, tools: &ToolRegistry, scratchpad: &str) -> Result<String> {
        let tool_views: Vec<ToolView<'_>> = tools
            .list_tools()
            .iter()
            .map(|tool| ToolView {
                name: tool.name(),
                description: tool.description(),
            })
            .collect();

        let env = Environment::new();
        env.render_str(
            &self.template,
            context! {
                tools => tool_views,
                tool_names => tools.names().join(", "),
                input => input,
                agent_scratchpad => scratchpad,
            },
        )
        .map_err(|e| Error::PromptFailed(e.to_string()))
    }
}
