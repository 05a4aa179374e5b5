//! ReAct output parser
//!
//! Turns one raw model completion into either a tool call or a final answer.
//! The model is prompted to answer in the form
//!
//! ```text
//! Thought: ...
//! Action: <tool name>
//! Action Input: <tool input>
//! ```
//!
//! or to finish with `Final Answer: ...`.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Marker that introduces the final answer
pub const FINAL_ANSWER_MARKER: &str = "Final Answer:";

/// Action name recorded for steps that came from a parse failure
pub const EXCEPTION_ACTION: &str = "_Exception";

static ACTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)Action\s*\d*\s*:(.*?)Action\s*\d*\s*Input\s*\d*\s*:(.*)")
        .expect("action regex is valid")
});

static ACTION_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Action\s*\d*\s*:").expect("action label regex is valid")
});

static ACTION_INPUT_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Action\s*\d*\s*Input\s*\d*\s*:")
        .expect("action input regex is valid")
});

/// A tool call requested by the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentAction {
    /// Tool name as written by the model
    pub tool: String,
    /// Single string input for the tool
    pub tool_input: String,
    /// The full completion the action was parsed from
    pub log: String,
}

/// The model's final answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentFinish {
    pub output: String,
    pub log: String,
}

/// What one completion asks the loop to do next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentStep {
    Action(AgentAction),
    Finish(AgentFinish),
}

/// Malformed model output
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Parsing LLM output produced both a final answer and a parse-able action")]
    FinalAnswerAndAction { llm_output: String },

    #[error("Invalid Format: Missing 'Action:' after 'Thought:'")]
    MissingAction { llm_output: String },

    #[error("Invalid Format: Missing 'Action Input:' after 'Action:'")]
    MissingActionInput { llm_output: String },

    #[error("Could not parse LLM output: `{llm_output}`")]
    Unparseable { llm_output: String },
}

impl ParseError {
    /// The raw completion that failed to parse
    pub fn llm_output(&self) -> &str {
        match self {
            Self::FinalAnswerAndAction { llm_output }
            | Self::MissingAction { llm_output }
            | Self::MissingActionInput { llm_output }
            | Self::Unparseable { llm_output } => llm_output,
        }
    }

    /// Corrective observation fed back to the model
    pub fn observation(&self) -> String {
        match self {
            Self::MissingAction { .. } | Self::MissingActionInput { .. } => self.to_string(),
            Self::FinalAnswerAndAction { .. } | Self::Unparseable { .. } => {
                "Invalid or incomplete response".to_string()
            }
        }
    }
}

/// Parse one model completion
pub fn parse(text: &str) -> Result<AgentStep, ParseError> {
    let includes_answer = text.contains(FINAL_ANSWER_MARKER);

    if let Some(caps) = ACTION_RE.captures(text) {
        if includes_answer {
            return Err(ParseError::FinalAnswerAndAction {
                llm_output: text.to_string(),
            });
        }

        let tool = caps.get(1).map_or("", |m| m.as_str()).trim().to_string();
        let raw_input = caps.get(2).map_or("", |m| m.as_str());

        return Ok(AgentStep::Action(AgentAction {
            tool,
            tool_input: clean_tool_input(raw_input),
            log: text.to_string(),
        }));
    }

    if includes_answer {
        let output = text
            .rsplit(FINAL_ANSWER_MARKER)
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();
        return Ok(AgentStep::Finish(AgentFinish {
            output,
            log: text.to_string(),
        }));
    }

    let llm_output = text.to_string();
    if !ACTION_LABEL_RE.is_match(text) {
        Err(ParseError::MissingAction { llm_output })
    } else if !ACTION_INPUT_LABEL_RE.is_match(text) {
        Err(ParseError::MissingActionInput { llm_output })
    } else {
        Err(ParseError::Unparseable { llm_output })
    }
}

/// Trim whitespace and quotes, and drop anything the model wrote past its turn
fn clean_tool_input(raw: &str) -> String {
    let input = raw.find("Observation:").map_or(raw, |idx| &raw[..idx]);
    input.trim().trim_matches('"').trim().to_string()
}

/// The free-text reasoning that precedes the action or final answer
pub fn extract_thought(log: &str) -> String {
    let end = [
        ACTION_LABEL_RE.find(log).map(|m| m.start()),
        ACTION_INPUT_LABEL_RE.find(log).map(|m| m.start()),
        log.find(FINAL_ANSWER_MARKER),
    ]
    .into_iter()
    .flatten()
    .min()
    .unwrap_or(log.len());

    let thought = log[..end].trim();
    thought
        .strip_prefix("Thought:")
        .unwrap_or(thought)
        .trim()
        .to_string()
}
