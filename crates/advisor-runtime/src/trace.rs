//! Reasoning trace recorded by the executor

use crate::parser::{AgentAction, EXCEPTION_ACTION, ParseError, extract_thought};

/// One completed THINKING → ACTING → OBSERVING cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceStep {
    pub thought: String,
    pub action: String,
    pub action_input: String,
    pub observation: String,
    /// Raw model completion for this step
    pub log: String,
}

impl TraceStep {
    /// Record a tool call and what it returned
    pub fn from_action(action: AgentAction, observation: String) -> Self {
        Self {
            thought: extract_thought(&action.log),
            action: action.tool,
            action_input: action.tool_input,
            observation,
            log: action.log,
        }
    }

    /// Record malformed model output as a corrective step
    pub fn from_parse_error(error: &ParseError) -> Self {
        let observation = error.observation();
        Self {
            thought: extract_thought(error.llm_output()),
            action: EXCEPTION_ACTION.to_string(),
            action_input: observation.clone(),
            observation,
            log: error.llm_output().to_string(),
        }
    }

    /// Whether this step came from a parse failure
    pub fn is_exception(&self) -> bool {
        self.action == EXCEPTION_ACTION
    }
}

/// Render the trace as the text that follows `Thought: ` in the prompt
pub fn scratchpad(steps: &[TraceStep]) -> String {
    steps.iter().fold(String::new(), |mut pad, step| {
        pad.push_str(&step.log);
        pad.push_str("\nObservation: ");
        pad.push_str(&step.observation);
        pad.push_str("\nThought: ");
        pad
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scratchpad_layout() {
        let step = TraceStep::from_action(
            AgentAction {
                tool: "Get Recent News".to_string(),
                tool_input: "Tesla".to_string(),
                log: "Check headlines\nAction: Get Recent News\nAction Input: Tesla".to_string(),
            },
            "Recent News:\n\n0. Tesla rallies\n".to_string(),
        );

        assert_eq!(step.thought, "Check headlines");
        assert_eq!(
            scratchpad(&[step]),
            "Check headlines\nAction: Get Recent News\nAction Input: Tesla\nObservation: Recent News:\n\n0. Tesla rallies\n\nThought: "
        );
        assert_eq!(scratchpad(&[]), "");
    }

    #[test]
    fn test_exception_step() {
        let error = ParseError::MissingAction {
            llm_output: "Tesla is great".to_string(),
        };
        let step = TraceStep::from_parse_error(&error);

        assert!(step.is_exception());
        assert_eq!(step.action, "_Exception");
        assert_eq!(step.observation, "Invalid Format: Missing 'Action:' after 'Thought:'");
        assert_eq!(step.log, "Tesla is great");
    }
}
