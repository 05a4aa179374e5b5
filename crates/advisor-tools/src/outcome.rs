//! Tool outcomes and their rendering as observations

/// Result of a single tool invocation
///
/// Keeps "the tool worked but found nothing" apart from "the tool broke",
/// so the model is told which one happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    /// The tool produced data
    Data(String),
    /// The tool ran successfully but found nothing
    Empty,
    /// The tool failed (network error, unknown ticker, ...)
    Failed(String),
}

impl ToolOutcome {
    /// Wrap tool text, treating blank output as [`ToolOutcome::Empty`]
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim().is_empty() {
            Self::Empty
        } else {
            Self::Data(text)
        }
    }

    /// Whether the tool failed
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Render the outcome as the observation text fed back to the model
    pub fn to_observation(&self, input: &str) -> String {
        match self {
            Self::Data(text) => text.clone(),
            Self::Empty => format!("No data found for input '{input}'."),
            Self::Failed(error) => format!("Error: {error}"),
        }
    }
}
