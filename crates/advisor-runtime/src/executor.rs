//! Agent executor for the ReAct reasoning loop
//!
//! Each iteration:
//! 1. Render the prompt with the question and the scratchpad so far
//! 2. Ask the model for the next step (stopping before it invents an observation)
//! 3. Parse the step: a final answer ends the run, an action invokes a tool,
//!    malformed output becomes a corrective observation
//! 4. Append the step to the trace and loop back
//!
//! When the iteration cap is reached the configured [`EarlyStopping`] policy
//! decides what the caller gets back.

use crate::events::ExecutorEventHandler;
use crate::parser::{self, AgentAction, AgentStep, extract_thought};
use crate::prompt::AdvisorPrompt;
use crate::trace::{TraceStep, scratchpad};
use advisor_core::{Error, Result};
use advisor_llm::{CompletionRequest, LLMProvider, Message};
use advisor_tools::ToolRegistry;
use advisor_utils::{AdvisorConfig, EarlyStopping};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Stop sequences that keep the model from writing its own observations
pub const DEFAULT_STOP_SEQUENCES: [&str; 2] = ["\nObservation:", "\n\tObservation:"];

/// Returned by [`EarlyStopping::Force`] when the iteration cap is hit
pub const EARLY_STOP_MESSAGE: &str = "Agent stopped due to iteration limit or time limit.";

const FINAL_ANSWER_HINT: &str = "\n\nI now need to return a final answer based on the previous steps:";

/// Configuration for agent execution
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Maximum number of iterations (prevents infinite loops)
    pub max_iterations: usize,

    /// Model to use
    pub model: String,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Temperature
    pub temperature: f32,

    /// What to do once `max_iterations` is reached
    pub early_stopping: EarlyStopping,

    /// Stop sequences sent with every request
    pub stop_sequences: Vec<String>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self::from(&AdvisorConfig::default())
    }
}

impl From<&AdvisorConfig> for ExecutorConfig {
    fn from(config: &AdvisorConfig) -> Self {
        Self {
            max_iterations: config.max_iterations,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            early_stopping: config.early_stopping,
            stop_sequences: DEFAULT_STOP_SEQUENCES.iter().map(ToString::to_string).collect(),
        }
    }
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentOutcome {
    /// The model produced a final answer
    Finished(String),
    /// The iteration cap was hit; carries the early-stopping output
    IterationLimit(String),
}

impl AgentOutcome {
    /// The text to show the user
    pub fn output(&self) -> &str {
        match self {
            Self::Finished(text) | Self::IterationLimit(text) => text,
        }
    }

    pub fn into_output(self) -> String {
        match self {
            Self::Finished(text) | Self::IterationLimit(text) => text,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished(_))
    }
}

/// Result of one run: the outcome plus the steps that led to it
#[derive(Debug, Clone)]
pub struct AgentRun {
    pub outcome: AgentOutcome,
    pub trace: Vec<TraceStep>,
}

/// Executes the ReAct loop: prompt → model → parse → tool → loop back
pub struct AgentExecutor {
    provider: Arc<dyn LLMProvider>,
    tool_registry: Arc<ToolRegistry>,
    prompt: AdvisorPrompt,
    config: ExecutorConfig,
    event_handler: Option<Arc<dyn ExecutorEventHandler>>,
}

impl AgentExecutor {
    /// Create a new agent executor
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        tool_registry: Arc<ToolRegistry>,
        config: ExecutorConfig,
    ) -> Self {
        Self {
            provider,
            tool_registry,
            prompt: AdvisorPrompt::default(),
            config,
            event_handler: None,
        }
    }

    /// Create a builder
    pub fn builder() -> AgentExecutorBuilder {
        AgentExecutorBuilder::new()
    }

    /// Set the event handler for receiving execution events
    pub fn with_event_handler(mut self, handler: Arc<dyn ExecutorEventHandler>) -> Self {
        self.event_handler = Some(handler);
        self
    }

    /// Run the loop for one question
    pub async fn run(&self, input: impl Into<String>) -> Result<AgentRun> {
        self.run_with_handler(input, self.event_handler.clone())
            .await
    }

    /// Run the loop with a per-request event handler
    pub async fn run_with_handler(
        &self,
        input: impl Into<String>,
        event_handler: Option<Arc<dyn ExecutorEventHandler>>,
    ) -> Result<AgentRun> {
        let input = input.into();
        let result = self.run_loop(&input, event_handler.as_ref()).await;

        if let (Err(e), Some(handler)) = (&result, &event_handler) {
            handler.on_error(&e.to_string()).await;
        }

        result
    }

    async fn run_loop(
        &self,
        input: &str,
        event_handler: Option<&Arc<dyn ExecutorEventHandler>>,
    ) -> Result<AgentRun> {
        let mut trace: Vec<TraceStep> = Vec::new();

        while trace.len() < self.config.max_iterations {
            let iteration = trace.len() + 1;
            info!(
                iteration = iteration,
                max_iterations = self.config.max_iterations,
                "Agent iteration started"
            );

            let text = self.plan(input, &scratchpad(&trace)).await?;

            match parser::parse(&text) {
                Ok(AgentStep::Finish(finish)) => {
                    info!(
                        iteration = iteration,
                        response_length = finish.output.len(),
                        "Agent produced a final answer"
                    );

                    if let Some(handler) = event_handler {
                        let thought = extract_thought(&finish.log);
                        if !thought.is_empty() {
                            handler.on_thought(iteration, &thought).await;
                        }
                        handler.on_complete(&finish.output).await;
                    }

                    return Ok(AgentRun {
                        outcome: AgentOutcome::Finished(finish.output),
                        trace,
                    });
                }

                Ok(AgentStep::Action(action)) => {
                    if let Some(handler) = event_handler {
                        let thought = extract_thought(&action.log);
                        if !thought.is_empty() {
                            handler.on_thought(iteration, &thought).await;
                        }
                    }

                    let observation = self.take_action(&action, event_handler).await;
                    trace.push(TraceStep::from_action(action, observation));
                }

                Err(error) => {
                    warn!(
                        iteration = iteration,
                        error = %error,
                        "Model output could not be parsed, sending correction"
                    );

                    if let Some(handler) = event_handler {
                        handler.on_parse_error(&error).await;
                    }

                    trace.push(TraceStep::from_parse_error(&error));
                }
            }
        }

        warn!(
            max_iterations = self.config.max_iterations,
            policy = %self.config.early_stopping,
            "Max iterations reached, stopping"
        );

        let output = self.stop_early(input, &trace).await?;

        if let Some(handler) = event_handler {
            handler.on_complete(&output).await;
        }

        Ok(AgentRun {
            outcome: AgentOutcome::IterationLimit(output),
            trace,
        })
    }

    /// Ask the model for the next step
    async fn plan(&self, input: &str, agent_scratchpad: &str) -> Result<String> {
        let prompt = self
            .prompt
            .render(input, &self.tool_registry, agent_scratchpad)?;

        info!(
            model = %self.config.model,
            max_tokens = self.config.max_tokens,
            temperature = self.config.temperature,
            tool_count = self.tool_registry.len(),
            "Sending request to LLM"
        );

        let request = CompletionRequest::builder(&self.config.model)
            .add_message(Message::user(prompt))
            .max_tokens(self.config.max_tokens)
            .temperature(self.config.temperature)
            .stop_sequences(self.config.stop_sequences.clone())
            .build();

        let response = self
            .provider
            .complete(request)
            .await
            .map_err(|e| Error::ModelFailed(e.to_string()))?;

        info!(
            stop_reason = ?response.stop_reason,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "LLM response received"
        );
        debug!(
            response_preview = %preview(response.message.text(), 300),
            "LLM response content preview"
        );

        Ok(response.message.text().to_string())
    }

    /// Invoke the requested tool and render its observation
    async fn take_action(
        &self,
        action: &AgentAction,
        event_handler: Option<&Arc<dyn ExecutorEventHandler>>,
    ) -> String {
        info!(
            tool_name = %action.tool,
            input_preview = %preview(&action.tool_input, 500),
            "Executing tool"
        );

        if let Some(handler) = event_handler {
            handler.on_tool_start(&action.tool, &action.tool_input).await;
        }

        let Some(tool) = self.tool_registry.get(&action.tool) else {
            let observation = format!(
                "{} is not a valid tool, try one of [{}].",
                action.tool,
                self.tool_registry.names().join(", ")
            );
            warn!(tool_name = %action.tool, "Model requested an unknown tool");

            if let Some(handler) = event_handler {
                handler.on_tool_done(&action.tool, Err(&observation), 0).await;
            }
            return observation;
        };

        let start_time = Instant::now();
        let outcome = tool.invoke(&action.tool_input).await;
        let duration_ms = start_time.elapsed().as_millis() as u64;
        let observation = outcome.to_observation(&action.tool_input);

        if outcome.is_failure() {
            warn!(
                tool_name = %action.tool,
                duration_ms = duration_ms,
                error = %observation,
                "Tool execution failed"
            );
        } else {
            info!(
                tool_name = %action.tool,
                duration_ms = duration_ms,
                result_length = observation.len(),
                result_preview = %preview(&observation, 500),
                "Tool execution succeeded"
            );
        }

        if let Some(handler) = event_handler {
            let result = if outcome.is_failure() {
                Err(observation.as_str())
            } else {
                Ok(observation.as_str())
            };
            handler.on_tool_done(&action.tool, result, duration_ms).await;
        }

        observation
    }

    /// Produce the output for a run that hit the iteration cap
    async fn stop_early(&self, input: &str, trace: &[TraceStep]) -> Result<String> {
        match self.config.early_stopping {
            EarlyStopping::Force => Ok(EARLY_STOP_MESSAGE.to_string()),
            EarlyStopping::Generate => {
                let agent_scratchpad = scratchpad(trace) + FINAL_ANSWER_HINT;
                let text = self.plan(input, &agent_scratchpad).await?;

                Ok(match parser::parse(&text) {
                    Ok(AgentStep::Finish(finish)) => finish.output,
                    _ => text,
                })
            }
        }
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Builder for AgentExecutor
pub struct AgentExecutorBuilder {
    provider: Option<Arc<dyn LLMProvider>>,
    tool_registry: Arc<ToolRegistry>,
    config: ExecutorConfig,
    event_handler: Option<Arc<dyn ExecutorEventHandler>>,
}

impl AgentExecutorBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            provider: None,
            tool_registry: Arc::new(ToolRegistry::new()),
            config: ExecutorConfig::default(),
            event_handler: None,
        }
    }

    /// Set the LLM provider
    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the tool registry
    pub fn tool_registry(mut self, registry: Arc<ToolRegistry>) -> Self {
        self.tool_registry = registry;
        self
    }

    /// Set the full configuration
    pub fn config(mut self, config: ExecutorConfig) -> Self {
        self.config = config;
        self
    }

    /// Set maximum iterations
    pub fn max_iterations(mut self, max: usize) -> Self {
        self.config.max_iterations = max;
        self
    }

    /// Set the model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set max tokens
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.config.max_tokens = max_tokens;
        self
    }

    /// Set temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = temperature;
        self
    }

    /// Set the early stopping policy
    pub fn early_stopping(mut self, policy: EarlyStopping) -> Self {
        self.config.early_stopping = policy;
        self
    }

    /// Set the event handler
    pub fn event_handler(mut self, handler: Arc<dyn ExecutorEventHandler>) -> Self {
        self.event_handler = Some(handler);
        self
    }

    /// Build the executor
    pub fn build(self) -> Result<AgentExecutor> {
        let provider = self
            .provider
            .ok_or_else(|| Error::InitializationFailed("Provider not set".to_string()))?;

        Ok(AgentExecutor {
            provider,
            tool_registry: self.tool_registry,
            prompt: AdvisorPrompt::default(),
            config: self.config,
            event_handler: self.event_handler,
        })
    }
}

impl Default for AgentExecutorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParseError;
    use advisor_llm::{CompletionResponse, LLMError};
    use advisor_tools::{Tool, ToolOutcome};
    use async_trait::async_trait;
    use mockall::mock;
    use std::sync::Mutex;

    mock! {
        pub Provider {}

        #[async_trait]
        impl LLMProvider for Provider {
            async fn complete(&self, request: CompletionRequest) -> advisor_llm::Result<CompletionResponse>;
            fn name(&self) -> &'static str;
        }
    }

    /// Replays canned completions; repeats the last one once the script runs out
    struct ScriptedProvider {
        script: Vec<String>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedProvider {
        fn new(script: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                script: script.iter().map(ToString::to_string).collect(),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }

        fn prompt(&self, index: usize) -> String {
            self.prompts.lock().unwrap()[index].clone()
        }
    }

    #[async_trait]
    impl LLMProvider for ScriptedProvider {
        async fn complete(&self, request: CompletionRequest) -> advisor_llm::Result<CompletionResponse> {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(request.messages[0].text().to_string());
            let index = (prompts.len() - 1).min(self.script.len() - 1);
            Ok(CompletionResponse::text(self.script[index].clone()))
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    struct RecordingTool {
        name: &'static str,
        outcome: ToolOutcome,
        inputs: Mutex<Vec<String>>,
    }

    impl RecordingTool {
        fn new(name: &'static str, outcome: ToolOutcome) -> Arc<Self> {
            Arc::new(Self {
                name,
                outcome,
                inputs: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Tool for RecordingTool {
        async fn invoke(&self, input: &str) -> ToolOutcome {
            self.inputs.lock().unwrap().push(input.to_string());
            self.outcome.clone()
        }

        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "test tool"
        }
    }

    #[derive(Default)]
    struct RecordingHandler {
        events: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ExecutorEventHandler for RecordingHandler {
        async fn on_thought(&self, iteration: usize, thought: &str) {
            self.events.lock().unwrap().push(format!("thought {iteration}: {thought}"));
        }

        async fn on_tool_start(&self, name: &str, input: &str) {
            self.events.lock().unwrap().push(format!("start {name}({input})"));
        }

        async fn on_tool_done(&self, name: &str, observation: std::result::Result<&str, &str>, _duration_ms: u64) {
            let status = if observation.is_ok() { "ok" } else { "err" };
            self.events.lock().unwrap().push(format!("done {name} {status}"));
        }

        async fn on_parse_error(&self, _error: &ParseError) {
            self.events.lock().unwrap().push("parse error".to_string());
        }

        async fn on_complete(&self, output: &str) {
            self.events.lock().unwrap().push(format!("complete: {output}"));
        }

        async fn on_error(&self, error: &str) {
            self.events.lock().unwrap().push(format!("error: {error}"));
        }
    }

    const PRICE_STEP: &str =
        "I should check the price history.\nAction: Get Stock Historical Price\nAction Input: TSLA";

    fn executor(provider: Arc<dyn LLMProvider>, tools: Vec<Arc<dyn Tool>>) -> AgentExecutorBuilder {
        let registry = tools
            .into_iter()
            .fold(ToolRegistry::new(), ToolRegistry::with_tool);
        AgentExecutor::builder()
            .provider(provider)
            .tool_registry(Arc::new(registry))
    }

    #[test]
    fn test_default_config() {
        let config = ExecutorConfig::default();
        assert_eq!(config.max_iterations, 15);
        assert_eq!(config.model, "llama-3.3-70b-versatile");
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.early_stopping, EarlyStopping::Force);
        assert_eq!(config.stop_sequences, vec!["\nObservation:", "\n\tObservation:"]);
    }

    #[test]
    fn test_builder_requires_provider() {
        let result = AgentExecutorBuilder::new().max_iterations(5).build();
        assert!(matches!(result, Err(Error::InitializationFailed(_))));
    }

    #[tokio::test]
    async fn test_tool_call_then_final_answer() {
        let provider = ScriptedProvider::new(&[PRICE_STEP, "I now know.\nFinal Answer: Buy TSLA."]);
        let prices = RecordingTool::new(
            "Get Stock Historical Price",
            ToolOutcome::Data("Date Close\n2024-01-02 248.42".to_string()),
        );

        let run = executor(provider.clone(), vec![prices.clone()])
            .build()
            .unwrap()
            .run("Is Tesla a good investment choice right now?")
            .await
            .unwrap();

        assert_eq!(run.outcome, AgentOutcome::Finished("Buy TSLA.".to_string()));
        assert_eq!(run.trace.len(), 1);
        assert_eq!(run.trace[0].action, "Get Stock Historical Price");
        assert_eq!(run.trace[0].thought, "I should check the price history.");
        assert_eq!(*prices.inputs.lock().unwrap(), vec!["TSLA".to_string()]);

        assert_eq!(provider.calls(), 2);
        assert!(provider.prompt(0).ends_with(
            "Question: Is Tesla a good investment choice right now?\nThought: "
        ));
        assert!(provider.prompt(1).ends_with(&format!(
            "{PRICE_STEP}\nObservation: Date Close\n2024-01-02 248.42\nThought: "
        )));
    }

    #[tokio::test]
    async fn test_force_stop_respects_iteration_cap() {
        let provider = ScriptedProvider::new(&[PRICE_STEP]);
        let prices = RecordingTool::new("Get Stock Historical Price", ToolOutcome::Data("1".to_string()));

        let run = executor(provider.clone(), vec![prices])
            .max_iterations(3)
            .build()
            .unwrap()
            .run("Is Tesla a good investment choice right now?")
            .await
            .unwrap();

        assert_eq!(
            run.outcome,
            AgentOutcome::IterationLimit(EARLY_STOP_MESSAGE.to_string())
        );
        assert_eq!(run.trace.len(), 3);
        assert_eq!(provider.calls(), 3);
    }

    #[tokio::test]
    async fn test_generate_stop_makes_one_final_call() {
        let provider = ScriptedProvider::new(&[PRICE_STEP, PRICE_STEP, "Final Answer: Hold for now."]);
        let prices = RecordingTool::new("Get Stock Historical Price", ToolOutcome::Data("1".to_string()));

        let run = executor(provider.clone(), vec![prices])
            .max_iterations(2)
            .early_stopping(EarlyStopping::Generate)
            .build()
            .unwrap()
            .run("Is Tesla a good investment choice right now?")
            .await
            .unwrap();

        assert_eq!(
            run.outcome,
            AgentOutcome::IterationLimit("Hold for now.".to_string())
        );
        assert_eq!(run.trace.len(), 2);
        assert_eq!(provider.calls(), 3);
        assert!(provider.prompt(2).ends_with(FINAL_ANSWER_HINT));
    }

    #[tokio::test]
    async fn test_generate_stop_falls_back_to_raw_text() {
        let provider = ScriptedProvider::new(&[PRICE_STEP, "Probably a hold."]);
        let prices = RecordingTool::new("Get Stock Historical Price", ToolOutcome::Data("1".to_string()));

        let run = executor(provider, vec![prices])
            .max_iterations(1)
            .early_stopping(EarlyStopping::Generate)
            .build()
            .unwrap()
            .run("Q")
            .await
            .unwrap();

        assert_eq!(run.outcome.output(), "Probably a hold.");
        assert!(!run.outcome.is_finished());
    }

    #[tokio::test]
    async fn test_unknown_tool_becomes_observation() {
        let provider = ScriptedProvider::new(&[
            "Action: Get Stock Price\nAction Input: TSLA",
            "Final Answer: Hold",
        ]);
        let news = RecordingTool::new("Get Recent News", ToolOutcome::Empty);
        let search = RecordingTool::new("Stock Ticker Search", ToolOutcome::Empty);

        let run = executor(provider, vec![news, search])
            .build()
            .unwrap()
            .run("Q")
            .await
            .unwrap();

        assert_eq!(
            run.trace[0].observation,
            "Get Stock Price is not a valid tool, try one of [Get Recent News, Stock Ticker Search]."
        );
        assert!(run.outcome.is_finished());
    }

    #[tokio::test]
    async fn test_parse_error_is_recovered() {
        let provider = ScriptedProvider::new(&["Tesla looks strong.", "Final Answer: Buy"]);

        let run = executor(provider.clone(), vec![])
            .build()
            .unwrap()
            .run("Q")
            .await
            .unwrap();

        assert_eq!(run.trace.len(), 1);
        assert!(run.trace[0].is_exception());
        assert!(provider.prompt(1).ends_with(
            "Tesla looks strong.\nObservation: Invalid Format: Missing 'Action:' after 'Thought:'\nThought: "
        ));
        assert_eq!(run.outcome.output(), "Buy");
    }

    #[tokio::test]
    async fn test_empty_and_failed_tools_are_distinguished() {
        let provider = ScriptedProvider::new(&[
            "Action: Get Recent News\nAction Input: Tesla",
            "Action: Get Financial Statements\nAction Input: TSLA",
            "Final Answer: Hold",
        ]);
        let news = RecordingTool::new("Get Recent News", ToolOutcome::Empty);
        let financials = RecordingTool::new(
            "Get Financial Statements",
            ToolOutcome::Failed("HTTP 404".to_string()),
        );

        let run = executor(provider, vec![news, financials])
            .build()
            .unwrap()
            .run("Q")
            .await
            .unwrap();

        assert_eq!(run.trace[0].observation, "No data found for input 'Tesla'.");
        assert_eq!(run.trace[1].observation, "Error: HTTP 404");
    }

    #[tokio::test]
    async fn test_events_are_streamed() {
        let provider = ScriptedProvider::new(&[
            PRICE_STEP,
            "garbled",
            "Action: Nope\nAction Input: x",
            "Done.\nFinal Answer: Sell",
        ]);
        let prices = RecordingTool::new("Get Stock Historical Price", ToolOutcome::Data("1".to_string()));
        let handler = Arc::new(RecordingHandler::default());

        executor(provider, vec![prices])
            .event_handler(handler.clone())
            .build()
            .unwrap()
            .run("Q")
            .await
            .unwrap();

        assert_eq!(
            *handler.events.lock().unwrap(),
            vec![
                "thought 1: I should check the price history.",
                "start Get Stock Historical Price(TSLA)",
                "done Get Stock Historical Price ok",
                "parse error",
                "start Nope(x)",
                "done Nope err",
                "thought 4: Done.",
                "complete: Sell",
            ]
        );
    }

    #[tokio::test]
    async fn test_model_error_aborts_run() {
        let mut provider = MockProvider::new();
        provider
            .expect_complete()
            .times(1)
            .returning(|_| Err(LLMError::AuthenticationFailed));
        let handler = Arc::new(RecordingHandler::default());

        let result = executor(Arc::new(provider), vec![])
            .event_handler(handler.clone())
            .build()
            .unwrap()
            .run("Q")
            .await;

        assert!(matches!(result, Err(Error::ModelFailed(_))));
        let events = handler.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert!(events[0].starts_with("error: Language model request failed"));
    }

    #[tokio::test]
    async fn test_request_parameters() {
        let mut provider = MockProvider::new();
        provider
            .expect_complete()
            .withf(|request| {
                request.model == "llama-3.3-70b-versatile"
                    && request.temperature == Some(0.0)
                    && request.stop_sequences.as_deref()
                        == Some(&["\nObservation:".to_string(), "\n\tObservation:".to_string()][..])
                    && request.messages.len() == 1
                    && request.messages[0].text().contains("Question: Is Tesla a good investment choice right now?")
            })
            .times(1)
            .returning(|_| Ok(CompletionResponse::text("Final Answer: Hold")));

        let run = executor(Arc::new(provider), vec![])
            .build()
            .unwrap()
            .run("Is Tesla a good investment choice right now?")
            .await
            .unwrap();

        assert_eq!(run.outcome, AgentOutcome::Finished("Hold".to_string()));
    }
}
