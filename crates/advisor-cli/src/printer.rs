//! Streams reasoning steps to the terminal

use advisor_runtime::{ExecutorEventHandler, ParseError};
use async_trait::async_trait;

/// Prints every step of a run to stdout as it happens
pub struct ConsolePrinter;

#[async_trait]
impl ExecutorEventHandler for ConsolePrinter {
    async fn on_thought(&self, iteration: usize, thought: &str) {
        if !thought.is_empty() {
            println!("[{iteration}] Thought: {thought}");
        }
    }

    async fn on_tool_start(&self, name: &str, input: &str) {
        println!("Action: {name}");
        println!("Action Input: {input}");
    }

    async fn on_tool_done(&self, name: &str, observation: Result<&str, &str>, duration_ms: u64) {
        match observation {
            Ok(text) => println!("Observation ({name}, {duration_ms}ms):\n{text}\n"),
            Err(text) => println!("Observation ({name} failed, {duration_ms}ms): {text}\n"),
        }
    }

    async fn on_parse_error(&self, error: &ParseError) {
        println!("Invalid model output: {}\n", error.observation());
    }

    async fn on_complete(&self, _output: &str) {
        println!("> Finished chain.\n");
    }
}
