//! Stock advisor shell
//!
//! Asks a Groq-hosted model whether a stock is worth buying. The model
//! reasons in ReAct steps and calls the market data tools along the way.
//!
//! # Usage
//!
//! ```bash
//! export GROQ_API_KEY="gsk-..."
//!
//! # Interactive
//! cargo run --bin advisor
//!
//! # One question, no step streaming
//! cargo run --bin advisor -- --question Tesla --quiet
//! ```

mod printer;
mod shell;

use advisor_llm::providers::{GroqConfig, GroqProvider};
use advisor_market::{MarketConfig, market_registry};
use advisor_runtime::{AgentExecutor, ExecutorConfig, ToolAgent};
use advisor_utils::{AdvisorConfig, EarlyStopping};
use anyhow::Context;
use clap::Parser;
use printer::ConsolePrinter;
use shell::Shell;
use std::io;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "advisor")]
#[command(about = "Buy, sell or hold recommendations from a ReAct agent", long_about = None)]
struct Args {
    /// Groq API key
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model name (defaults to GROQ_MODEL or llama-3.3-70b-versatile)
    #[arg(long)]
    model: Option<String>,

    /// Maximum reasoning iterations per question
    #[arg(long)]
    max_iterations: Option<usize>,

    /// What to do when the iteration cap is hit: force or generate
    #[arg(long)]
    early_stopping: Option<EarlyStopping>,

    /// Ask a single question and exit
    #[arg(short, long)]
    question: Option<String>,

    /// Do not stream intermediate steps
    #[arg(long)]
    quiet: bool,
}

impl Args {
    fn advisor_config(&self) -> anyhow::Result<AdvisorConfig> {
        let mut builder = AdvisorConfig::builder();

        if let Some(key) = &self.api_key {
            builder = builder.api_key(key.clone());
        }
        if let Some(model) = &self.model {
            builder = builder.model(model.clone());
        }
        if let Some(max) = self.max_iterations {
            builder = builder.max_iterations(max);
        }
        if let Some(policy) = self.early_stopping {
            builder = builder.early_stopping(policy);
        }

        Ok(builder.from_env().build()?)
    }
}

fn build_agent(mut config: AdvisorConfig, quiet: bool) -> anyhow::Result<ToolAgent> {
    let api_key = config.api_key.take().context("Groq API key missing")?;

    let groq = GroqConfig::new(api_key)
        .with_api_base(config.api_base.clone())
        .with_timeout(config.llm_timeout.as_secs());
    let provider = Arc::new(GroqProvider::with_config(groq)?);

    let registry = market_registry(&MarketConfig::default())?;

    let mut executor = AgentExecutor::new(
        provider,
        Arc::new(registry),
        ExecutorConfig::from(&config),
    );
    if !quiet {
        executor = executor.with_event_handler(Arc::new(ConsolePrinter));
    }

    Ok(ToolAgent::new(executor, "stock-advisor"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    advisor_utils::init_tracing("warn");

    let args = Args::parse();
    let config = args.advisor_config()?;

    println!("{}", shell::banner());

    if !config.has_credential() {
        println!("Set GROQ_API_KEY or pass --api-key to get recommendations.");
        return Ok(());
    }

    info!(model = %config.model, max_iterations = config.max_iterations, "Starting advisor");
    let shell = Shell::new(build_agent(config, args.quiet)?);
    let mut stdout = io::stdout();

    match &args.question {
        Some(query) => shell.turn(query, &mut stdout).await?,
        None => shell.run(io::stdin().lock(), &mut stdout).await?,
    }

    Ok(())
}
