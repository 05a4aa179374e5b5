//! Interactive shell: one question per line

use advisor_core::Agent;
use std::io::{BufRead, Write};
use tracing::warn;

pub const HEADER: &str = "Stock Recommendation System with Groq";

pub const CAPABILITIES: [&str; 6] = [
    "Get Ticker Value",
    "Fetch Historic Data on Stock",
    "Get Financial Statements",
    "Scrape the Web for Stock News",
    "LLM ReAct based Verbal Analysis",
    "Output Recommendation: Buy, Sell, or Hold with Justification",
];

const PROMPT: &str = ">>> ";

/// Header plus the capability list
pub fn banner() -> String {
    let mut out = format!("{HEADER}\n\nCapabilities:\n");
    for capability in CAPABILITIES {
        out.push_str(&format!("  - {capability}\n"));
    }
    out
}

/// The question actually sent to the agent
pub fn investment_question(query: &str) -> String {
    format!("Is {query} a good investment choice right now?")
}

#[derive(Debug, PartialEq, Eq)]
pub enum Line<'a> {
    Exit,
    Blank,
    Query(&'a str),
}

impl<'a> Line<'a> {
    pub fn classify(raw: &'a str) -> Self {
        match raw.trim() {
            "" => Self::Blank,
            "exit" | "quit" => Self::Exit,
            query => Self::Query(query),
        }
    }
}

pub struct Shell<A> {
    agent: A,
}

impl<A: Agent> Shell<A> {
    pub fn new(agent: A) -> Self {
        Self { agent }
    }

    /// Answer one query; agent errors are printed, not returned
    pub async fn turn<W: Write>(&self, query: &str, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "Query: {query}\n")?;

        match self.agent.process(investment_question(query)).await {
            Ok(answer) => writeln!(out, "{answer}\n")?,
            Err(e) => {
                warn!(error = %e, "Turn failed");
                writeln!(out, "Error: {e}\n")?;
            }
        }
        Ok(())
    }

    /// Read queries until `exit`, `quit` or end of input
    pub async fn run<R: BufRead, W: Write>(&self, mut input: R, out: &mut W) -> std::io::Result<()> {
        loop {
            write!(out, "{PROMPT}")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(out, "\nGoodbye!")?;
                return Ok(());
            }

            match Line::classify(&line) {
                Line::Blank => {}
                Line::Exit => {
                    writeln!(out, "Goodbye!")?;
                    return Ok(());
                }
                Line::Query(query) => self.turn(query, out).await?,
            }
        }
    }
}
