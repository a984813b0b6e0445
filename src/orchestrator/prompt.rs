//! Scenario selection input
//!
//! The orchestrator prints the question itself; a [`ScenarioPrompt`] only
//! supplies the answer, from stdin or from a value fixed up front.

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};

use crate::error::Result;

/// Source of the scenario label typed by the user
#[async_trait]
pub trait ScenarioPrompt: Send {
    /// Next answer, untrimmed; empty at end of input
    async fn read_label(&mut self) -> Result<String>;
}

/// Reads one line per question from any buffered async reader
pub struct LinePrompt<R> {
    reader: R,
}

impl<R> LinePrompt<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl LinePrompt<BufReader<Stdin>> {
    /// Prompt reading from the process's standard input
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

#[async_trait]
impl<R> ScenarioPrompt for LinePrompt<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn read_label(&mut self) -> Result<String> {
        let mut line = String::new();
        self.reader.read_line(&mut line).await?;
        Ok(line)
    }
}

/// Answers every question with the same label
#[derive(Debug, Clone)]
pub struct FixedPrompt {
    label: String,
}

impl FixedPrompt {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

#[async_trait]
impl ScenarioPrompt for FixedPrompt {
    async fn read_label(&mut self) -> Result<String> {
        Ok(self.label.clone())
    }
}
