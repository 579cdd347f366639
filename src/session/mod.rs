//! Interactive terminal session
//!
//! A minimal prompt loop over the pipeline: read a command, process it
//! through the hooks, report blockage. Shell environment details are
//! left to the system; this layer only does I/O.

use std::io::{self, Write};

use colored::*;

use crate::core::HookError;
use crate::loader;
use crate::pipeline::Pipeline;

/// Interactive session feeding commands through a pipeline
pub struct TerminalSession {
    prompt: String,
    pipeline: Pipeline,
}

impl TerminalSession {
    /// Create a session with the default `$ ` prompt
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            prompt: "$ ".to_string(),
            pipeline,
        }
    }

    /// Set a custom prompt
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// The prompt shown before each command
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// The underlying pipeline
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Mutable pipeline access, for registering hooks directly
    pub fn pipeline_mut(&mut self) -> &mut Pipeline {
        &mut self.pipeline
    }

    /// Load hook manifests from a directory
    ///
    /// A missing directory is tolerated: running without hooks is an
    /// ordinary configuration, not a failure.
    pub fn load_hooks(&mut self, directory: impl AsRef<std::path::Path>) {
        match loader::load_from_directory(self.pipeline.registry_mut(), &directory) {
            Ok(report) => {
                println!(
                    "Loaded {} interceptors and {} callbacks",
                    report.interceptors_added, report.callbacks_added
                );
            }
            Err(HookError::DirectoryNotFound(path)) => {
                tracing::debug!("No hook directory at {}", path.display());
            }
            Err(e) => {
                tracing::error!("Failed to load hooks: {}", e);
            }
        }
    }

    /// Run the session until `exit`, `quit`, or end of input
    pub async fn run(&mut self) -> io::Result<()> {
        println!("{}", "Terminal Extensions Activated".bright_blue().bold());
        println!("Type a command and press Enter. Type 'exit' or 'quit' to end the session.");

        loop {
            let command = match self.read_input()? {
                Some(command) => command,
                None => break, // EOF
            };

            if command.is_empty() {
                continue;
            }

            if matches!(command.to_lowercase().as_str(), "exit" | "quit") {
                break;
            }

            if self.pipeline.process(&command, false).await.is_none() {
                println!(
                    "{}",
                    "Command was blocked by an interceptor".yellow().bold()
                );
            }
        }

        Ok(())
    }

    /// Read one trimmed line; `None` on end of input
    fn read_input(&self) -> io::Result<Option<String>> {
        print!("{}", self.prompt.cyan().bold());
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            println!();
            return Ok(None);
        }
        Ok(Some(input.trim().to_string()))
    }
}
