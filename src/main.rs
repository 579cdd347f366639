use std::sync::Arc;

use termhooks::executor::ShellExecutor;
use termhooks::logging;
use termhooks::pipeline::Pipeline;
use termhooks::session::TerminalSession;

/// Default hook directory, relative to the current working directory
const DEFAULT_HOOKS_DIR: &str = ".hooks";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging system
    logging::init_logging()?;

    tracing::info!("=== Terminal Extensions Starting ===");

    // Build the pipeline over the host shell
    let executor = ShellExecutor::new();
    tracing::info!("Using shell: {}", executor.shell());

    let pipeline = Pipeline::new(Arc::new(executor));

    // Create the session and load hooks from the default directory
    let mut session = TerminalSession::new(pipeline);
    session.load_hooks(DEFAULT_HOOKS_DIR);

    // Run the prompt loop
    session.run().await?;

    tracing::info!("=== Terminal Extensions Shutting Down ===");

    Ok(())
}
