use anyhow::Result;
use tracing_subscriber::EnvFilter;

use llm_qa::config::Config;
use llm_qa::repl::Repl;
use llm_qa::service::QaService;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr and stay quiet by default so the prompt is readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load();
    let service = QaService::from_config(&config)?;

    let stdin = std::io::stdin();
    let mut repl = Repl::new(
        service,
        config.api.model.clone(),
        stdin.lock(),
        std::io::stdout(),
    );
    repl.run().await?;

    Ok(())
}
