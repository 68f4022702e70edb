use anyhow::Result;
use tracing_subscriber::EnvFilter;

use llm_qa::config::Config;
use llm_qa::service::QaService;
use llm_qa::web;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load();
    let service = QaService::from_config(&config)?;

    web::serve(&config.web, service).await?;
    Ok(())
}
