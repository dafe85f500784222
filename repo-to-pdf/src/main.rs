use anyhow::Result;
use clap::Parser;
use repo_to_pdf::cli::{run, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment (GITHUB_TOKEN may come from .env)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    tracing::info!("CLI application startup: tracing initialised, environment loaded");

    let cli = Cli::parse();
    let result = run(cli).await;
    match &result {
        Ok(_) => tracing::info!("CLI completed successfully"),
        Err(e) => {
            tracing::error!(error = %e, "CLI exited with error");
            eprintln!("[ERROR] Generation failed: {e:#}");
        }
    }
    result
}
