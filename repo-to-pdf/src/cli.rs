///
/// This module implements the CLI interface for repo-to-pdf: command parsing,
/// the async entry point, and user-visible output.
///
/// All document generation (traversal, pagination, PDF export) lives in the
/// [`repo-to-pdf-core`] crate. This module is strictly glue.
///
/// ## How To Use
/// - From a shell: `repo-to-pdf convert --repo https://github.com/<owner>/<repo>`.
/// - Programmatically / in tests: call [`run`] with a constructed [`Cli`].
///
/// [`repo-to-pdf-core`]: ../../repo-to-pdf-core/
use crate::load_config::{load_config, resolve, token_from_env, FileConfig};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use repo_to_pdf_core::assemble::assemble;
use repo_to_pdf_core::export::save;
use repo_to_pdf_core::fetch::GitHubFetcher;
use std::path::PathBuf;

/// CLI for repo-to-pdf: render a GitHub repository into one paginated PDF.
#[derive(Parser)]
#[clap(
    name = "repo-to-pdf",
    version,
    about = "Render a GitHub repository (directory map and every file) into a single PDF"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a repository to `<repo>_full_contents.pdf`
    Convert(ConvertArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ConvertArgs {
    /// Repository URL (https://github.com/<owner>/<repo>) or <owner>/<repo>
    #[clap(long)]
    pub repo: String,
    /// Branch, tag or commit to render [default: main]
    #[clap(long)]
    pub branch: Option<String>,
    /// Also render directories that contain nothing
    #[clap(long, overrides_with = "no_include_empty")]
    pub include_empty: bool,
    /// Skip empty directories even if the config file includes them
    #[clap(long, overrides_with = "include_empty")]
    pub no_include_empty: bool,
    /// Where the PDF is written [default: current directory]
    #[clap(long)]
    pub output_dir: Option<PathBuf>,
    /// Optional YAML file with defaults
    #[clap(long)]
    pub config: Option<PathBuf>,
}

impl ConvertArgs {
    /// `Some` when either empty-directory flag was given; the last one on the line wins.
    pub fn include_empty_override(&self) -> Option<bool> {
        match (self.include_empty, self.no_include_empty) {
            (true, _) => Some(true),
            (false, true) => Some(false),
            (false, false) => None,
        }
    }
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Convert(args) => {
            let file_config = match &args.config {
                Some(path) => load_config(path)?,
                None => FileConfig::default(),
            };
            let config = resolve(&args, file_config, token_from_env())?;
            tracing::info!(
                command = "convert",
                repo = %config.request.repo,
                "Starting generation"
            );

            let fetcher = GitHubFetcher::new(config.github.clone())?;
            let document = match assemble(&fetcher, &config.request, chrono::Local::now()).await {
                Ok(document) => document,
                Err(e) => {
                    tracing::error!(command = "convert", error = %e, "Generation failed");
                    return Err(anyhow::Error::new(e).context("Generation failed"));
                }
            };

            let path = save(&document, &config.request.repo, &config.output_dir)
                .await
                .context("Failed to save PDF")?;
            tracing::info!(
                command = "convert",
                path = %path.display(),
                pages = document.page_count(),
                "Generation complete"
            );
            println!("PDF generated successfully: {}", path.display());
            Ok(())
        }
    }
}
