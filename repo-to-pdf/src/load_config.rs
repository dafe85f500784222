/// `load_config` module: reads the optional YAML defaults file, injects secrets from
/// the environment, and merges both with the command-line arguments into a [`RunConfig`].
///
/// # Responsibilities
/// - Parse the user-supplied YAML file into type-safe Rust structs
/// - Read the access token from `GITHUB_TOKEN` (never from the file)
/// - Apply precedence: command line over file over built-in defaults
///
/// # Errors
/// All errors use `anyhow::Error` and are surfaced at the CLI boundary.
use anyhow::Result;
use repo_to_pdf_core::fetch::{GitHubConfig, DEFAULT_API_BASE_URL};
use repo_to_pdf_core::GenerationRequest;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::cli::ConvertArgs;
use crate::repo_url::parse_repo;

pub const TOKEN_ENV: &str = "GITHUB_TOKEN";
pub const DEFAULT_BRANCH: &str = "main";

/// Optional defaults file. Every key may be omitted.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub api_base_url: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub include_empty_directories: Option<bool>,
    pub branch: Option<String>,
}

/// Fully merged settings for one `convert` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub github: GitHubConfig,
    pub request: GenerationRequest,
    pub output_dir: PathBuf,
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<FileConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    match serde_yaml::from_str::<Option<FileConfig>>(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            Ok(conf.unwrap_or_default())
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            Err(anyhow::anyhow!("Failed to parse config YAML: {e}"))
        }
    }
}

/// The optional static credential. Unset or blank means anonymous access.
pub fn token_from_env() -> Option<String> {
    match std::env::var(TOKEN_ENV) {
        Ok(token) if !token.trim().is_empty() => {
            info!("{TOKEN_ENV} found in env");
            Some(token.trim().to_string())
        }
        _ => None,
    }
}

pub fn resolve(args: &ConvertArgs, file: FileConfig, token: Option<String>) -> Result<RunConfig> {
    let repo_id = parse_repo(&args.repo)?;
    let reference = args
        .branch
        .clone()
        .or(file.branch)
        .unwrap_or_else(|| DEFAULT_BRANCH.to_string());
    let include_empty_directories = args
        .include_empty_override()
        .or(file.include_empty_directories)
        .unwrap_or(false);
    let output_dir = args
        .output_dir
        .clone()
        .or(file.output_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut github = GitHubConfig::new(&repo_id.owner, &repo_id.repo, &reference);
    github.api_base_url = file
        .api_base_url
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
    github.token = token;

    info!(
        owner = %repo_id.owner,
        repo = %repo_id.repo,
        reference = %reference,
        include_empty = include_empty_directories,
        output_dir = %output_dir.display(),
        "Config resolved"
    );

    Ok(RunConfig {
        github,
        request: GenerationRequest {
            owner: repo_id.owner,
            repo: repo_id.repo,
            reference,
            include_empty_directories,
        },
        output_dir,
    })
}
