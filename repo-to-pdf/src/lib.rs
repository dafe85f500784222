pub mod cli;
pub mod load_config;
pub mod repo_url;

pub use cli::{run, Cli, Commands, ConvertArgs};
