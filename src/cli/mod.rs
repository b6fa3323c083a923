//! Command-line interface for githubfs.

mod commands;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::source::{FsError, GitHubFs, RepoCoordinates};

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur during CLI execution.
#[derive(Debug, Error)]
pub enum CliError {
    /// Filesystem error.
    #[error("{0}")]
    Fs(#[from] FsError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid argument combination.
    #[error("{0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

// =============================================================================
// Global Arguments
// =============================================================================

/// Global arguments that apply to all commands.
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Repository to read, as owner/name.
    pub repository: String,

    /// Authentication token. Unauthenticated calls use GitHub's anonymous
    /// rate limit.
    #[arg(long, env = "GITHUB_TOKEN")]
    pub token: Option<String>,

    /// Branch, tag, or commit to read at. Defaults to the default branch.
    #[arg(long)]
    pub revision: Option<String>,

    /// API base URL (for GitHub Enterprise).
    #[arg(long = "api-base")]
    pub api_base: Option<String>,
}

impl GlobalArgs {
    /// Build repository coordinates from the arguments.
    pub fn to_coordinates(&self) -> Result<RepoCoordinates> {
        let (owner, repo) = self
            .repository
            .split_once('/')
            .ok_or_else(|| CliError::InvalidArgs("repository must be owner/name".to_string()))?;
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return Err(CliError::InvalidArgs(
                "repository must be owner/name".to_string(),
            ));
        }

        let mut coords = RepoCoordinates::new(owner, repo);
        if let Some(token) = &self.token {
            coords = coords.with_token(token);
        }
        if let Some(revision) = &self.revision {
            coords = coords.with_revision(revision);
        }
        if let Some(base) = &self.api_base {
            coords = coords.with_api_base(base);
        }
        Ok(coords)
    }
}

// =============================================================================
// CLI Definition
// =============================================================================

/// ghfs - read files and listings from a remote GitHub repository.
#[derive(Parser, Debug)]
#[command(name = "ghfs", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List a directory.
    Ls(commands::LsArgs),

    /// Print a file's contents.
    Cat(commands::CatArgs),

    /// Show kind and size of an entry.
    Stat(commands::StatArgs),
}

// =============================================================================
// CLI Execution
// =============================================================================

impl Cli {
    /// Parse command-line arguments and return the CLI instance.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Run the CLI command.
    pub async fn run(self) -> Result<()> {
        let fs = GitHubFs::new(self.global.to_coordinates()?);

        match self.command {
            Command::Ls(args) => args.run(&fs).await,
            Command::Cat(args) => args.run(&fs).await,
            Command::Stat(args) => args.run(&fs).await,
        }
    }
}

/// Main entry point for the CLI.
pub async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_args();
    cli.run().await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global(repository: &str) -> GlobalArgs {
        GlobalArgs {
            repository: repository.to_string(),
            token: None,
            revision: None,
            api_base: None,
        }
    }

    #[test]
    fn test_repository_spec_parsed() {
        let coords = global("octocat/hello-world").to_coordinates().unwrap();
        assert_eq!(coords.owner, "octocat");
        assert_eq!(coords.repo, "hello-world");
    }

    #[test]
    fn test_bad_repository_spec_rejected() {
        assert!(global("octocat").to_coordinates().is_err());
        assert!(global("a/b/c").to_coordinates().is_err());
        assert!(global("/repo").to_coordinates().is_err());
    }
}
