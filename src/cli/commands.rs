//! Subcommand implementations.

use std::io::Write;

use clap::Args;

use crate::cli::Result;
use crate::source::{ChildKind, GitHubFs};

fn kind_label(kind: ChildKind) -> &'static str {
    match kind {
        ChildKind::File => "file",
        ChildKind::Dir => "dir",
        ChildKind::Other => "other",
    }
}

/// Arguments for the ls command.
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Directory path within the repository. Defaults to the root.
    #[arg(default_value = "")]
    pub path: String,
}

impl LsArgs {
    pub async fn run(self, fs: &GitHubFs) -> Result<()> {
        for child in fs.read_dir(&self.path).await? {
            println!("{:<6} {:>10}  {}", kind_label(child.kind), child.size, child.name);
        }
        Ok(())
    }
}

/// Arguments for the cat command.
#[derive(Args, Debug)]
pub struct CatArgs {
    /// File path within the repository.
    pub path: String,
}

impl CatArgs {
    pub async fn run(self, fs: &GitHubFs) -> Result<()> {
        let handle = fs.open(&self.path).await?;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(handle.content()?)?;
        Ok(())
    }
}

/// Arguments for the stat command.
#[derive(Args, Debug)]
pub struct StatArgs {
    /// Path within the repository.
    #[arg(default_value = "")]
    pub path: String,
}

impl StatArgs {
    pub async fn run(self, fs: &GitHubFs) -> Result<()> {
        let meta = fs.stat(&self.path).await?;
        let path = if meta.path.is_empty() { "/" } else { &meta.path };
        println!("path: {}", path);
        println!("kind: {}", kind_label(meta.kind));
        println!("size: {}", meta.size);
        Ok(())
    }
}
