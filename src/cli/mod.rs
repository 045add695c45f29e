use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Classify input files and pack them into ZIP archives.
    #[command(alias = "p")]
    Pack {
        /// Input files or directories. Directories are walked recursively
        /// (depth-first, alphabetical). Ignored by the custom layout.
        inputs: Vec<PathBuf>,

        /// Packaging layout to apply.
        #[arg(short, long, value_enum, default_value_t = StrategyKind::Marketplace)]
        strategy: StrategyKind,

        /// Package name used for archive roots and texture renaming.
        #[arg(short = 'n', long)]
        name: String,

        /// Directory to write the archives into. Defaults to the current directory.
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Deflate compression level (0-9).
        #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(i32).range(0..=9))]
        level: i32,

        /// JSON manifest describing the folder tree (custom layout only).
        #[arg(long)]
        tree: Option<PathBuf>,

        /// Show a progress bar on stderr while writing archives.
        #[arg(long)]
        progress: bool,
    },

    /// List how inputs classify into buckets without writing anything.
    #[command(alias = "i")]
    Inspect {
        /// Input files or directories to classify.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
}

/// The three packaging layouts.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum StrategyKind {
    /// One archive per detected 3D-model format.
    Marketplace,
    /// A single archive with one folder per category.
    Categorized,
    /// A single archive mirroring a user-authored folder tree.
    Custom,
}

/// Strip path separators and filesystem-reserved characters from a raw
/// package name and collapse whitespace runs to single underscores. The
/// engine downstream assumes it receives a sanitized name and does not
/// re-validate.
pub fn sanitize_package_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;
    for c in raw.trim().chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') || c.is_control() {
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push('_');
        }
        pending_space = false;
        out.push(c);
    }
    out
}

/// Parses command-line arguments using `clap` and returns the command to execute.
pub fn run() -> Result<Commands, Box<dyn std::error::Error>> {
    let args = Args::parse();
    Ok(args.command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizer_strips_reserved_characters() {
        assert_eq!(sanitize_package_name("My Pack"), "My_Pack");
        assert_eq!(sanitize_package_name("a/b\\c:d"), "abcd");
        assert_eq!(sanitize_package_name("  Pack  "), "Pack");
        assert_eq!(sanitize_package_name("<>:\"|?*"), "");
    }

    #[test]
    fn args_parse() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
