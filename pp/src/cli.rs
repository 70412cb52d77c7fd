//! CLI argument parsing for pp

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pp")]
#[command(author, version, about = "Render prompt-engineering patterns from structured fields", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a prompt from field values
    Render {
        /// Pattern name (case-insensitive); falls back to the configured default
        #[arg(short, long)]
        pattern: Option<String>,

        /// Read items from stdin, one per line
        #[arg(long, conflicts_with = "items")]
        stdin: bool,

        /// Field values, in the pattern's field order
        items: Vec<String>,
    },

    /// List all supported patterns
    List,

    /// Show a pattern's fields and description
    Show {
        /// Pattern name (case-insensitive)
        #[arg(required = true)]
        pattern: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_render() {
        let cli = Cli::try_parse_from(["pp", "render", "-p", "tag", "a", "b", "c"]).unwrap();
        match cli.command {
            Command::Render { pattern, stdin, items } => {
                assert_eq!(pattern.as_deref(), Some("tag"));
                assert!(!stdin);
                assert_eq!(items, vec!["a", "b", "c"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["pp", "list", "--json", "-v"]).unwrap();
        assert!(cli.json);
        assert!(cli.verbose);
    }

    #[test]
    fn test_stdin_conflicts_with_items() {
        assert!(Cli::try_parse_from(["pp", "render", "--stdin", "a"]).is_err());
    }

    #[test]
    fn test_show_requires_pattern() {
        assert!(Cli::try_parse_from(["pp", "show"]).is_err());
    }
}
