//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Toolbox - browse and preview the tools in a catalog
#[derive(Parser, Debug)]
#[command(name = "toolbox")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Registry configuration file (TOML)
    #[arg(short, long, global = true, env = "TOOLBOX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory of tool manifests
    #[arg(long, global = true, env = "TOOLBOX_CATALOG", default_value = "tools")]
    pub catalog: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List registered tools
    List {
        /// Group tools by category
        #[arg(short, long)]
        grouped: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Find tools whose name or description contains a keyword
    Search {
        /// Keyword to look for (case-insensitive)
        keyword: String,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Mount a tool into an empty page and print the resulting markup
    Render {
        /// Tool id
        id: String,

        /// Also print lifecycle events as JSON lines
        #[arg(long)]
        events: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_grouped() {
        let cli = Cli::try_parse_from(["toolbox", "list", "--grouped"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::List {
                grouped: true,
                json: false
            })
        );
        assert_eq!(cli.catalog, PathBuf::from("tools"));
    }

    #[test]
    fn test_parse_global_catalog_after_subcommand() {
        let cli =
            Cli::try_parse_from(["toolbox", "render", "calc", "--catalog", "/srv/tools"]).unwrap();
        assert_eq!(cli.catalog, PathBuf::from("/srv/tools"));
        assert_eq!(
            cli.command,
            Some(Commands::Render {
                id: "calc".into(),
                events: false
            })
        );
    }

    #[test]
    fn test_search_requires_keyword() {
        assert!(Cli::try_parse_from(["toolbox", "search"]).is_err());
    }
}
