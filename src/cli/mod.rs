//! Command-line interface.
//!
//! Argument parsing with clap and colored terminal output with owo-colors.

pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Caravel - retrieval-augmented assistant toolkit
#[derive(Parser, Debug)]
#[command(
    name = "caravel",
    version,
    about = "Retrieval-augmented assistant toolkit",
    long_about = "Ask a model directly, run retrieval-augmented generation over a local\n\
                  text corpus, hold a multi-turn conversation with tool-mediated\n\
                  retrieval, or run a tool-calling trip agent.",
    after_help = "EXAMPLES:\n    \
                  caravel ask \"What is a monad?\"\n    \
                  caravel search \"data scientist\"\n    \
                  caravel rag \"is there a data scientist role?\"\n    \
                  caravel chat\n    \
                  caravel agent --city Stockholm\n    \
                  caravel plan --home \"Main St 1\" --city Stockholm"
)]
pub struct Cli {
    /// Corpus file for retrieval commands (overrides CARAVEL_CORPUS)
    #[arg(long, global = true)]
    pub corpus: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask the model a single question (no retrieval)
    Ask {
        /// The question; read from stdin when omitted
        question: Option<String>,
    },

    /// Retrieval only: print the chunks nearest to a query
    Search {
        /// The query; read from stdin when omitted
        query: Option<String>,

        /// Number of chunks to return
        #[arg(short, long)]
        k: Option<usize>,
    },

    /// Single-shot retrieval-augmented answer over the corpus
    Rag {
        /// The question; read from stdin when omitted
        question: Option<String>,
    },

    /// Multi-turn conversation with tool-mediated retrieval
    Chat {
        /// Thread id for the conversation history
        #[arg(long, default_value = "abc123")]
        thread: String,
    },

    /// Weather-aware two-attraction city guide
    Agent {
        /// City to plan for
        #[arg(long)]
        city: String,
    },

    /// Trip plan filtered by driving time from home
    Plan {
        /// Home address
        #[arg(long)]
        home: String,

        /// City to plan for
        #[arg(long)]
        city: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_agent_command() {
        let cli = Cli::try_parse_from(["caravel", "agent", "--city", "Stockholm"]).unwrap();
        match cli.command {
            Commands::Agent { city } => assert_eq!(city, "Stockholm"),
            _ => panic!("expected agent command"),
        }
    }

    #[test]
    fn test_parse_chat_default_thread() {
        let cli = Cli::try_parse_from(["caravel", "chat"]).unwrap();
        match cli.command {
            Commands::Chat { thread } => assert_eq!(thread, "abc123"),
            _ => panic!("expected chat command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli =
            Cli::try_parse_from(["caravel", "--no-color", "rag", "any roles?"]).unwrap();
        assert!(cli.no_color);
        match cli.command {
            Commands::Rag { question } => assert_eq!(question.as_deref(), Some("any roles?")),
            _ => panic!("expected rag command"),
        }
    }

    #[test]
    fn test_plan_requires_home_and_city() {
        assert!(Cli::try_parse_from(["caravel", "plan", "--city", "Oslo"]).is_err());
        assert!(Cli::try_parse_from(["caravel", "plan", "--home", "x", "--city", "Oslo"]).is_ok());
    }
}
