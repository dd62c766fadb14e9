use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Turn a Q&A document into a multiple-choice quiz in the terminal.
#[derive(Debug, Parser)]
#[command(name = "pdf_quiz", version)]
pub struct Cli {
    /// Session file (overrides config and QUIZ_SESSION_FILE)
    #[arg(long, global = true, value_name = "PATH")]
    pub session: Option<PathBuf>,

    /// Re-randomize options every time a question is shown or scored
    #[arg(long, global = true)]
    pub reshuffle: bool,

    /// Verbose logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract questions from a PDF (or .txt) document and start a new session
    Upload {
        /// Document to read
        file: PathBuf,

        /// Start the test right after a successful upload
        #[arg(long)]
        start: bool,
    },
    /// Take the test
    Test,
    /// Show the score for the submitted answers
    Results {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Clear the answers and take the test again
    Retry,
    /// Show what is stored in the current session
    Status,
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Upload { .. } => "upload",
            Commands::Test => "test",
            Commands::Results { .. } => "results",
            Commands::Retry => "retry",
            Commands::Status => "status",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_upload_with_global_flags() {
        let cli = Cli::try_parse_from([
            "pdf_quiz",
            "upload",
            "deck.pdf",
            "--start",
            "--session",
            "/tmp/s.json",
        ])
        .unwrap();
        assert_eq!(cli.session, Some(PathBuf::from("/tmp/s.json")));
        match cli.command {
            Commands::Upload { file, start } => {
                assert_eq!(file, PathBuf::from("deck.pdf"));
                assert!(start);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_upload_requires_file() {
        assert!(Cli::try_parse_from(["pdf_quiz", "upload"]).is_err());
    }

    #[test]
    fn test_results_json_flag() {
        let cli = Cli::try_parse_from(["pdf_quiz", "-v", "results", "--json"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.command.name(), "results");
    }
}
