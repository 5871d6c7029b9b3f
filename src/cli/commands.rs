use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `newsroom` - terminal front-end for the newsletter webhook workflow.
#[derive(Parser, Debug)]
#[command(name = "newsroom")]
#[command(version)]
#[command(about = "Configure, generate and refine newsletter content over webhooks.", long_about = None)]
pub struct Cli {
    /// Log at debug level regardless of config
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load and print the current variables, tones and content
    Show,

    /// Load, apply edits, then save the variables
    Save {
        /// Tone id (-1 for none)
        #[arg(long, allow_negative_numbers = true)]
        tone: Option<i64>,

        /// Line count, 1 to 50
        #[arg(long, allow_negative_numbers = true)]
        max_lines: Option<i64>,

        /// Whether generated content should include an image
        #[arg(long)]
        image: Option<bool>,

        /// Keyword string
        #[arg(long)]
        keywords: Option<String>,
    },

    /// Generate content from keywords (the stored ones if omitted)
    Test {
        keywords: Option<String>,
    },

    /// Refine the current content with a comment
    Comment {
        text: String,
    },

    /// Render content offline from a file, or stdin when no file is given
    Render {
        file: Option<PathBuf>,

        /// Write inline images to this directory
        #[arg(long)]
        save_images: Option<PathBuf>,
    },

    /// Interactive session over all operations
    Studio,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_save_edits() {
        let cli = Cli::try_parse_from([
            "newsroom", "save", "--tone", "-1", "--max-lines", "12", "--image", "false",
            "--keywords", "spring sale",
        ])
        .unwrap();
        match cli.command {
            Commands::Save {
                tone,
                max_lines,
                image,
                keywords,
            } => {
                assert_eq!(tone, Some(-1));
                assert_eq!(max_lines, Some(12));
                assert_eq!(image, Some(false));
                assert_eq!(keywords.as_deref(), Some("spring sale"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["newsroom", "show", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Show));
    }

    #[test]
    fn comment_requires_text() {
        assert!(Cli::try_parse_from(["newsroom", "comment"]).is_err());
    }

    #[test]
    fn clap_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
