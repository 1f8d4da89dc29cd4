// src/cli/mod.rs — CLI definition (clap derive)

pub mod eval;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "twelve-angry-llms",
    about = "Put a model output in front of a panel of LLM judges",
    version
)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Debug logging (RUST_LOG still wins)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Text arguments accept `@path` to read the value from a file.
#[derive(Subcommand)]
pub enum Commands {
    /// Score an open-ended response
    Generation {
        /// The task input the candidate responded to
        #[arg(long)]
        input: String,
        /// The response to evaluate
        #[arg(long)]
        candidate: String,
        /// Extra instructions for the judge
        #[arg(long)]
        guidance: Option<String>,
        /// Scoring rubric
        #[arg(long)]
        rubric: Option<String>,
    },
    /// Score a classification decision
    Classification {
        #[arg(long)]
        input: String,
        /// Predicted label(s); repeat or comma-separate for several
        #[arg(long, required = true, num_args = 1.., value_delimiter = ',')]
        candidate: Vec<String>,
        /// Label vocabulary, in order
        #[arg(long, required = true, num_args = 1.., value_delimiter = ',')]
        allowed: Vec<String>,
        /// Candidate is a set of labels rather than one
        #[arg(long)]
        multi_label: bool,
        /// Gold label(s)
        #[arg(long, num_args = 1.., value_delimiter = ',')]
        gold: Vec<String>,
    },
    /// Score a ranking
    Ranking {
        /// Items being ranked (order carries no meaning)
        #[arg(long, required = true, num_args = 1.., value_delimiter = ',')]
        items: Vec<String>,
        /// Candidate ranking, best first
        #[arg(long, required = true, num_args = 1.., value_delimiter = ',')]
        candidate: Vec<String>,
        #[arg(long)]
        criteria: Option<String>,
        /// Gold ranking, best first
        #[arg(long, num_args = 1.., value_delimiter = ',')]
        gold: Vec<String>,
    },
    /// Free-text evaluation, returned verbatim
    Describe {
        #[arg(long)]
        generation: String,
        #[arg(long)]
        reference: Option<String>,
        #[arg(long)]
        context: Option<String>,
    },
    /// List the configured judges
    Judges,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generation() {
        let cli = Cli::parse_from([
            "twelve-angry-llms",
            "generation",
            "--input",
            "Q",
            "--candidate",
            "A",
            "--rubric",
            "@rubric.md",
        ]);
        match cli.command {
            Commands::Generation {
                input,
                candidate,
                guidance,
                rubric,
            } => {
                assert_eq!(input, "Q");
                assert_eq!(candidate, "A");
                assert!(guidance.is_none());
                assert_eq!(rubric.as_deref(), Some("@rubric.md"));
            }
            _ => panic!("expected generation"),
        }
    }

    #[test]
    fn test_parse_classification_lists() {
        let cli = Cli::parse_from([
            "twelve-angry-llms",
            "-v",
            "classification",
            "--input",
            "text",
            "--candidate",
            "cat,dog",
            "--allowed",
            "cat",
            "dog",
            "bird",
            "--multi-label",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Classification {
                candidate,
                allowed,
                multi_label,
                gold,
                ..
            } => {
                assert_eq!(candidate, vec!["cat", "dog"]);
                assert_eq!(allowed, vec!["cat", "dog", "bird"]);
                assert!(multi_label);
                assert!(gold.is_empty());
            }
            _ => panic!("expected classification"),
        }
    }

    #[test]
    fn test_parse_ranking_requires_items() {
        let result = Cli::try_parse_from(["twelve-angry-llms", "ranking", "--candidate", "a"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::parse_from(["twelve-angry-llms", "judges", "--config", "panel.toml"]);
        assert_eq!(cli.config.as_deref(), Some("panel.toml"));
        assert!(matches!(cli.command, Commands::Judges));
    }
}
