use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ipcsense")]
#[command(
    author,
    version,
    about = "Predict applicable Indian Penal Code sections for case descriptions"
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "ipcsense.yaml")]
    pub config: String,

    /// Override rule table (YAML); the built-in table is used otherwise
    #[arg(long, global = true)]
    pub rules: Option<PathBuf>,

    /// Model server base URL
    #[arg(long, global = true, env = "IPCSENSE_LLM_URL")]
    pub llm_url: Option<String>,

    /// Model name for LLM queries
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a case with the statistical classifier and override rules
    Analyze {
        /// Read the case text from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print only the JSON result
        #[arg(long)]
        json: bool,

        /// Case text (joined with spaces)
        text: Vec<String>,
    },

    /// Ask the language model about a case; interactive when no query is given
    Ask {
        /// The legal query to analyze
        #[arg(short, long)]
        query: Option<String>,

        /// Save `{query, result}` as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Query words (joined with spaces)
        words: Vec<String>,
    },

    /// Serve the HTTP API
    Serve {
        /// Listen address
        #[arg(short, long)]
        listen: Option<String>,

        /// Listen port
        #[arg(short, long)]
        port: Option<u16>,
    },
}

impl Commands {
    /// Text given to `analyze`, read from `--file` when set
    pub async fn case_text(file: Option<&PathBuf>, words: &[String]) -> anyhow::Result<String> {
        let text = match file {
            Some(path) => tokio::fs::read_to_string(path).await?,
            None => words.join(" "),
        };

        if text.trim().is_empty() {
            anyhow::bail!("no case text given; pass it as arguments or with --file");
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from(["ipcsense", "analyze", "--json", "The", "man", "stole"])
            .unwrap();
        match cli.command {
            Commands::Analyze { json, text, file } => {
                assert!(json);
                assert!(file.is_none());
                assert_eq!(text.join(" "), "The man stole");
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.config, "ipcsense.yaml");
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "ipcsense", "serve", "--port", "9000", "--verbose", "--config", "alt.yaml",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, "alt.yaml");
        assert!(matches!(cli.command, Commands::Serve { port: Some(9000), .. }));
    }

    #[tokio::test]
    async fn test_case_text_requires_content() {
        assert!(Commands::case_text(None, &[]).await.is_err());

        let words = vec!["Case".to_string(), "text".to_string()];
        assert_eq!(Commands::case_text(None, &words).await.unwrap(), "Case text");
    }
}
