use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gist_common::{logger, AppConfig, CombineMode, PipelineMode};
use gist_llm::{OpenAiClient, Summarizer};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    if let Some(root) = find_project_root() {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenv::from_path(&env_path).ok();
        }
    } else {
        // Fallback to default dotenv behavior
        dotenv::dotenv().ok();
    }
}

#[derive(Parser)]
#[command(name = "gist")]
#[command(about = "Gist - condense any text into its key points with an LLM", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize text from a file or stdin and print the result
    Summarize {
        /// Read text from this file instead of stdin
        #[arg(long, short)]
        file: Option<PathBuf>,

        /// API key (defaults to OPENAI_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Prompt contract: current or legacy
        #[arg(long)]
        mode: Option<PipelineMode>,

        /// Combine pass: instructed or resummarize
        #[arg(long)]
        combine: Option<CombineMode>,

        /// Model name
        #[arg(long)]
        model: Option<String>,

        /// Maximum words per segment
        #[arg(long)]
        max_words: Option<usize>,

        /// Words shared by consecutive segments
        #[arg(long)]
        overlap: Option<usize>,

        /// Log pipeline progress to stderr
        #[arg(long, short)]
        verbose: bool,
    },

    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    load_dotenv_from_project_root();

    let mut config = AppConfig::from_env()?;

    match cli.command {
        Some(Commands::Summarize {
            file,
            api_key,
            mode,
            combine,
            model,
            max_words,
            overlap,
            verbose,
        }) => {
            // Override with CLI arguments
            if let Some(mode) = mode {
                config.pipeline_mode = mode;
            }
            if let Some(combine) = combine {
                config.combine_mode = combine;
            }
            if let Some(model) = model {
                config.llm_model = model;
            }
            if let Some(max_words) = max_words {
                config.max_chunk_words = max_words;
            }
            if let Some(overlap) = overlap {
                config.chunk_overlap_words = overlap;
            }
            config.validate()?;

            let level = if verbose { "debug" } else { "warn" };
            logger::setup_console_logging(level)?;

            let text = read_input(file.as_ref())?;
            let api_key = resolve_api_key(api_key.as_deref(), config.api_key.as_deref());

            let client = OpenAiClient::from_config(&config)?;
            let summarizer = Summarizer::from_config(Arc::new(client), &config);

            match summarizer.extract_key_points(&text, &api_key).await {
                Ok(summary) => println!("{}", summary),
                Err(e) => {
                    tracing::error!("Error generating summary: {}", e);
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Serve { host, port }) => {
            if let Some(host) = host {
                config.server_host = host;
            }
            if let Some(port) = port {
                config.server_port = port;
            }
            config.validate()?;
            serve(config).await?;
        }
        None => {
            serve(config).await?;
        }
    }

    Ok(())
}

async fn serve(config: AppConfig) -> Result<()> {
    logger::setup_logging(&config.log_dir, &config.log_level)?;

    tracing::info!("Gist starting...");
    tracing::info!("Configuration loaded:");
    tracing::info!("  Bind: {}", config.server_bind_address());
    tracing::info!("  Model: {}", config.llm_model);
    tracing::info!("  Mode: {}", config.pipeline_mode.as_str());
    if config.api_key.is_none() {
        tracing::warn!("No OPENAI_API_KEY set; requests must carry their own api_key");
    }

    println!("Server listening on http://{}", config.server_bind_address());

    gist_server::start_server(config).await?;
    Ok(())
}

/// Trimmed `--api-key`, falling back to the configured key when blank
fn resolve_api_key(cli_key: Option<&str>, configured: Option<&str>) -> String {
    cli_key
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .or_else(|| configured.map(str::trim).filter(|k| !k.is_empty()))
        .unwrap_or_default()
        .to_string()
}

/// Read the text to summarize from `file`, or stdin when absent
fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read text from stdin")?;
            Ok(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_api_key_trims() {
        assert_eq!(resolve_api_key(Some("  sk-cli \n"), None), "sk-cli");
        assert_eq!(resolve_api_key(None, Some(" sk-env ")), "sk-env");
    }

    #[test]
    fn test_resolve_api_key_prefers_cli() {
        assert_eq!(resolve_api_key(Some("sk-cli"), Some("sk-env")), "sk-cli");
        assert_eq!(resolve_api_key(Some("   "), Some("sk-env")), "sk-env");
        assert_eq!(resolve_api_key(Some(""), Some("  ")), "");
        assert_eq!(resolve_api_key(None, None), "");
    }
}
