use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use assistant_tools::{ToolRegistry, ToolsConfig, UserContext, default_registry, host};

#[derive(Parser)]
#[command(name = "assistant-tools")]
#[command(version, about = "Utility tools for a chat assistant host", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a TOML configuration file (default: ./assistant-tools.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available tools
    List {
        /// Print full JSON schemas
        #[arg(long)]
        json: bool,
    },
    /// Call a single tool and print its result
    Call {
        /// Tool name
        tool: String,

        /// Tool parameters as a JSON object
        #[arg(long, default_value = "{}")]
        params: String,

        /// User context as a JSON object (name, id, email)
        #[arg(long)]
        user: Option<String>,
    },
    /// Serve JSON-lines requests on stdin, answering on stdout
    Stdio,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    // stdout carries tool results
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn list_tools(registry: &ToolRegistry, json: bool) -> Result<()> {
    if json {
        let tools: Vec<Value> = registry
            .all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name(),
                    "description": t.description(),
                    "parameters": t.schema(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&tools)?);
    } else {
        for tool in registry.all() {
            println!("{:<32} {}", tool.name(), tool.description());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = ToolsConfig::discover(cli.config.as_deref()).context("failed to load config")?;
    let registry = default_registry(&config).context("failed to create tools")?;

    match cli.command {
        Commands::List { json } => list_tools(&registry, json)?,
        Commands::Call { tool, params, user } => {
            let params: Value =
                serde_json::from_str(&params).context("--params must be valid JSON")?;
            let user = user
                .as_deref()
                .map(serde_json::from_str::<UserContext>)
                .transpose()
                .context("--user must be a JSON object")?;

            if registry.get(&tool).is_none() {
                anyhow::bail!(
                    "unknown tool: {} (available: {})",
                    tool,
                    registry.names().join(", ")
                );
            }

            info!(tool = %tool, "calling tool");
            let output = registry.invoke(&tool, params, user.as_ref()).await;
            println!("{}", output);
        }
        Commands::Stdio => {
            info!("serving JSON-lines requests on stdin");
            host::serve(&registry, BufReader::new(tokio::io::stdin()), tokio::io::stdout())
                .await?;
        }
    }

    Ok(())
}
