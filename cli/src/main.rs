//! steam-mcp binary: serve the Steam tools over MCP on stdio, or inspect and call them locally.
//!
//! Subcommands: `serve` (default), `tool list`, `tool show`, `tool call`.

mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use steam_config::{ConfigError, SteamConfig};
use steam_mcp::{register_steam_tools, McpServer, SteamServices, ToolRegistry};
use thiserror::Error;

const APP_NAME: &str = "steam-mcp";

#[derive(Parser, Debug)]
#[command(name = "steam-mcp")]
#[command(version)]
#[command(about = "Steam Web API tools over the Model Context Protocol")]
struct Args {
    #[command(subcommand)]
    cmd: Option<Command>,

    /// Directory holding the .env file (default: current directory)
    #[arg(long, value_name = "DIR", global = true)]
    env_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Serve MCP over stdin/stdout (default)
    Serve,
    /// List, show or call tools locally
    Tool(ToolArgs),
}

#[derive(clap::Args, Debug, Clone)]
struct ToolArgs {
    #[command(subcommand)]
    sub: ToolCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum ToolCommand {
    /// List all tools (name and description)
    List {
        /// Print the MCP tools/list array as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the full definition of one tool (name, description, inputSchema)
    Show {
        /// Tool name (e.g. get_owned_games)
        name: String,
    },
    /// Call a tool once and print its result
    Call {
        name: String,
        /// Tool arguments as a JSON object
        #[arg(long, value_name = "JSON", default_value = "{}")]
        args: String,
    },
}

#[derive(Error, Debug)]
enum CliError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Steam(#[from] steam_mcp::SteamError),
    #[error(transparent)]
    Tool(#[from] steam_mcp::ToolSourceError),
    #[error("--args must be a JSON object: {0}")]
    BadArgs(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

fn build_registry(config: &SteamConfig) -> Result<Arc<ToolRegistry>, CliError> {
    let services = Arc::new(SteamServices::from_config(config)?);
    let mut registry = ToolRegistry::new();
    register_steam_tools(&mut registry, services);
    Ok(Arc::new(registry))
}

/// Listing and showing tools never touches the network, so a missing key is tolerated there.
fn config_for_inspection() -> Result<SteamConfig, CliError> {
    match SteamConfig::from_env() {
        Ok(config) => Ok(config),
        Err(ConfigError::Missing(_)) => Ok(SteamConfig::with_api_key(String::new())),
        Err(e) => Err(e.into()),
    }
}

async fn serve() -> Result<(), CliError> {
    let config = SteamConfig::from_env()?;
    tracing::info!(?config, "starting MCP server on stdio");
    let registry = build_registry(&config)?;
    let server = McpServer::new(registry)
        .with_server_info(APP_NAME, env!("CARGO_PKG_VERSION"))
        .with_secret(config.api_key.as_str());
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    server.serve(stdin, tokio::io::stdout()).await?;
    Ok(())
}

async fn run_tool_command(cmd: &ToolCommand) -> Result<(), CliError> {
    match cmd {
        ToolCommand::List { json } => {
            let registry = build_registry(&config_for_inspection()?)?;
            let specs = registry.list();
            if *json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&specs).map_err(steam_mcp::ToolSourceError::from)?
                );
            } else {
                for spec in specs {
                    println!("{}\t{}", spec.name, spec.description.unwrap_or_default());
                }
            }
        }
        ToolCommand::Show { name } => {
            let registry = build_registry(&config_for_inspection()?)?;
            let tool = registry
                .get(name)
                .ok_or_else(|| steam_mcp::ToolSourceError::NotFound(name.clone()))?;
            println!(
                "{}",
                serde_json::to_string_pretty(&tool.spec()).map_err(steam_mcp::ToolSourceError::from)?
            );
        }
        ToolCommand::Call { name, args } => {
            let args: serde_json::Value =
                serde_json::from_str(args).map_err(|e| CliError::BadArgs(e.to_string()))?;
            if !args.is_object() {
                return Err(CliError::BadArgs("not an object".to_string()));
            }
            let config = SteamConfig::from_env()?;
            let registry = build_registry(&config)?;
            let out = registry.call(name, args).await?;
            println!("{}", out.text);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    if let Err(e) = steam_config::load_and_apply(APP_NAME, args.env_dir.as_deref()) {
        eprintln!("steam-mcp: {}", e);
    }
    if let Err(e) = logging::init() {
        eprintln!("steam-mcp: cannot open log file: {}", e);
        std::process::exit(1);
    }

    let result = match args.cmd.unwrap_or(Command::Serve) {
        Command::Serve => serve().await,
        Command::Tool(ta) => run_tool_command(&ta.sub).await,
    };
    if let Err(e) = result {
        tracing::error!(error = %e, "steam-mcp failed");
        eprintln!("steam-mcp: {}", e);
        std::process::exit(1);
    }
}
