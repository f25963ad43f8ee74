mod client;
mod config;
mod mcp;
mod orchestrator;
mod ui;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client::ApiClient;
use config::Config;
use orchestrator::Orchestrator;
use tokio::io::{self, BufReader};

#[derive(Parser, Debug)]
#[command(name = "envoy")]
#[command(about = "Client for the Relay tool-calling server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Server URL, overriding the config file.
    #[arg(long, global = true)]
    server: Option<String>,

    /// Stop after running the tool instead of asking the model to phrase the answer.
    #[arg(long, global = true)]
    no_follow_up: bool,

    /// Log level (debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start interactive chat.
    Chat,

    /// Send a single message.
    Ask {
        #[arg(required = true)]
        message: Vec<String>,
    },

    /// Run the built-in sample prompts.
    Test,

    /// Check that the server is up.
    Health,

    /// List locally available tools.
    Tools {
        /// Print function definitions as JSON instead.
        #[arg(long)]
        json: bool,
    },

    /// Serve the local tools over MCP on stdio.
    Mcp,

    /// Show or change configuration.
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Set the server URL.
    Server { url: String },

    /// Set the request timeout in seconds.
    Timeout { secs: u64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load config
    let mut config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            return Err(e);
        }
    };

    // The override applies to this run only and is never written back
    let server_url = cli.server.clone().unwrap_or_else(|| config.server_url.clone());
    let client = ApiClient::new(&server_url, config.timeout())?;
    let orchestrator = Orchestrator::new(client.clone())
        .with_sampling(config.max_length, config.temperature)
        .with_follow_up(config.follow_up && !cli.no_follow_up);

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => ui::interactive_chat(&orchestrator).await?,
        Commands::Ask { message } => ui::single_message(&orchestrator, &message.join(" ")).await?,
        Commands::Test => ui::run_samples(&orchestrator).await?,
        Commands::Health => ui::check_health(&client).await?,
        Commands::Tools { json } => ui::list_tools(json)?,
        Commands::Mcp => mcp::serve(BufReader::new(io::stdin()), io::stdout()).await?,
        Commands::Config { action } => configure(&mut config, action)?,
    }

    Ok(())
}

fn configure(config: &mut Config, action: Option<ConfigAction>) -> Result<()> {
    match action {
        None => {
            println!("Current config:");
            println!("  Server URL: {}", config.server_url);
            println!("  Timeout: {}s", config.timeout_secs);
            println!("  Max length: {}", config.max_length);
            println!("  Temperature: {}", config.temperature);
            println!("  Follow-up: {}", config.follow_up);
        }
        Some(ConfigAction::Server { url }) => {
            config.server_url = url;
            config.save()?;
            println!("Server URL updated to: {}", config.server_url);
        }
        Some(ConfigAction::Timeout { secs }) => {
            config.timeout_secs = secs;
            config.save()?;
            println!("Timeout updated to: {}s", config.timeout_secs);
        }
    }
    Ok(())
}
