//! Study Material Generator service - Main Entry Point

use clap::{Parser, Subcommand};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use studygen::agents::AgentExecutor;
use studygen::config::ServiceConfig;
use studygen::llm::provider::LlmProvider;
use studygen::llm::providers::{GeminiConfig, GeminiProvider};
use studygen::observability::init_default_logging;
use studygen::pipeline::StudyPipeline;
use studygen::server;
use tokio::signal;
use tracing::{error, info};

/// Study Material Generator HTTP service
#[derive(Parser)]
#[command(name = "studygen")]
#[command(about = "Turns raw study text into exam material through an LLM prompt pipeline")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service
    Run,
    /// Validate configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_default_logging();

    info!("Starting studygen v{}", env!("CARGO_PKG_VERSION"));

    let config = match load_configuration(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Run => run_service(config).await,
        Commands::Config { show } => handle_config_command(config, show),
    };

    if let Err(e) = result {
        error!("Command failed: {}", e);
        process::exit(1);
    }

    info!("Service shutdown complete");
}

fn load_configuration(
    config_path: &Option<PathBuf>,
) -> Result<ServiceConfig, Box<dyn std::error::Error>> {
    match config_path {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            Ok(ServiceConfig::load_from_file(path)?)
        }
        None => {
            let default_paths = vec!["studygen.toml", "config/studygen.toml"];

            for path_str in default_paths {
                let path = PathBuf::from(path_str);
                if path.exists() {
                    info!("Loading configuration from: {}", path.display());
                    return Ok(ServiceConfig::load_from_file(&path)?);
                }
            }

            info!("No configuration file found, using built-in defaults");
            Ok(ServiceConfig::default())
        }
    }
}

/// Provider factory for creating LLM providers from configuration
struct LlmProviderFactory;

impl LlmProviderFactory {
    fn create_provider(
        config: &ServiceConfig,
    ) -> Result<Arc<dyn LlmProvider>, Box<dyn std::error::Error>> {
        match config.llm.provider.as_str() {
            "gemini" => {
                // Missing credential fails here, before the server binds
                let api_key = config.get_llm_api_key()?;
                let gemini_config = GeminiConfig {
                    api_key,
                    ..Default::default()
                };
                let provider = GeminiProvider::new(gemini_config)?;
                Ok(Arc::new(provider))
            }
            provider => Err(format!("Unsupported LLM provider: {provider}").into()),
        }
    }
}

async fn run_service(config: ServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    let provider = LlmProviderFactory::create_provider(&config)?;

    info!(
        provider = provider.name(),
        model = %config.llm.model,
        "Generation provider ready"
    );

    let executor = AgentExecutor::new(
        provider,
        config.llm.model.clone(),
        config.llm.temperature,
        config.llm.max_tokens,
    );
    let pipeline = Arc::new(StudyPipeline::new(executor));

    let host: IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::new(host, config.server.port);

    let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt())?;
    let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())?;
    let shutdown = async move {
        tokio::select! {
            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down gracefully...");
            }
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down gracefully...");
            }
        }
    };

    let (bound_addr, server_future) =
        warp::serve(server::routes(pipeline)).bind_with_graceful_shutdown(addr, shutdown);

    info!("Listening on http://{}", bound_addr);
    server_future.await;

    info!("Service shutdown initiated");
    Ok(())
}

fn handle_config_command(
    config: ServiceConfig,
    show: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if show {
        println!("Current configuration:");
        println!("{}", toml::to_string_pretty(&config)?);
    }

    info!("Configuration validation complete");
    Ok(())
}
