use clap::Parser;
use mindcare_companion::config::AppConfig;
use mindcare_companion::http_server;
use mindcare_companion::llm_client::ResponseGenerator;
use mindcare_core::client::GeminiClient;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "companion-daemon", about = "MindCare multilingual support chat server")]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Gemini API key (overrides GEMINI_API_KEY)
    #[arg(short = 'k', long)]
    api_key: Option<String>,

    /// Gemini model to use
    #[arg(short = 'o', long)]
    model: Option<String>,

    /// HTTP server address
    #[arg(long)]
    http_addr: Option<SocketAddr>,

    /// Upper bound in seconds for a single model call
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Log at debug level, including prompts and raw model output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line args
    let args = Args::parse();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    info!("Starting MindCare companion daemon");

    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            warn!(error = %e, "Failed to load .env file");
        }
    }

    // Load config from file or use defaults
    let mut config = match &args.config {
        Some(config_path) => match AppConfig::load_from_file(config_path) {
            Ok(cfg) => {
                info!("Loaded configuration from {}", config_path.display());
                cfg
            }
            Err(e) => {
                error!("Failed to load configuration from {}: {}", config_path.display(), e);
                return Err(anyhow::anyhow!("Configuration error: {}", e));
            }
        },
        None => AppConfig::load_from_default()?,
    };

    config.apply_env(|key| std::env::var(key).ok())?;

    // Update config from CLI args
    if let Some(api_key) = args.api_key {
        config.gemini.api_key = Some(api_key);
    }
    if let Some(model) = args.model {
        config.gemini.model_name = Some(model);
    }
    if let Some(addr) = args.http_addr {
        config.http_addr = addr;
    }
    if let Some(secs) = args.timeout_secs {
        config.request_timeout_secs = secs;
    }

    // A missing key is not fatal: the server keeps answering with the configuration notice
    let generator: Option<Arc<dyn ResponseGenerator>> = if config.gemini.has_api_key() {
        match GeminiClient::new(config.gemini.clone()) {
            Ok(client) => {
                info!(model = client.model_name(), "Initialized Gemini client");
                let client: Arc<dyn ResponseGenerator> = Arc::new(client);
                Some(client)
            }
            Err(e) => {
                error!(error = %e, "Failed to initialize Gemini client");
                return Err(anyhow::anyhow!("Failed to initialize Gemini client: {}", e));
            }
        }
    } else {
        warn!("GEMINI_API_KEY is not set; /api/chat will report a configuration error");
        None
    };

    let addr = config.http_addr;
    info!("Available routes: GET /health, POST /api/chat");

    http_server::run_server(config, generator, addr).await?;

    info!("MindCare companion daemon shutting down");
    Ok(())
}
