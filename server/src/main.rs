use clap::Parser;
use env_logger::Env;
use log::{error, info};
use server::config::{ServerConfig, ServiceKind};
use server::error::ServerError;
use server::leaderboard::Leaderboard;
use server::network::Server;
use server::resources::Resources;
use server::router::HangmanService;
use server::utility::UtilityService;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Command line arguments
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Server IP address to bind to
    #[clap(short = 'H', long, default_value = "127.0.0.1")]
    host: String,
    /// Server port to listen on
    #[clap(short, long, default_value = "8888")]
    port: u16,
    /// Which service to run
    #[clap(short, long, value_enum, default_value = "hangman")]
    service: ServiceKind,
    /// Directory with word lists and hangman stages (bundled copies if omitted)
    #[clap(short, long)]
    resources: Option<PathBuf>,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        ServerConfig {
            host: args.host,
            port: args.port,
            service: args.service,
            resources: args.resources,
        }
    }
}

/// Main-method of the application.
/// Parses command-line arguments, loads resources and serves until Ctrl+C.
#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from(Args::parse());

    tokio::select! {
        result = run(config) => match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("{}", e);
                e.exit_code()
            }
        },
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
            ExitCode::SUCCESS
        }
    }
}

async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let address = config.address();

    match config.service {
        ServiceKind::Hangman => {
            let resources = Arc::new(Resources::load(config.resources.as_deref())?);
            let service = HangmanService::new(resources, Arc::new(Leaderboard::new()));
            Server::bind(&address, service).await?.run().await
        }
        ServiceKind::Utility => Server::bind(&address, UtilityService::new()).await?.run().await,
    }
}
