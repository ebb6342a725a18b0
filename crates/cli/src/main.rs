mod client_commands;

use std::sync::Arc;

use {
    clap::{Parser, Subcommand},
    tracing::info,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
    wabridge_channels::SessionState,
    wabridge_gateway::GatewayState,
    wabridge_whatsapp::WhatsAppClient,
};

#[derive(Parser)]
#[command(name = "wabridge", about = "wabridge: HTTP gateway for a WhatsApp session")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gateway server with the live WhatsApp session.
    Serve {
        #[arg(long)]
        bind: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    #[command(flatten)]
    Client(client_commands::ClientAction),
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

async fn serve(bind: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let config = wabridge_config::discover_and_load();
    let mut server = config.server.clone();
    if let Some(bind) = bind {
        server.bind = bind;
    }
    if let Some(port) = port {
        server.port = port;
    }

    let session = Arc::new(SessionState::new());
    let client = WhatsAppClient::start(&config.whatsapp, Arc::clone(&session)).await?;
    let state = GatewayState::new(session, Arc::new(client));
    wabridge_gateway::start_gateway(&server, state).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    info!(version = env!("CARGO_PKG_VERSION"), "wabridge starting");

    match cli.command {
        Commands::Serve { bind, port } => serve(bind, port).await,
        Commands::Client(action) => client_commands::handle(action).await,
    }
}
