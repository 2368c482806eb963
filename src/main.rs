use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use quill::Config;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quill", about = "Text storage API with numeric pagination")]
struct Cli {
    /// Configuration file (defaults to $XDG_CONFIG_HOME/quill/config.toml).
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Address to listen on, overriding `server.bind`.
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Default the log filter to `debug` instead of `info`.
    #[arg(long)]
    debug: bool,

    /// Write logs to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let default_level = if cli.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env("RUST_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    match &cli.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .with_env_filter(filter)
                .init();
        }
        None => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }

    let app = quill::app(&config)?;
    let listener = tokio::net::TcpListener::bind(config.server.bind).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        backend = ?config.storage.backend,
        page_size = config.pagination.page_size,
        "quill listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("quill stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to listen for ctrl-c");
    }
}
