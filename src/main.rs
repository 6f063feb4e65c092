use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use harbor::config::Config;
use harbor::server;

#[derive(Parser)]
#[command(name = "harbor")]
#[command(about = "Minimal HTTP/1.1 file and echo server", long_about = None)]
struct Args {
    /// Directory served by the /files routes
    #[arg(long)]
    directory: Option<PathBuf>,

    /// Address to listen on (overrides LISTEN and the config file)
    #[arg(long)]
    listen: Option<String>,

    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "harbor=info".into()),
        )
        .with_target(false)
        .with_level(true)
        .init();

    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load(),
    };
    if let Some(directory) = args.directory {
        cfg.directory = directory;
    }
    if let Some(listen) = args.listen {
        cfg.listen_addr = listen;
    }

    tokio::select! {
        res = server::listener::run(&cfg) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
