//! chatrelay CLI and HTTP proxy entry point.
//!
//! Binary name: `chatrelay`
//!
//! Parses CLI arguments, loads configuration (file, environment, flags),
//! then sends a message, prints the configuration, or starts one of the
//! proxy servers.

mod cli;
mod http;
mod state;

use anyhow::Context;
use clap::Parser;
use clap_complete::generate;

use chatrelay_infra::config::{load_config, resolve_data_dir};
use chatrelay_observe::tracing_setup::{init_tracing, shutdown_tracing, verbosity_filter};

use cli::{Cli, Commands};
use state::{AppState, DevProxyState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(verbosity_filter(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Shell completions don't need configuration
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "chatrelay", &mut std::io::stdout());
        return Ok(());
    }

    let data_dir = resolve_data_dir();
    let mut config = load_config(&data_dir)
        .await
        .context("failed to load configuration")?;

    match cli.command {
        Commands::Send { message, client } => {
            client.apply(&mut config);
            cli::send::send(config.client, &message, cli.json).await?;
        }

        Commands::Config { client } => {
            client.apply(&mut config);
            cli::config::show(&config, &data_dir, cli.json)?;
        }

        Commands::Serve {
            host,
            port,
            upstream_url,
        } => {
            let mut server = config.server;
            if let Some(host) = host {
                server.host = host;
            }
            if let Some(port) = port {
                server.port = port;
            }
            if let Some(url) = upstream_url {
                server.upstream_url = Some(url);
            }

            let state = AppState::init(&server);
            if !state.passthrough.is_loaded() && !cli.quiet {
                println!(
                    "  {} Proxy handler unavailable; every request will get the degraded 500 response.",
                    console::style("⚠").yellow().bold()
                );
            }

            let addr = format!("{}:{}", server.host, server.port);
            let router = http::router::build_router(state);
            listen(&addr, router, "chatrelay proxy", cli.quiet).await?;
        }

        Commands::DevProxy { host, port, target } => {
            let mut dev = config.dev_proxy;
            if let Some(host) = host {
                dev.host = host;
            }
            if let Some(port) = port {
                dev.port = port;
            }
            if let Some(target) = target {
                dev.target = target;
            }

            let state = DevProxyState::init(&dev).context("invalid dev proxy target")?;
            if !cli.quiet {
                println!(
                    "  {} /api/* -> {}",
                    console::style("↪").bold(),
                    console::style(&dev.target).cyan()
                );
            }

            let addr = format!("{}:{}", dev.host, dev.port);
            let router = http::router::build_dev_router(state);
            listen(&addr, router, "chatrelay dev proxy", cli.quiet).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Bind `addr` and serve `router` until Ctrl+C or SIGTERM.
async fn listen(addr: &str, router: axum::Router, label: &str, quiet: bool) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    if !quiet {
        println!(
            "  {} {} listening on {}",
            console::style("⚡").bold(),
            label,
            console::style(format!("http://{addr}")).cyan()
        );
        println!("  {}", console::style("Press Ctrl+C to stop").dim());
    }

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if !quiet {
        println!("\n  Server stopped.");
    }
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
