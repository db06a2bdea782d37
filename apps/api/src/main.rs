use std::net::SocketAddr;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use portfolio_api::api::routes::router;
use portfolio_api::config::Config;
use portfolio_api::infrastructure::bootstrap;
use portfolio_api::infrastructure::seed::{self, SeedData};
use portfolio_api::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "portfolio-api", version, about = "Portfolio REST API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API (default)
    Serve,
    /// Load the bundled sample content into empty collections, then exit
    Seed,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("portfolio_api=debug,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let pool = match bootstrap::connect(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "failed to prepare database");
            return ExitCode::FAILURE;
        }
    };

    let port = config.port;
    let state = AppState::postgres(config, pool);

    if let Err(e) = bootstrap::ensure_default_admin(state.users.as_ref(), &state.config).await {
        tracing::error!(error = %e, "failed to ensure admin user");
        return ExitCode::FAILURE;
    }

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(state, port).await,
        Command::Seed => run_seed(&state).await,
    }
}

async fn run_seed(state: &AppState) -> ExitCode {
    let data = match SeedData::bundled() {
        Ok(data) => data,
        Err(e) => {
            tracing::error!(error = %e, "failed to load seed data");
            return ExitCode::FAILURE;
        }
    };

    match seed::seed(state, data).await {
        Ok(summary) => {
            tracing::info!(
                profile = summary.profile,
                projects = summary.projects,
                ui_effects = summary.ui_effects,
                enhanced_projects = summary.enhanced_projects,
                "Seeding completed"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "seeding failed");
            ExitCode::FAILURE
        }
    }
}

async fn serve(state: AppState, port: u16) -> ExitCode {
    let app = router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %addr, "failed to bind address");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("Server listening on {}", addr);

    let served = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await;

    match served {
        Ok(()) => {
            tracing::info!("Server stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "server failed");
            ExitCode::FAILURE
        }
    }
}

/// Resolves on Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
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

    tracing::info!("Shutdown signal received");
}
