use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;
use warp::Filter;

use interview_server::api::{self, AppState};
use interview_server::config::Config;
use interview_server::questions::seed_if_empty;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    init_tracing();

    let config = Config::from_env();

    let state = match AppState::from_config(&config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize server");
            std::process::exit(1);
        }
    };

    if config.seed_sample_questions {
        if let Err(e) = seed_if_empty(state.questions.as_ref()).await {
            tracing::error!(error = %e, "Seeding sample questions failed");
        }
    }

    let origins = config.allowed_origins();
    let cors = warp::cors()
        .allow_origins(origins.iter().map(String::as_str))
        .allow_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_headers(vec!["authorization", "content-type"])
        .allow_credentials(true);

    let routes = api::routes(state)
        .recover(api::handle_rejection)
        .with(cors)
        .with(warp::trace::request());

    let bind_address: SocketAddr = config.bind_address().into();
    tracing::info!(address = %bind_address, origins = ?origins, "Interview server starting");

    let (addr, server) = warp::serve(routes).bind_with_graceful_shutdown(bind_address, shutdown_signal());
    tracing::info!(address = %addr, "Server running");
    server.await;

    tracing::info!("Server shut down");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|f| f.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
