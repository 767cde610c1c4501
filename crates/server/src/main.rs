mod tools;

use mcp::{Registry, Server};
use openmeteo::OpenMeteo;
use tracing_subscriber::EnvFilter;

use tools::{HealthCheckTool, WeatherTool};

const SERVER_NAME: &str = "poyraz-weather-server";

#[tokio::main]
async fn main() {
    // stdout is the protocol channel; logs go to stderr only
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> mcp::Result<()> {
    let mut registry = Registry::new();
    registry.register(HealthCheckTool);
    registry.register(WeatherTool::new(OpenMeteo::new()));

    Server::new(SERVER_NAME, env!("CARGO_PKG_VERSION"), registry)
        .serve_stdio()
        .await
}
