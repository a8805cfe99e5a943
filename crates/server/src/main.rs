//! textveil server binary.

use server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from .env when present, then configuration
    dotenvy::dotenv().ok();
    let config = ServerConfig::load()?;

    server::start_server(config).await
}
