use print_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, logging)
    setup_environment();

    print_banner();

    tracing::info!("Plugin de impresión iniciando...");

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Probe the platform and select the print driver
    let state = ServerState::initialize(&config).await;
    tracing::info!(
        sistema = state.platform.as_str(),
        puerto = config.http_port,
        "Sistema detectado"
    );

    // 4. Start the HTTP server
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
