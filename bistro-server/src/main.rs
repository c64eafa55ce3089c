use bistro_server::{Config, Server, ServerState, init_logger_with_file};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment (.env is optional)
    let _ = dotenvy::dotenv();

    // 2. Configuration - missing DATABASE_URL / JWT_SECRET is fatal
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return Err(e.into());
        }
    };

    // 3. Logging
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    tracing::info!("Bistro server starting...");

    // 4. Database + shared state
    let state = match ServerState::initialize(&config).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Startup failed: {}", e);
            return Err(e.into());
        }
    };

    // 5. Serve
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
