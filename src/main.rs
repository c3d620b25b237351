use std::sync::Arc;

use tracing::{error, info};

use baby_names::{
    config::BackendConfig,
    db::Database,
    handlers::create_router,
    middleware::init_tracing,
    server::serve,
};

#[tokio::main]
async fn main() {
    // Initialize structured logging
    if let Err(e) = init_tracing() {
        eprintln!("Failed to initialize tracing: {}", e);
        std::process::exit(1);
    }

    // Load configuration from environment
    let config = match BackendConfig::from_env() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize database connection pool
    let database = match Database::new(config.database).await {
        Ok(db) => {
            info!("Database connection established");
            Arc::new(db)
        }
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    let app = create_router(database.clone());

    let result = serve(app, config.port).await;
    database.close();

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
