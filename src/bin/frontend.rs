use tracing::{error, info};

use baby_names::{
    config::FrontendConfig,
    frontend::{create_frontend_router, BackendClient},
    middleware::init_tracing,
    server::serve,
};

#[tokio::main]
async fn main() {
    if let Err(e) = init_tracing() {
        eprintln!("Failed to initialize tracing: {}", e);
        std::process::exit(1);
    }

    let config = match FrontendConfig::from_env() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    let backend = match BackendClient::new(config.backend_url, config.request_timeout) {
        Ok(client) => {
            info!("Using backend at {}", client.base_url());
            client
        }
        Err(e) => {
            error!("Failed to build backend HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = serve(create_frontend_router(backend), config.port).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
