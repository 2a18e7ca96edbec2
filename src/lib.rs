use std::sync::Arc;

use actix_web::middleware::Compress;
use actix_web::{web, App, HttpServer};

pub mod mcp;
pub mod rongda;

use crate::mcp::{McpService, McpState};
use crate::mcp::tools::ToolRegistry;
use crate::rongda::{RongdaClient, RongdaConfig};

pub async fn run() -> std::io::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }
    env_logger::init();

    dotenvy::dotenv().ok(); // Load .env file

    let config = match RongdaConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            log::error!("Missing Rongda credentials: {err}. Set RD_USER and RD_PASS in the environment or .env");
            std::process::exit(1);
        }
    };

    let source = Arc::new(RongdaClient::new(config));
    let registry = ToolRegistry::new(source);
    let mcp_state = web::Data::new(Arc::new(McpState::new(McpService::new(registry))));

    log::info!("Starting MCP server at http://0.0.0.0:8080/mcp");

    HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .app_data(mcp_state.clone())
            .configure(mcp::config)
    })
    .bind(("0.0.0.0", 8080))?
    .run()
    .await
}
