use anyhow::Result;
use veil_config::Config;
use veil_server::{AppState, VeilServer};

use super::build_processor;

pub async fn handle(config: &Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    let processor = build_processor(config).await?;
    let state = AppState::new(processor, config.server.max_upload_bytes);

    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    println!("Serving on http://{}:{}", host, port);
    println!("  Uploads: {}", config.storage.upload_dir().display());
    println!("  History: {}", config.storage.db_path().display());

    VeilServer::serve(state, &host, port).await
}
