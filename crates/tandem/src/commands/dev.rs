//! Development server command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tandem_server::{DevServer, DevServerConfig};

use crate::config::load_config;

/// Run the dev server.
pub async fn run(config_path: &Path, port: u16, open: bool) -> Result<()> {
    tracing::info!("Starting development server on port {}", port);

    let file_config = load_config(config_path)?;

    let config = DevServerConfig {
        docs_dir: PathBuf::from(&file_config.docs.dir),
        labels: file_config.compare.labels(),
        port,
        open,
        ..Default::default()
    };

    DevServer::new(config).start().await?;

    Ok(())
}
