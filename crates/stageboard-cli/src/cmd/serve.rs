use anyhow::Context;
use stageboard_core::config::Config;
use std::path::Path;

/// Serve the CRUD contract and dashboard routes for this project.
///
/// Port priority: `--port`, then `server.port` from the config.
pub fn run(root: &Path, port: Option<u16>) -> anyhow::Result<()> {
    let config = Config::load(root).context("stageboard serve needs an initialized project")?;
    let port = port.unwrap_or(config.server.port);

    let rt = tokio::runtime::Runtime::new()?;
    let root_buf = root.to_path_buf();
    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
            .await
            .with_context(|| format!("failed to bind port {port}"))?;
        println!(
            "stageboard serving {} on http://localhost:{}",
            root_buf.display(),
            listener.local_addr()?.port()
        );
        stageboard_server::serve_on(root_buf, listener).await
    })
}
