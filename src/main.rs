use book_catalog::config::CatalogConfig;
use book_catalog::library::Library;
use book_catalog::routes::build_router;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        // .with_max_level(tracing::Level::DEBUG)
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = CatalogConfig::from_env()?;
    tracing::info!("Data directory: {}", config.data_dir.display());

    std::fs::create_dir_all(config.storage_dir())?;
    let library = Arc::new(Library::from_config(&config));

    match library.catalog() {
        Ok(entries) => tracing::info!("Catalog holds {} entries", entries.len()),
        Err(e) => tracing::warn!("Catalog not readable at startup: {}", e),
    }

    let app = build_router(library);

    tracing::info!("HTTP server listening on {}", config.bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
