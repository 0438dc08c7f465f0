use std::net::SocketAddr;
use std::sync::Arc;

use mdsnips_server::config::Config;
use mdsnips_server::state::AppState;
use mdsnips_store::{Collection, IndexSnippetStore, SnippetStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let dotenv_loaded = dotenv::dotenv().is_ok();

    // Structured JSON logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    if !dotenv_loaded {
        info!("no .env file found");
    }

    let config = Config::from_env()?;

    // The collection is opened exactly once and shared by every request.
    let collection = match &config.index_dir {
        Some(dir) => Collection::open(dir)?,
        None => {
            warn!("MDSNIPS_INDEX_DIR is empty, snippets will not survive a restart");
            Collection::open_in_ram()?
        }
    };
    let store = Arc::new(IndexSnippetStore::with_timeout(
        collection,
        config.store_timeout,
    ));
    store.ensure_indexes().await?;

    if config.basic_auth.is_none() {
        warn!("MDSNIPS_USER/MDSNIPS_PASS not set, basic auth disabled");
    }

    let app = mdsnips_server::router(AppState::new(store), &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
