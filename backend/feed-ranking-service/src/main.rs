use feed_ranking_service::{services::InMemoryStore, Config, FeedRequest, FeedService};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;

    info!(
        "Starting {} with fixture {}",
        config.service.service_name,
        config.feed.fixture_path.display()
    );

    let store = Arc::new(InMemoryStore::load_fixture(&config.feed.fixture_path).await?);
    let service = FeedService::new(store.clone(), store.clone(), store, config.feed.clone());

    let request = FeedRequest {
        user_id: config.viewer.user_id.clone(),
        category: config.viewer.category.clone(),
    };
    let items = service.load_feed(&request).await?;

    info!(items = items.len(), "Feed rendered");
    println!("{}", serde_json::to_string_pretty(&items)?);

    Ok(())
}
