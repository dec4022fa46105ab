use anyhow::Context;
use folioquote::orchestration::{Enricher, MarketDataFetcher};
use folioquote::throttle::ConcurrencyLimiter;
use folioquote::{api, config::Config, MarketDataSource, YahooDataSource};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    let config = Config::from_env().context("loading configuration")?;
    let port = config.port;

    // Wire up the fetch pipeline: one limiter and one cache pair, owned here
    // and shared by reference with every handler.
    let source: Arc<dyn MarketDataSource> =
        Arc::new(YahooDataSource::new(config.upstream_url.clone()));
    let limiter = Arc::new(ConcurrencyLimiter::new(config.max_concurrency));
    let fetcher = Arc::new(MarketDataFetcher::new(
        source,
        limiter,
        config.retry_policy(),
        config.quote_ttl,
        config.fundamentals_ttl,
    ));
    let enricher = Arc::new(Enricher::new(fetcher.clone()));

    // Periodic cache sweep so long-idle entries don't sit around between
    // read-driven evictions.
    let sweeper = fetcher.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(600));
        loop {
            interval.tick().await;
            let removed = sweeper.sweep_expired();
            if removed > 0 {
                tracing::debug!(removed, "swept expired cache entries");
            }
        }
    });

    let app = api::create_router(api::AppState::new(fetcher, enricher));

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
