use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use tenderwatch::config::Config;
use tenderwatch::db;
use tenderwatch::deliveries::DeliveryRepository;
use tenderwatch::dispatch::{DispatchService, TelegramNotifier};
use tenderwatch::feed::HttpTenderFeed;
use tenderwatch::reconciliation::ReconciliationService;
use tenderwatch::scheduler;
use tenderwatch::subscribers::SubscriberRepository;

fn init_tracing() {
    let log_format = std::env::var("TW_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    init_tracing();

    db::init(&config.database_url)?;
    let pool = db::create_pool(&config.database_url)?;
    db::run_migrations(&pool)?;
    tracing::info!("Database in use: {}", config.database_url);

    let subscriber_repo = Arc::new(SubscriberRepository::new(pool.clone()));
    let delivery_repo = Arc::new(DeliveryRepository::new(pool.clone()));
    let feed = Arc::new(HttpTenderFeed::new(config.feed_base_url.clone()));
    let notifier = Arc::new(TelegramNotifier::new(config.telegram_token.clone()));

    let dispatcher = DispatchService::new(delivery_repo.clone(), notifier);
    let monitor = Arc::new(ReconciliationService::new(
        subscriber_repo,
        delivery_repo,
        feed,
        dispatcher,
    ));

    scheduler::start_polling_scheduler(monitor, config.check_interval_secs);

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");
    Ok(())
}
