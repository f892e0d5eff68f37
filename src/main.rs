use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use product_poller::config::{Settings, Variant};
use product_poller::{GenericFormat, HttpClient, Poller, PollerOptions, StdoutList, TypedFormat};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::new()?;
    let client = HttpClient::new(&settings.api)?;
    let target = StdoutList::new(settings.poller.target_id.clone());
    let options = PollerOptions::from(&settings.poller);

    info!(
        url = client.products_url(),
        variant = ?settings.poller.variant,
        interval_secs = settings.poller.interval_secs,
        skip_overlapping = options.skip_overlapping,
        "Starting product poller"
    );

    let handle = match settings.poller.variant {
        Variant::Generic => Poller::new(client, GenericFormat, target, options).start()?,
        Variant::Typed => Poller::new(client, TypedFormat, target, options).start()?,
    };

    tokio::signal::ctrl_c().await?;
    info!("Shutdown requested");
    handle.stop().await;

    Ok(())
}
