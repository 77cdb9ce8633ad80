//! Headless dashboard runner.
//!
//! Verifies the stored session, fetches the inventory, and prints the first
//! page. Useful for smoke-testing a deployment without a UI attached.

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use stockdeck_api::{ApiClient, ApiConfig, ImageUploader, SessionStore};
use stockdeck_core::StockLevel;
use stockdeck_dashboard::{AuthOutcome, Dashboard};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration
    let config = ApiConfig::load()?;
    info!(base_url = %config.base_url, "Configuration loaded");

    let store = SessionStore::open_default()?;
    let gateway = Arc::new(ApiClient::new(config.clone())?);
    let images = Arc::new(ImageUploader::new(config)?);
    let dashboard = Dashboard::new(gateway, images, store);

    // Auth gate
    match dashboard.authorize().await {
        AuthOutcome::Admin => info!("Authorized as admin"),
        AuthOutcome::Staff => info!("Authorized as staff (read-only)"),
        AuthOutcome::RedirectToLogin => {
            warn!("No valid session; log in and try again");
            return Ok(());
        }
    }

    dashboard.refresh_inventory().await;
    if let Some(message) = dashboard.inventory.error() {
        warn!("{}", message);
        return Ok(());
    }

    let page = dashboard.visible_page();
    info!(
        total = page.total_count,
        pages = page.total_pages,
        showing_from = page.showing_from,
        showing_to = page.showing_to,
        "Inventory loaded"
    );

    for item in &page.page_items {
        let level = StockLevel::from_quantity(item.quantity);
        if level.is_warning() {
            info!(
                id = item.id,
                sku = %item.sku,
                quantity = item.quantity,
                level = ?level,
                "{}", item.product_name
            );
        } else {
            info!(id = item.id, sku = %item.sku, quantity = item.quantity, "{}", item.product_name);
        }
    }

    Ok(())
}
