//! # PlayZone Storefront Entry Point
//!
//! Starts the storefront against the configured API and prints what a
//! customer would see on the landing page. Useful for checking a config
//! file and the API connection without the web frontend.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load `storefront.toml` + `PLAYZONE_*` environment overrides
//! 3. Build the stores (session and restaurant cart read back from disk)
//! 4. Restore the session (saved token or remembered login)
//! 5. List consoles and promos
//! 6. Show a saved restaurant cart, priced per `[storefront]` settings

use playzone_client::ClientConfig;
use playzone_storefront::commands::{auth, booking, content};
use playzone_storefront::{init_tracing, Storefront};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    init_tracing();

    let config = ClientConfig::load_or_default(None);
    let storefront = match Storefront::new(config) {
        Ok(storefront) => storefront,
        Err(e) => {
            error!(error = %e, "Could not start storefront");
            std::process::exit(1);
        }
    };

    match auth::restore_session(&storefront.api, &storefront.session, &storefront.config).await {
        Ok(Some(profile)) => info!(name = %profile.name, admin = profile.is_admin(), "Signed in"),
        Ok(None) => info!("Not signed in"),
        Err(notice) => error!(%notice, "Could not restore session"),
    }

    match booking::list_consoles(&storefront.api).await {
        Ok(consoles) => {
            for console in consoles {
                println!("{:>4}  {}", console.id, console.name);
            }
        }
        Err(notice) => error!(%notice, "Could not load consoles"),
    }

    match content::list_promos(&storefront.api).await {
        Ok(promos) => {
            for promo in promos {
                println!("{:>10}  {}% off  {}", promo.code, promo.discount_percent, promo.name);
            }
        }
        Err(notice) => error!(%notice, "Could not load promos"),
    }

    let cart = storefront.restaurant.snapshot();
    if cart.totals.total_items > 0 {
        println!(
            "Restaurant cart: {} items, {}",
            cart.totals.total_items,
            storefront.config.storefront.format_price(cart.totals.total_price)
        );
    }
}
