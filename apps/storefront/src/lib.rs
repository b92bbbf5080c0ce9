//! # PlayZone Storefront Library
//!
//! State and commands behind the PlayZone web frontend: console/room
//! booking, the restaurant, and the signed-in session.
//!
//! ## Module Organization
//! ```text
//! playzone_storefront/
//! ├── lib.rs             ◄─── You are here (Storefront container, logging)
//! ├── state/
//! │   ├── mod.rs         ◄─── State type exports
//! │   ├── booking.rs     ◄─── Selection, food cart, wizard step
//! │   ├── restaurant.rs  ◄─── Restaurant cart (saved to disk)
//! │   └── session.rs     ◄─── Signed-in user
//! ├── commands/
//! │   ├── mod.rs         ◄─── Command exports
//! │   ├── booking.rs     ◄─── Catalogue, wizard, booking submission
//! │   ├── restaurant.rs  ◄─── Food order checkout
//! │   ├── auth.rs        ◄─── Login, remember me, register, logout
//! │   └── content.rs     ◄─── Promos, FAQs, transactions
//! └── error.rs           ◄─── Notice type for the toast
//! ```
//!
//! ## State Management
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Storefront State                                     │
//! │                                                                         │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐   │
//! │  │   BookingStore   │ │ RestaurantStore  │ │    SessionState      │   │
//! │  │                  │ │                  │ │                      │   │
//! │  │  • Selection     │ │  • Food cart     │ │  • Token + profile   │   │
//! │  │  • Food cart     │ │  • Saved to disk │ │  • Remember me       │   │
//! │  │  • Wizard step   │ │                  │ │                      │   │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────────┘   │
//! │                                                                         │
//! │  Built once by Storefront::new and handed to commands explicitly.      │
//! │  Nothing is global; two Storefronts never share a cart.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use playzone_client::{ApiClient, ClientConfig, ClientResult, FileSessionStore, SessionStore};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use state::{BookingStore, RestaurantStore, SessionState};

/// Everything the frontend talks to, built once at startup.
#[derive(Debug, Clone)]
pub struct Storefront {
    pub config: ClientConfig,
    pub api: ApiClient,
    pub booking: BookingStore,
    pub restaurant: RestaurantStore,
    pub session: SessionState,
}

impl Storefront {
    /// Builds the stores for `config`.
    ///
    /// ## Startup Sequence
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────────┐
    /// │                                                                         │
    /// │  1. HTTP client ──────► base URL + timeout from config                  │
    /// │                                                                         │
    /// │  2. Data directory ───► PLAYZONE_DATA_DIR, [session] data_dir, or the   │
    /// │                         platform data dir                               │
    /// │                                                                         │
    /// │  3. Session ──────────► session.json read back (signed in or not)       │
    /// │                                                                         │
    /// │  4. Restaurant cart ──► restaurant_cart.json read back                  │
    /// │                                                                         │
    /// │  5. Booking ──────────► always starts empty at step 1                   │
    /// └─────────────────────────────────────────────────────────────────────────┘
    /// ```
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let api = ApiClient::new(&config)?;
        let data_dir = config.data_dir()?;
        info!(?data_dir, base_url = %config.base_url(), "Starting PlayZone storefront");

        let session = SessionState::load(Arc::new(FileSessionStore::new(&data_dir)));
        let restaurant = RestaurantStore::with_persistence(&data_dir);

        Ok(Storefront {
            config,
            api,
            booking: BookingStore::new(),
            restaurant,
            session,
        })
    }

    /// Builds a storefront around a caller-provided session store, with
    /// nothing written to disk.
    pub fn with_session_store(
        config: ClientConfig,
        store: Arc<dyn SessionStore>,
    ) -> ClientResult<Self> {
        Ok(Storefront {
            api: ApiClient::new(&config)?,
            config,
            booking: BookingStore::new(),
            restaurant: RestaurantStore::new(),
            session: SessionState::load(store),
        })
    }

    /// Local calendar date, used to reject bookings in the past.
    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=playzone_client=trace` - Show trace for the HTTP layer only
/// - Default: INFO, DEBUG for playzone crates
///
/// Calling it twice is harmless; the second call does nothing.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,playzone=debug,reqwest=warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .try_init();
}


#[cfg(test)]
mod tests {
    use super::*;
    use playzone_client::MemorySessionStore;
    use tempfile::TempDir;

    #[test]
    fn test_storefronts_do_not_share_state() {
        let config = ClientConfig::with_base_url("http://localhost:9000/api");
        let a = Storefront::with_session_store(config.clone(), Arc::new(MemorySessionStore::new()))
            .unwrap();
        let b = Storefront::with_session_store(config, Arc::new(MemorySessionStore::new()))
            .unwrap();

        a.booking.add_food(&test_support::menu_item(1, 10_000));
        a.restaurant.add(&test_support::menu_item(1, 10_000));
        assert_eq!(b.booking.total_items(), 0);
        assert_eq!(b.restaurant.total_items(), 0);
    }

    #[test]
    fn test_new_uses_configured_data_dir() {
        let dir = TempDir::new().unwrap();
        let mut config = ClientConfig::with_base_url("http://localhost:9000/api");
        config.session.data_dir = Some(dir.path().to_path_buf());

        let storefront = Storefront::new(config).unwrap();
        assert_eq!(
            storefront.restaurant.saved_at(),
            Some(dir.path().join(state::RESTAURANT_CART_FILE).as_path())
        );
        assert!(!storefront.session.is_signed_in());
    }

    #[test]
    fn test_init_tracing_twice() {
        init_tracing();
        init_tracing();
    }
}
