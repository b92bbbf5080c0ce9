//! # Restaurant Store
//!
//! The stand-alone food ordering cart. Independent of the booking cart.
//!
//! ## Persistence
//! When built with a data directory the cart survives restarts:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  with_persistence(dir) ──► read restaurant_cart.json (if any)          │
//! │                                                                         │
//! │  add / remove ───────────► write restaurant_cart.json                  │
//! │                                                                         │
//! │  clear / cart empties ───► delete restaurant_cart.json                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed write is logged and otherwise ignored: cart operations never fail.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use playzone_client::SubmitGate;
use playzone_core::{Cart, CartLine, CartTotals, EntityId, FoodItem, Money};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// File name of the saved cart inside the data directory.
pub const RESTAURANT_CART_FILE: &str = "restaurant_cart.json";

/// Read-only view published after every change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSnapshot {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
    pub submitting: bool,
}

impl RestaurantSnapshot {
    fn capture(cart: &Cart, submitting: bool) -> Self {
        RestaurantSnapshot {
            lines: cart.lines().to_vec(),
            totals: CartTotals::from(cart),
            submitting,
        }
    }
}

/// Injected restaurant store. Clones share state.
#[derive(Debug, Clone)]
pub struct RestaurantStore {
    cart: Arc<Mutex<Cart>>,
    saved_at: Option<PathBuf>,
    gate: Arc<SubmitGate>,
    updates: Arc<watch::Sender<RestaurantSnapshot>>,
}

impl Default for RestaurantStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RestaurantStore {
    /// In-memory cart, gone when the process exits.
    pub fn new() -> Self {
        Self::from_cart(Cart::new(), None)
    }

    /// Cart saved to `dir/restaurant_cart.json`, restored now if present.
    pub fn with_persistence(dir: impl AsRef<Path>) -> Self {
        let path = dir.as_ref().join(RESTAURANT_CART_FILE);
        let cart = restore(&path);
        Self::from_cart(cart, Some(path))
    }

    fn from_cart(cart: Cart, saved_at: Option<PathBuf>) -> Self {
        let (updates, _) = watch::channel(RestaurantSnapshot::capture(&cart, false));
        RestaurantStore {
            cart: Arc::new(Mutex::new(cart)),
            saved_at,
            gate: Arc::new(SubmitGate::new()),
            updates: Arc::new(updates),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Cart> {
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Executes a function with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.lock();
        f(&cart)
    }

    /// Executes a function with write access, then saves and publishes.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.lock();
        let result = f(&mut cart);
        if let Some(path) = &self.saved_at {
            persist(path, &cart);
        }
        self.updates
            .send_replace(RestaurantSnapshot::capture(&cart, self.gate.is_submitting()));
        result
    }

    pub fn snapshot(&self) -> RestaurantSnapshot {
        let cart = self.lock();
        RestaurantSnapshot::capture(&cart, self.gate.is_submitting())
    }

    pub fn subscribe(&self) -> watch::Receiver<RestaurantSnapshot> {
        self.updates.subscribe()
    }

    pub fn publish(&self) {
        let cart = self.lock();
        self.updates
            .send_replace(RestaurantSnapshot::capture(&cart, self.gate.is_submitting()));
    }

    pub fn gate(&self) -> &SubmitGate {
        &self.gate
    }

    /// Where the cart is saved, if anywhere.
    pub fn saved_at(&self) -> Option<&Path> {
        self.saved_at.as_deref()
    }

    // =========================================================================
    // Cart Operations
    // =========================================================================

    pub fn add(&self, item: &FoodItem) -> u32 {
        let quantity = self.with_cart_mut(|c| c.add(item));
        debug!(item_id = item.id, quantity, "Restaurant cart add");
        quantity
    }

    pub fn remove(&self, item_id: EntityId) -> bool {
        let changed = self.with_cart_mut(|c| c.remove(item_id));
        debug!(item_id, changed, "Restaurant cart remove");
        changed
    }

    pub fn quantity_of(&self, item_id: EntityId) -> u32 {
        self.with_cart(|c| c.quantity_of(item_id))
    }

    pub fn total_items(&self) -> u32 {
        self.with_cart(|c| c.total_items())
    }

    pub fn total_price(&self) -> Money {
        self.with_cart(|c| c.total_price())
    }

    pub fn clear(&self) {
        self.with_cart_mut(|c| c.clear());
    }
}

fn restore(path: &Path) -> Cart {
    if !path.exists() {
        return Cart::new();
    }

    let cart = fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|json| serde_json::from_str::<Cart>(&json).map_err(|e| e.to_string()));

    // Cart's Deserialize merges repeated ids and drops empty lines
    match cart {
        Ok(cart) => {
            info!(?path, items = cart.total_items(), "Restored restaurant cart");
            cart
        }
        Err(e) => {
            warn!(?path, error = %e, "Saved restaurant cart unreadable, starting fresh");
            Cart::new()
        }
    }
}

fn persist(path: &Path, cart: &Cart) {
    let result = if cart.is_empty() {
        match fs::remove_file(path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.to_string()),
            _ => Ok(()),
        }
    } else {
        serde_json::to_string(cart)
            .map_err(|e| e.to_string())
            .and_then(|json| {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent).map_err(|e| e.to_string())?;
                }
                fs::write(path, json).map_err(|e| e.to_string())
            })
    };

    if let Err(e) = result {
        warn!(?path, error = %e, "Failed to save restaurant cart");
    }
}
