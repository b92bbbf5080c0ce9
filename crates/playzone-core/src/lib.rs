//! # playzone-core: Pure Booking & Ordering Logic for PlayZone
//!
//! Everything the storefront decides on its own, without talking to the
//! server: cart math, the booking wizard, request assembly and form checks.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PlayZone Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (React)                             │   │
//! │  │    Console ──► Room ──► Date & Time ──► Food ──► Checkout       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    playzone-storefront                          │   │
//! │  │    BookingStore, RestaurantStore, SessionState, commands        │   │
//! │  └──────────────┬──────────────────────────────┬───────────────────┘   │
//! │                 │                              │                        │
//! │  ┌──────────────▼──────────────────┐  ┌────────▼────────────────────┐  │
//! │  │  ★ playzone-core (THIS CRATE) ★ │  │      playzone-client        │  │
//! │  │                                 │  │  HTTP, session, submission  │  │
//! │  │  cart • selection • wizard      │  └─────────────────────────────┘  │
//! │  │  booking • money • validation   │                                   │
//! │  │                                 │                                   │
//! │  │  NO I/O • NO NETWORK • NO FS    │                                   │
//! │  └─────────────────────────────────┘                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalogue and account types (Console, Room, FoodItem, ...)
//! - [`money`] - Whole-rupiah money type
//! - [`cart`] - Food cart shared by the booking and restaurant flows
//! - [`selection`] - The customer's booking choices
//! - [`wizard`] - Four-step navigator
//! - [`booking`] - Request payloads and price quotes
//! - [`validation`] - Form checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use playzone_core::cart::Cart;
//! use playzone_core::money::Money;
//! use playzone_core::types::{FoodCategory, FoodItem};
//!
//! let nasi_goreng = FoodItem {
//!     id: 1,
//!     name: "Nasi Goreng".to_string(),
//!     price: Money::from_rupiah(10_000),
//!     category: FoodCategory::Food,
//!     image_ref: None,
//!     is_available: true,
//! };
//!
//! let mut cart = Cart::new();
//! cart.add(&nasi_goreng);
//! cart.add(&nasi_goreng);
//!
//! assert_eq!(cart.total_items(), 2);
//! assert_eq!(cart.total_price().to_string(), "Rp 20.000");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod booking;
pub mod cart;
pub mod error;
pub mod money;
pub mod selection;
pub mod types;
pub mod validation;
pub mod wizard;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use booking::{BookingDetails, BookingQuote, BookingRequest, FoodOrderLine, FoodOrderRequest};
pub use cart::{Cart, CartLine, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use selection::BookingSelection;
pub use types::*;
pub use wizard::{Advance, Step, StepNavigator};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Shortest rental, in hours.
pub const MIN_BOOKING_HOURS: u32 = 1;

/// Longest rental, in hours.
///
/// Matches the opening hours of a single day.
pub const MAX_BOOKING_HOURS: u32 = 12;

/// Wire format of booking dates (`yyyy-MM-dd`).
pub const BOOKING_DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format of start times.
pub const START_TIME_FORMAT: &str = "%H:%M";
