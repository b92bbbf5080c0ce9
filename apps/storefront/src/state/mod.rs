//! # State Module
//!
//! The stores the frontend reads and mutates. Each one is a separate,
//! cheaply clonable handle; nothing is global. Whoever builds the app
//! creates them once and passes them to the commands that need them.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Storefront                                 │   │
//! │  │  api, booking, restaurant, session  (built once at startup)     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────┐          │
//! │  │ BookingStore │  │ RestaurantStore  │  │  SessionState    │          │
//! │  │              │  │                  │  │                  │          │
//! │  │ selection    │  │ Arc<Mutex<Cart>> │  │ Session in memory│          │
//! │  │ food cart    │  │ saved to disk    │  │ + SessionStore   │          │
//! │  │ wizard step  │  │                  │  │                  │          │
//! │  └──────────────┘  └──────────────────┘  └──────────────────┘          │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • BookingStore / RestaurantStore: Arc<Mutex<T>>, one lock per store   │
//! │  • SessionState: Arc<RwLock<Option<Session>>>                          │
//! │  • Both carts own a SubmitGate so each order submits at most once      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod booking;
mod restaurant;
mod session;

pub use booking::{BookingSnapshot, BookingState, BookingStore};
pub use restaurant::{RestaurantSnapshot, RestaurantStore, RESTAURANT_CART_FILE};
pub use session::SessionState;
