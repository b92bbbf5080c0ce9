//! # Commands Module
//!
//! Everything the web frontend can ask the storefront to do.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs         ◄─── You are here (exports, shared 401 handling)
//! ├── booking.rs     ◄─── Catalogue lookups, wizard, quote, booking submit
//! ├── restaurant.rs  ◄─── Food order checkout
//! ├── auth.rs        ◄─── Login, remember me, register, logout
//! └── content.rs     ◄─── Promos, FAQs, transaction history
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only needs the API
//! async fn list_consoles(api: &ApiClient) -> NoticeResult<Vec<Console>>
//!
//! // Needs the booking store only
//! fn go_to_step(booking: &BookingStore, index: u8) -> NoticeResult<Step>
//!
//! // Needs all three (401 clears the session)
//! async fn submit_booking(api: &ApiClient, session: &SessionState,
//!                         booking: &BookingStore, today: NaiveDate)
//! ```
//!
//! Plain cart and selection edits (`add_food`, `select_room`, ...) have no
//! command wrapper; the frontend calls the store directly.

pub mod auth;
pub mod booking;
pub mod content;
pub mod restaurant;

use playzone_client::ApiClient;
use tracing::{info, warn};

use crate::state::SessionState;

/// Forgets the signed-in user after the server answered 401.
pub(crate) async fn expire_session(api: &ApiClient, session: &SessionState) {
    info!("Session rejected by server, signing out");
    api.clear_token().await;
    if let Err(e) = session.sign_out() {
        warn!(error = %e, "Could not clear saved session");
    }
}
