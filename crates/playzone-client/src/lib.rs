//! # playzone-client: REST Client & Session Layer for PlayZone
//!
//! Talks to the PlayZone API and remembers who is signed in.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Client Architecture                              │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                   ApiClient (typed endpoints)                    │  │
//! │  │  login • register • create_booking • place_food_order • list_*  │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │                               ▼                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                   HttpClient (reqwest)                           │  │
//! │  │  base URL • bearer token • envelope • status → ClientError       │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │  ClientConfig  │  │  SessionStore  │  │  SubmitGate            │    │
//! │  │                │  │                │  │                        │    │
//! │  │ TOML + env     │  │ memory / file  │  │ one submission in      │    │
//! │  │ base URL,      │  │ token, profile │  │ flight, outcome        │    │
//! │  │ timeout        │  │ remember me    │  │ classification         │    │
//! │  └────────────────┘  └────────────────┘  └────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`api`] - Typed endpoint calls
//! - [`config`] - Client configuration (base URL, timeout, data dir)
//! - [`error`] - Client error types and the user-facing message mapping
//! - [`http`] - reqwest wrapper and response envelope
//! - [`session`] - Session persistence
//! - [`submit`] - Submission gate and outcomes
//!
//! ## Usage
//!
//! ```rust,ignore
//! use playzone_client::{ApiClient, ClientConfig};
//!
//! let config = ClientConfig::load_or_default(None);
//! let api = ApiClient::new(&config)?;
//!
//! let login = api.login("budi", "rahasia123", true).await?;
//! println!("Welcome, {}", login.user.name);
//!
//! for console in api.list_consoles().await? {
//!     println!("{}", console.name);
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod session;
pub mod submit;

// =============================================================================
// Re-exports
// =============================================================================

pub use api::{ApiClient, LoginResponse, OrderConfirmation, RegisterRequest};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, GENERIC_FAILURE_MESSAGE};
pub use http::{ApiResponse, HttpClient};
pub use session::{FileSessionStore, MemorySessionStore, RememberedLogin, Session, SessionStore};
pub use submit::{SubmissionOutcome, SubmitGate, SubmitGuard};
