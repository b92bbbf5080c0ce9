//! # PlayZone API
//!
//! Typed calls for every endpoint the storefront uses.
//!
//! ## Endpoint Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         PlayZone REST API                               │
//! │                                                                         │
//! │  Auth                              Booking catalogue                   │
//! │  ────                              ─────────────────                   │
//! │  POST /auth/login                  GET /consoles                       │
//! │  POST /auth/token-login            GET /consoles/{id}/rooms            │
//! │  POST /auth/register               GET /rooms/{id}/units?date=         │
//! │  POST /auth/logout                 GET /games?console_id=              │
//! │                                    GET /payment-methods                │
//! │  Orders                                                                │
//! │  ──────                            Content                             │
//! │  POST /bookings                    ───────                             │
//! │  POST /food-orders                 GET /foods   GET /promos            │
//! │  GET  /transactions                GET /faqs                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use playzone_core::{
    BookingRequest, Console, EntityId, Faq, FoodItem, FoodOrderRequest, Game, Money,
    PaymentMethod, Promo, Room, Transaction, TransactionStatus, Unit, UserProfile,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::http::HttpClient;

/// Endpoint paths, relative to the configured base URL.
pub mod endpoints {
    pub const LOGIN: &str = "auth/login";
    pub const TOKEN_LOGIN: &str = "auth/token-login";
    pub const REGISTER: &str = "auth/register";
    pub const LOGOUT: &str = "auth/logout";

    pub const BOOKINGS: &str = "bookings";
    pub const FOOD_ORDERS: &str = "food-orders";
    pub const TRANSACTIONS: &str = "transactions";

    pub const CONSOLES: &str = "consoles";
    pub const GAMES: &str = "games";
    pub const PAYMENT_METHODS: &str = "payment-methods";
    pub const FOODS: &str = "foods";
    pub const PROMOS: &str = "promos";
    pub const FAQS: &str = "faqs";

    pub fn console_rooms(console_id: super::EntityId) -> String {
        format!("consoles/{}/rooms", console_id)
    }

    pub fn room_units(room_id: super::EntityId) -> String {
        format!("rooms/{}/units", room_id)
    }
}

// =============================================================================
// Request / Response Types
// =============================================================================

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
    remember: bool,
}

#[derive(Debug, Serialize)]
struct TokenLoginRequest<'a> {
    token: &'a str,
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Short-lived bearer token.
    pub token: String,
    pub user: UserProfile,
    /// Long-lived token issued when "remember me" was ticked.
    #[serde(default)]
    pub remember_token: Option<String>,
    #[serde(default)]
    pub remember_expires_at: Option<DateTime<Utc>>,
}

/// Registration form payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// What the server returns after accepting a booking or food order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub id: EntityId,
    pub invoice: String,
    pub total: Money,
    #[serde(default = "pending")]
    pub status: TransactionStatus,
    /// Payment page, when the chosen method needs one.
    #[serde(default)]
    pub payment_url: Option<String>,
}

fn pending() -> TransactionStatus {
    TransactionStatus::Pending
}

#[derive(Debug, Serialize)]
struct UnitQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<String>,
}

#[derive(Debug, Serialize)]
struct GameQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    console_id: Option<EntityId>,
}

// =============================================================================
// Client
// =============================================================================

/// Typed PlayZone API client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    pub fn from_http(http: HttpClient) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub async fn set_token(&self, token: impl Into<String>) {
        self.http.set_token(token).await;
    }

    pub async fn clear_token(&self) {
        self.http.clear_token().await;
    }

    pub async fn is_authenticated(&self) -> bool {
        self.http.token().await.is_some()
    }

    // ========== Auth API ==========

    /// Login with username (or email) and password.
    ///
    /// On success the bearer token is installed for later calls.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        remember: bool,
    ) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            username,
            password,
            remember,
        };
        let response: LoginResponse = self
            .http
            .post(endpoints::LOGIN, &request)
            .await?
            .into_data("login")?;

        self.http.set_token(response.token.clone()).await;
        info!(role = ?response.user.role, remembered = response.remember_token.is_some(), "Logged in");
        Ok(response)
    }

    /// Exchange a remembered-login token for a fresh session.
    pub async fn login_with_token(&self, remember_token: &str) -> ClientResult<LoginResponse> {
        let request = TokenLoginRequest {
            token: remember_token,
        };
        let response: LoginResponse = self
            .http
            .post(endpoints::TOKEN_LOGIN, &request)
            .await?
            .into_data("login")?;

        self.http.set_token(response.token.clone()).await;
        info!("Session restored from remembered login");
        Ok(response)
    }

    /// Create a customer account.
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<UserProfile> {
        self.http
            .post(endpoints::REGISTER, request)
            .await?
            .into_data("registration")
    }

    /// Revoke the session on the server, then drop the local token.
    ///
    /// The local token is dropped even when the server call fails.
    pub async fn logout(&self) -> ClientResult<()> {
        if let Err(e) = self.http.post_empty::<serde_json::Value>(endpoints::LOGOUT).await {
            warn!(?e, "Failed to revoke session on server");
        }
        self.http.clear_token().await;
        info!("Logged out");
        Ok(())
    }

    // ========== Orders ==========

    /// `POST /bookings`
    pub async fn create_booking(&self, request: &BookingRequest) -> ClientResult<OrderConfirmation> {
        self.http
            .post(endpoints::BOOKINGS, request)
            .await?
            .into_data("booking")
    }

    /// `POST /food-orders`
    pub async fn place_food_order(
        &self,
        request: &FoodOrderRequest,
    ) -> ClientResult<OrderConfirmation> {
        self.http
            .post(endpoints::FOOD_ORDERS, request)
            .await?
            .into_data("food order")
    }

    /// The signed-in customer's transactions, or every transaction for admins.
    pub async fn list_transactions(&self) -> ClientResult<Vec<Transaction>> {
        self.http
            .get(endpoints::TRANSACTIONS)
            .await?
            .into_data("transaction")
    }

    // ========== Catalogue ==========

    pub async fn list_consoles(&self) -> ClientResult<Vec<Console>> {
        self.http.get(endpoints::CONSOLES).await?.into_data("console")
    }

    pub async fn list_rooms(&self, console_id: EntityId) -> ClientResult<Vec<Room>> {
        self.http
            .get(&endpoints::console_rooms(console_id))
            .await?
            .into_data("room")
    }

    /// Units of a room; with a date, the server marks which are free that day.
    pub async fn list_units(
        &self,
        room_id: EntityId,
        date: Option<NaiveDate>,
    ) -> ClientResult<Vec<Unit>> {
        let query = UnitQuery {
            date: date.map(|d| d.format(playzone_core::BOOKING_DATE_FORMAT).to_string()),
        };
        self.http
            .get_with_query(&endpoints::room_units(room_id), &query)
            .await?
            .into_data("unit")
    }

    pub async fn list_games(&self, console_id: Option<EntityId>) -> ClientResult<Vec<Game>> {
        self.http
            .get_with_query(endpoints::GAMES, &GameQuery { console_id })
            .await?
            .into_data("game")
    }

    pub async fn list_payment_methods(&self) -> ClientResult<Vec<PaymentMethod>> {
        self.http
            .get(endpoints::PAYMENT_METHODS)
            .await?
            .into_data("payment method")
    }

    pub async fn list_foods(&self) -> ClientResult<Vec<FoodItem>> {
        self.http.get(endpoints::FOODS).await?.into_data("food")
    }

    pub async fn list_promos(&self) -> ClientResult<Vec<Promo>> {
        self.http.get(endpoints::PROMOS).await?.into_data("promo")
    }

    pub async fn list_faqs(&self) -> ClientResult<Vec<Faq>> {
        self.http.get(endpoints::FAQS).await?.into_data("faq")
    }
}
