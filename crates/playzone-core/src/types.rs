//! # Domain Types
//!
//! Catalogue, account and transaction types shared by the booking flow,
//! the restaurant flow and the API client.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Booking catalogue          Restaurant             Accounts             │
//! │  ─────────────────          ──────────             ────────             │
//! │  Console                    FoodItem               UserProfile          │
//! │    └── Room (price/hour)      └── FoodCategory       └── UserRole       │
//! │          └── Unit                                  CustomerData         │
//! │  Game                                                                   │
//! │                                                                         │
//! │  Checkout                   Content                History              │
//! │  ────────                   ───────                ───────              │
//! │  PaymentMethod              Faq                    Transaction          │
//! │  Promo ── DiscountRate                               └── Status         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All of these come from the external API as JSON and are exported to
//! TypeScript so the React views render the same shapes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Identifier used by the API for every catalogue entity.
pub type EntityId = i64;

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so a 15% promo is 1500 bps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a rate from a whole percentage (15 → 15%).
    #[inline]
    pub const fn from_percent(percent: u32) -> Self {
        DiscountRate(percent * 100)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero discount.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

// =============================================================================
// Booking Catalogue
// =============================================================================

/// A console family offered for rent (PS5, Xbox Series X, Switch...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Console {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_ref: Option<String>,
}

/// A room that hosts units of one console family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Room {
    pub id: EntityId,
    pub console_id: EntityId,
    pub name: String,
    /// Rental price per started hour.
    pub price_per_hour: Money,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub image_ref: Option<String>,
}

impl Room {
    /// Rental price for a whole number of hours.
    #[inline]
    pub fn price_for(&self, hours: u32) -> Money {
        self.price_per_hour * hours
    }
}

/// A single bookable station inside a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Unit {
    pub id: EntityId,
    pub room_id: EntityId,
    pub name: String,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

/// A game title that can be pre-installed for the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Game {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub console_id: Option<EntityId>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub image_ref: Option<String>,
}

fn default_true() -> bool {
    true
}

// =============================================================================
// Restaurant
// =============================================================================

/// Menu section a food item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum FoodCategory {
    #[default]
    Food,
    Drink,
    Snack,
    /// Any category this client does not know about yet.
    #[serde(other)]
    Other,
}

/// A menu entry. Both carts are filled with these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FoodItem {
    pub id: EntityId,
    pub name: String,
    pub price: Money,
    #[serde(default)]
    pub category: FoodCategory,
    #[serde(default)]
    pub image_ref: Option<String>,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

// =============================================================================
// Checkout
// =============================================================================

/// A payment channel configured on the server (bank transfer, e-wallet...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentMethod {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub account_number: Option<String>,
}

/// A promotional code with a percentage discount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Promo {
    pub id: EntityId,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Whole percent, 0-100.
    pub discount_percent: u32,
    /// Last day (inclusive) the code can be redeemed.
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub valid_until: Option<NaiveDate>,
}

impl Promo {
    /// Discount rate, clamped to 100%.
    pub fn discount_rate(&self) -> DiscountRate {
        DiscountRate::from_percent(self.discount_percent.min(100))
    }

    /// Whether the promo can still be redeemed on `today`.
    pub fn is_valid_on(&self, today: NaiveDate) -> bool {
        self.valid_until.map_or(true, |last| today <= last)
    }
}

// =============================================================================
// Content
// =============================================================================

/// A landing-page FAQ entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Faq {
    pub id: EntityId,
    pub question: String,
    pub answer: String,
}

// =============================================================================
// Accounts
// =============================================================================

/// Account role. Admin unlocks the dashboard screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    #[default]
    Customer,
}

/// The denormalized profile kept next to the auth token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserProfile {
    #[serde(default)]
    pub role: UserRole,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl UserProfile {
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Contact details attached to a booking.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerData {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<&UserProfile> for CustomerData {
    fn from(profile: &UserProfile) -> Self {
        CustomerData {
            name: profile.name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
        }
    }
}

// =============================================================================
// Transactions
// =============================================================================

/// Payment state of a booking or food order on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Paid,
    Completed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

/// A row of the transaction history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Transaction {
    pub id: EntityId,
    pub invoice: String,
    pub customer_name: String,
    pub total: Money,
    pub status: TransactionStatus,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_rate_from_percent() {
        let rate = DiscountRate::from_percent(15);
        assert_eq!(rate.bps(), 1500);
        assert!(!rate.is_zero());
        assert!(DiscountRate::default().is_zero());
    }

    #[test]
    fn test_room_price_for_hours() {
        let room = Room {
            id: 3,
            console_id: 1,
            name: "VIP PS5".to_string(),
            price_per_hour: Money::from_rupiah(25_000),
            capacity: Some(4),
            image_ref: None,
        };
        assert_eq!(room.price_for(3).rupiah(), 75_000);

        let gilded = Room {
            price_per_hour: Money::from_rupiah(5_000_000_000_000_000_000),
            ..room
        };
        assert_eq!(gilded.price_for(2).rupiah(), i64::MAX);
    }

    #[test]
    fn test_promo_validity_and_clamp() {
        let promo = Promo {
            id: 1,
            code: "WEEKEND".to_string(),
            name: "Weekend deal".to_string(),
            description: None,
            discount_percent: 150,
            valid_until: NaiveDate::from_ymd_opt(2026, 10, 31),
        };
        assert_eq!(promo.discount_rate().bps(), 10_000);

        let before = NaiveDate::from_ymd_opt(2026, 10, 31).unwrap();
        let after = NaiveDate::from_ymd_opt(2026, 11, 1).unwrap();
        assert!(promo.is_valid_on(before));
        assert!(!promo.is_valid_on(after));
    }

    #[test]
    fn test_food_item_defaults_from_api() {
        let item: FoodItem =
            serde_json::from_str(r#"{"id": 7, "name": "Indomie", "price": 15000}"#).unwrap();
        assert_eq!(item.category, FoodCategory::Food);
        assert!(item.is_available);
        assert!(item.image_ref.is_none());
    }

    #[test]
    fn test_unknown_enum_values_do_not_fail() {
        let category: FoodCategory = serde_json::from_str("\"dessert\"").unwrap();
        assert_eq!(category, FoodCategory::Other);

        let status: TransactionStatus = serde_json::from_str("\"refunded\"").unwrap();
        assert_eq!(status, TransactionStatus::Unknown);
    }

    #[test]
    fn test_profile_role() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"role": "admin", "name": "Rina", "email": "rina@example.com"}"#,
        )
        .unwrap();
        assert!(profile.is_admin());
        assert_eq!(profile.phone, "");

        let customer = CustomerData::from(&profile);
        assert_eq!(customer.email, "rina@example.com");
    }
}
