//! # Booking Requests
//!
//! Turns the accumulated store state into the payloads the API accepts.
//!
//! ## Assembly
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  BookingSelection ──┐                                                  │
//! │  (unit, game,       │                                                  │
//! │   date, time, hrs)  │                                                  │
//! │                     ├──► BookingRequest::assemble() ──► JSON POST body │
//! │  Cart ──────────────┤         │                                        │
//! │  (food lines)       │         ├── missing unit?      → CoreError       │
//! │                     │         ├── bad customer data? → ValidationError │
//! │  BookingDetails ────┘         └── date in the past?  → ValidationError │
//! │  (customer, payment,                                                   │
//! │   promo, event)                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Dates go on the wire as `yyyy-MM-dd`, start times as `HH:MM`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::selection::BookingSelection;
use crate::types::{CustomerData, EntityId, Promo};
use crate::validation::{
    validate_booking_date, validate_customer, validate_duration_hours, validate_event_name,
    validate_promo_code,
};
use crate::{BOOKING_DATE_FORMAT, START_TIME_FORMAT};

// =============================================================================
// Checkout Form
// =============================================================================

/// What the customer types on the checkout form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BookingDetails {
    pub customer: CustomerData,
    pub payment_method_id: Option<EntityId>,
    /// Free text; blank means no promo.
    #[serde(default)]
    pub promo_code: String,
    /// Free text; blank means no event.
    #[serde(default)]
    pub event_name: String,
}

// =============================================================================
// Wire Payloads
// =============================================================================

/// One food line of an order payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FoodOrderLine {
    pub food_id: EntityId,
    pub quantity: u32,
}

/// Converts cart lines to order lines, keeping cart order.
fn food_lines(cart: &Cart) -> Vec<FoodOrderLine> {
    cart.lines()
        .iter()
        .map(|line| FoodOrderLine {
            food_id: line.id,
            quantity: line.quantity,
        })
        .collect()
}

/// Body of `POST /bookings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BookingRequest {
    pub unit_id: EntityId,
    pub game_id: Option<EntityId>,
    /// `yyyy-MM-dd`
    pub date: String,
    /// `HH:MM`
    pub start_time: String,
    /// Whole hours.
    pub duration: u32,
    pub customer: CustomerData,
    pub payment_method_id: EntityId,
    pub foods: Vec<FoodOrderLine>,
    pub promo_code: Option<String>,
    pub event_name: Option<String>,
}

impl BookingRequest {
    /// Builds the request from the booking store state.
    ///
    /// ## Checks (in order)
    /// 1. Unit, date, start time, duration chosen
    /// 2. Payment method chosen
    /// 3. Duration within range, date not before `today`
    /// 4. Customer name, email, phone valid
    /// 5. Promo code and event name well-formed (blank → `None`)
    pub fn assemble(
        selection: &BookingSelection,
        cart: &Cart,
        details: &BookingDetails,
        today: NaiveDate,
    ) -> CoreResult<Self> {
        let unit_id = required(selection.unit_id, "unit")?;
        let date = required(selection.date, "date")?;
        let start_time = required(selection.start_time, "start time")?;
        let duration = required(selection.duration_hours, "duration")?;
        let payment_method_id = required(details.payment_method_id, "payment method")?;

        validate_duration_hours(duration)?;
        validate_booking_date(date, today)?;
        validate_customer(&details.customer)?;
        let promo_code = validate_promo_code(&details.promo_code)?;
        let event_name = validate_event_name(&details.event_name)?;

        Ok(BookingRequest {
            unit_id,
            game_id: selection.game.as_ref().map(|g| g.id),
            date: date.format(BOOKING_DATE_FORMAT).to_string(),
            start_time: start_time.format(START_TIME_FORMAT).to_string(),
            duration,
            customer: CustomerData {
                name: details.customer.name.trim().to_string(),
                email: details.customer.email.trim().to_string(),
                phone: details.customer.phone.trim().to_string(),
            },
            payment_method_id,
            foods: food_lines(cart),
            promo_code,
            event_name,
        })
    }
}

fn required<T>(value: Option<T>, field: &str) -> CoreResult<T> {
    value.ok_or_else(|| CoreError::IncompleteSelection {
        field: field.to_string(),
    })
}

/// Body of `POST /food-orders` (restaurant flow).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FoodOrderRequest {
    pub foods: Vec<FoodOrderLine>,
    pub payment_method_id: EntityId,
    pub notes: Option<String>,
}

impl FoodOrderRequest {
    /// Builds a restaurant order. An empty cart cannot be ordered.
    pub fn assemble(cart: &Cart, payment_method_id: EntityId, notes: &str) -> CoreResult<Self> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let notes = notes.trim();
        Ok(FoodOrderRequest {
            foods: food_lines(cart),
            payment_method_id,
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        })
    }
}

// =============================================================================
// Quote
// =============================================================================

/// Price summary shown next to the wizard.
///
/// ```text
///   rental    = room.price_per_hour × duration
///   food      = cart.total_price()
///   discount  = (rental + food) × promo %
///   total     = rental + food - discount
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BookingQuote {
    pub rental: Money,
    pub food: Money,
    pub discount: Money,
    pub total: Money,
}

impl BookingQuote {
    /// Computes the quote. Missing room or duration contribute zero rental.
    ///
    /// An expired promo is rejected rather than silently ignored.
    pub fn compute(
        selection: &BookingSelection,
        cart: &Cart,
        promo: Option<&Promo>,
        today: NaiveDate,
    ) -> CoreResult<Self> {
        let rental = match (&selection.room, selection.duration_hours) {
            (Some(room), Some(hours)) => room.price_for(hours),
            _ => Money::zero(),
        };
        let food = cart.total_price();
        let subtotal = rental + food;

        let discount = match promo {
            Some(promo) if !promo.is_valid_on(today) => {
                return Err(CoreError::PromoExpired {
                    code: promo.code.clone(),
                })
            }
            Some(promo) => subtotal.discount_for(promo.discount_rate()),
            None => Money::zero(),
        };

        Ok(BookingQuote {
            rental,
            food,
            discount,
            total: subtotal - discount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::types::{FoodCategory, FoodItem, Game, Room};
    use chrono::NaiveTime;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn room() -> Room {
        Room {
            id: 2,
            console_id: 1,
            name: "Regular PS5".to_string(),
            price_per_hour: Money::from_rupiah(20_000),
            capacity: Some(4),
            image_ref: None,
        }
    }

    fn complete_selection() -> BookingSelection {
        let mut selection = BookingSelection::new();
        selection.select_room(room());
        selection.select_unit(11);
        selection.select_game(Some(Game {
            id: 5,
            name: "EA FC 26".to_string(),
            console_id: Some(1),
            genre: None,
            image_ref: None,
        }));
        selection.set_date(NaiveDate::from_ymd_opt(2026, 10, 20).unwrap());
        selection.set_start_time(NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        selection.set_duration(3);
        selection
    }

    fn details() -> BookingDetails {
        BookingDetails {
            customer: CustomerData {
                name: " Budi ".to_string(),
                email: "budi@example.com".to_string(),
                phone: "081234567890".to_string(),
            },
            payment_method_id: Some(4),
            promo_code: "weekend".to_string(),
            event_name: String::new(),
        }
    }

    fn cart_with(id: EntityId, price: i64, qty: u32) -> Cart {
        let item = FoodItem {
            id,
            name: "Es Teh".to_string(),
            price: Money::from_rupiah(price),
            category: FoodCategory::Drink,
            image_ref: None,
            is_available: true,
        };
        let mut cart = Cart::new();
        for _ in 0..qty {
            cart.add(&item);
        }
        cart
    }

    #[test]
    fn test_assemble_complete_booking() {
        let cart = cart_with(8, 5_000, 2);
        let request =
            BookingRequest::assemble(&complete_selection(), &cart, &details(), today()).unwrap();

        assert_eq!(request.unit_id, 11);
        assert_eq!(request.game_id, Some(5));
        assert_eq!(request.date, "2026-10-20");
        assert_eq!(request.start_time, "09:30");
        assert_eq!(request.duration, 3);
        assert_eq!(request.customer.name, "Budi");
        assert_eq!(request.payment_method_id, 4);
        assert_eq!(
            request.foods,
            vec![FoodOrderLine {
                food_id: 8,
                quantity: 2
            }]
        );
        assert_eq!(request.promo_code.as_deref(), Some("WEEKEND"));
        assert_eq!(request.event_name, None);
    }

    #[test]
    fn test_request_json_shape() {
        let request =
            BookingRequest::assemble(&complete_selection(), &Cart::new(), &details(), today())
                .unwrap();
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["date"], "2026-10-20");
        assert_eq!(json["start_time"], "09:30");
        assert_eq!(json["customer"]["email"], "budi@example.com");
        assert!(json["foods"].as_array().unwrap().is_empty());
        assert!(json["event_name"].is_null());
    }

    #[test]
    fn test_assemble_reports_first_missing_field() {
        let mut selection = complete_selection();
        selection.unit_id = None;
        selection.duration_hours = None;

        let err =
            BookingRequest::assemble(&selection, &Cart::new(), &details(), today()).unwrap_err();
        assert!(matches!(
            err,
            CoreError::IncompleteSelection { ref field } if field == "unit"
        ));
    }

    #[test]
    fn test_game_is_optional() {
        let mut selection = complete_selection();
        selection.select_game(None);

        let request =
            BookingRequest::assemble(&selection, &Cart::new(), &details(), today()).unwrap();
        assert_eq!(request.game_id, None);
    }

    #[test]
    fn test_assemble_requires_payment_method() {
        let mut details = details();
        details.payment_method_id = None;

        let err = BookingRequest::assemble(&complete_selection(), &Cart::new(), &details, today())
            .unwrap_err();
        assert_eq!(err.to_string(), "Please choose a payment method before booking");
    }

    #[test]
    fn test_assemble_rejects_past_date_and_bad_customer() {
        let mut selection = complete_selection();
        selection.set_date(NaiveDate::from_ymd_opt(2026, 10, 1).unwrap());
        let err =
            BookingRequest::assemble(&selection, &Cart::new(), &details(), today()).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InPast { .. })
        ));

        let mut details = details();
        details.customer.email = "not-an-email".to_string();
        let err = BookingRequest::assemble(&complete_selection(), &Cart::new(), &details, today())
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_food_order_requires_items() {
        assert!(matches!(
            FoodOrderRequest::assemble(&Cart::new(), 1, ""),
            Err(CoreError::EmptyCart)
        ));

        let order = FoodOrderRequest::assemble(&cart_with(3, 7_000, 1), 1, "  no ice ").unwrap();
        assert_eq!(order.foods.len(), 1);
        assert_eq!(order.notes.as_deref(), Some("no ice"));
    }

    #[test]
    fn test_quote_with_promo() {
        let promo = Promo {
            id: 1,
            code: "WEEKEND".to_string(),
            name: "Weekend".to_string(),
            description: None,
            discount_percent: 10,
            valid_until: None,
        };
        let cart = cart_with(8, 5_000, 2);

        let quote =
            BookingQuote::compute(&complete_selection(), &cart, Some(&promo), today()).unwrap();
        assert_eq!(quote.rental.rupiah(), 60_000);
        assert_eq!(quote.food.rupiah(), 10_000);
        assert_eq!(quote.discount.rupiah(), 7_000);
        assert_eq!(quote.total.rupiah(), 63_000);
    }

    #[test]
    fn test_quote_without_room_has_no_rental() {
        let quote =
            BookingQuote::compute(&BookingSelection::new(), &cart_with(1, 4_000, 1), None, today())
                .unwrap();
        assert!(quote.rental.is_zero());
        assert_eq!(quote.total.rupiah(), 4_000);
    }

    #[test]
    fn test_quote_rejects_expired_promo() {
        let promo = Promo {
            id: 1,
            code: "AUGUST".to_string(),
            name: "August".to_string(),
            description: None,
            discount_percent: 20,
            valid_until: NaiveDate::from_ymd_opt(2026, 8, 31),
        };
        let err = BookingQuote::compute(&complete_selection(), &Cart::new(), Some(&promo), today())
            .unwrap_err();
        assert!(matches!(err, CoreError::PromoExpired { .. }));
    }
}
