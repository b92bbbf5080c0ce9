//! # Booking Commands

use chrono::NaiveDate;
use playzone_client::{ApiClient, ClientResult, OrderConfirmation, SubmissionOutcome};
use playzone_core::{
    Advance, BookingQuote, BookingRequest, Console, EntityId, FoodItem, Game, PaymentMethod, Promo,
    Room, Step, Unit,
};
use serde::Serialize;
use tracing::{debug, info};

use super::expire_session;
use crate::error::NoticeResult;
use crate::state::{BookingStore, SessionState};

/// Result of pressing "next" in the wizard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NextResponse {
    /// Moved to `step`.
    Moved { step: Step },
    /// "Next" on the last step submitted the booking.
    Submitted {
        outcome: SubmissionOutcome<OrderConfirmation>,
    },
}

// =============================================================================
// Catalogue
// =============================================================================

pub async fn list_consoles(api: &ApiClient) -> NoticeResult<Vec<Console>> {
    debug!("list_consoles command");
    Ok(api.list_consoles().await?)
}

pub async fn list_rooms(api: &ApiClient, console_id: EntityId) -> NoticeResult<Vec<Room>> {
    debug!(console_id, "list_rooms command");
    Ok(api.list_rooms(console_id).await?)
}

/// Units of the selected room, marked for the selected date if one is set.
///
/// Nothing to list until a room is chosen.
pub async fn list_units(api: &ApiClient, booking: &BookingStore) -> NoticeResult<Vec<Unit>> {
    let (room_id, date) =
        booking.with_state(|s| (s.selection.room.as_ref().map(|r| r.id), s.selection.date));
    debug!(?room_id, ?date, "list_units command");

    match room_id {
        Some(room_id) => Ok(api.list_units(room_id, date).await?),
        None => Ok(Vec::new()),
    }
}

/// Games for the selected console, or every game when none is selected.
pub async fn list_games(api: &ApiClient, booking: &BookingStore) -> NoticeResult<Vec<Game>> {
    let console_id = booking.with_state(|s| s.selection.console.as_ref().map(|c| c.id));
    debug!(?console_id, "list_games command");
    Ok(api.list_games(console_id).await?)
}

pub async fn list_payment_methods(api: &ApiClient) -> NoticeResult<Vec<PaymentMethod>> {
    Ok(api.list_payment_methods().await?)
}

pub async fn list_foods(api: &ApiClient) -> NoticeResult<Vec<FoodItem>> {
    Ok(api.list_foods().await?)
}

// =============================================================================
// Wizard
// =============================================================================

/// Advances the wizard; on the last step this submits the booking.
pub async fn next_step(
    api: &ApiClient,
    session: &SessionState,
    booking: &BookingStore,
    today: NaiveDate,
) -> NextResponse {
    match booking.next_step() {
        Advance::Moved(step) => {
            debug!(?step, "Wizard moved");
            NextResponse::Moved { step }
        }
        Advance::Submit => NextResponse::Submitted {
            outcome: submit_booking(api, session, booking, today).await,
        },
    }
}

pub fn previous_step(booking: &BookingStore) -> Step {
    booking.previous_step()
}

/// Jumps to an already visited step (1-based).
pub fn go_to_step(booking: &BookingStore, index: u8) -> NoticeResult<Step> {
    Ok(booking.go_to_step(index)?)
}

/// Price summary for the current selection and cart.
pub fn quote(
    booking: &BookingStore,
    promo: Option<&Promo>,
    today: NaiveDate,
) -> NoticeResult<BookingQuote> {
    let quote = booking.with_state(|s| BookingQuote::compute(&s.selection, &s.cart, promo, today))?;
    Ok(quote)
}

// =============================================================================
// Submission
// =============================================================================

/// Sends the booking as one POST.
///
/// ## Outcomes
/// - `Confirmed`: the booking store is reset (customer details kept) before
///   the gate reopens, so a second press finds nothing to send
/// - `LoginRequired`: the session is cleared; the booking is kept
/// - `Failed` / `Busy`: nothing changes, the customer may press submit again
pub async fn submit_booking(
    api: &ApiClient,
    session: &SessionState,
    booking: &BookingStore,
    today: NaiveDate,
) -> SubmissionOutcome<OrderConfirmation> {
    debug!("submit_booking command");

    let outcome = booking
        .gate()
        .run(
            || post_booking(api, booking, today),
            |receipt| {
                info!(invoice = %receipt.invoice, total = %receipt.total, "Booking confirmed");
                booking.reset();
            },
        )
        .await;
    booking.publish();

    if matches!(outcome, SubmissionOutcome::LoginRequired) {
        expire_session(api, session).await;
    }
    outcome
}

async fn post_booking(
    api: &ApiClient,
    booking: &BookingStore,
    today: NaiveDate,
) -> ClientResult<OrderConfirmation> {
    // gate is closed now; let subscribers see the spinner
    booking.publish();

    let request = booking
        .with_state(|s| BookingRequest::assemble(&s.selection, &s.cart, &s.details, today))?;
    info!(
        unit_id = request.unit_id,
        date = %request.date,
        duration = request.duration,
        foods = request.foods.len(),
        "Submitting booking"
    );
    api.create_booking(&request).await
}
