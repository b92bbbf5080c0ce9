//! # Restaurant Commands

use playzone_client::{ApiClient, ClientResult, OrderConfirmation, SubmissionOutcome};
use playzone_core::{EntityId, FoodOrderRequest};
use tracing::{debug, info};

use super::expire_session;
use crate::state::{RestaurantStore, SessionState};

/// Orders everything in the restaurant cart.
///
/// Same outcomes as a booking: the cart is cleared only when confirmed (and
/// before the gate reopens), a 401 signs the user out, anything else leaves
/// the cart for another try.
pub async fn checkout(
    api: &ApiClient,
    session: &SessionState,
    store: &RestaurantStore,
    payment_method_id: EntityId,
    notes: &str,
) -> SubmissionOutcome<OrderConfirmation> {
    debug!(payment_method_id, "checkout command");

    let outcome = store
        .gate()
        .run(
            || place_order(api, store, payment_method_id, notes),
            |receipt| {
                info!(invoice = %receipt.invoice, total = %receipt.total, "Food order confirmed");
                store.clear();
            },
        )
        .await;
    store.publish();

    if matches!(outcome, SubmissionOutcome::LoginRequired) {
        expire_session(api, session).await;
    }
    outcome
}

async fn place_order(
    api: &ApiClient,
    store: &RestaurantStore,
    payment_method_id: EntityId,
    notes: &str,
) -> ClientResult<OrderConfirmation> {
    store.publish();

    let request = store.with_cart(|c| FoodOrderRequest::assemble(c, payment_method_id, notes))?;
    info!(lines = request.foods.len(), "Placing food order");
    api.place_food_order(&request).await
}
