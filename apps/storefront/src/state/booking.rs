//! # Booking Store
//!
//! The in-progress booking: selection, food cart, wizard position, checkout
//! form and the submitting flag.
//!
//! ## Thread Safety
//! Everything lives behind one `Arc<Mutex<BookingState>>`; each operation
//! holds the lock for its whole body, so a mutation and the snapshot it
//! publishes are never interleaved with another mutation.
//!
//! ## Subscriptions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  add_food() ─┐                                                          │
//! │  select_*() ─┼──► with_state_mut() ──► BookingSnapshot ──► watch::Sender│
//! │  next_step() ┘         (locked)                                │        │
//! │                                                                │        │
//! │            summary view ◄── watch::Receiver ◄──────────────────┤        │
//! │            step header  ◄── watch::Receiver ◄──────────────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{NaiveDate, NaiveTime};
use playzone_client::SubmitGate;
use playzone_core::{
    Advance, BookingDetails, BookingSelection, Cart, CartLine, CartTotals, Console, CoreResult,
    EntityId, FoodItem, Game, Money, Room, Step, StepNavigator,
};
use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

/// Everything the booking flow remembers.
#[derive(Debug, Clone, Default)]
pub struct BookingState {
    pub selection: BookingSelection,
    pub cart: Cart,
    pub navigator: StepNavigator,
    pub details: BookingDetails,
}

/// Read-only view published after every change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSnapshot {
    pub selection: BookingSelection,
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
    pub step: Step,
    pub furthest_step: Step,
    pub details: BookingDetails,
    pub submitting: bool,
}

impl BookingSnapshot {
    fn capture(state: &BookingState, submitting: bool) -> Self {
        BookingSnapshot {
            selection: state.selection.clone(),
            lines: state.cart.lines().to_vec(),
            totals: CartTotals::from(&state.cart),
            step: state.navigator.current(),
            furthest_step: state.navigator.furthest_visited(),
            details: state.details.clone(),
            submitting,
        }
    }
}

/// Injected booking store. Clones share state.
#[derive(Debug, Clone)]
pub struct BookingStore {
    state: Arc<Mutex<BookingState>>,
    gate: Arc<SubmitGate>,
    updates: Arc<watch::Sender<BookingSnapshot>>,
}

impl Default for BookingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingStore {
    /// Creates an empty booking at step 1.
    pub fn new() -> Self {
        let state = BookingState::default();
        let (updates, _) = watch::channel(BookingSnapshot::capture(&state, false));
        BookingStore {
            state: Arc::new(Mutex::new(state)),
            gate: Arc::new(SubmitGate::new()),
            updates: Arc::new(updates),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BookingState> {
        // state is plain data; a panic mid-update cannot leave it unsafe to read
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Executes a function with read access to the state.
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&BookingState) -> R,
    {
        let state = self.lock();
        f(&state)
    }

    /// Executes a function with write access, then publishes a snapshot.
    pub fn with_state_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut BookingState) -> R,
    {
        let mut state = self.lock();
        let result = f(&mut state);
        self.updates
            .send_replace(BookingSnapshot::capture(&state, self.gate.is_submitting()));
        result
    }

    pub fn snapshot(&self) -> BookingSnapshot {
        let state = self.lock();
        BookingSnapshot::capture(&state, self.gate.is_submitting())
    }

    /// Receives a new snapshot after every change.
    pub fn subscribe(&self) -> watch::Receiver<BookingSnapshot> {
        self.updates.subscribe()
    }

    /// Re-publishes the current state (used when only the submitting flag moved).
    pub fn publish(&self) {
        self.with_state_mut(|_| ());
    }

    pub fn gate(&self) -> &SubmitGate {
        &self.gate
    }

    pub fn is_submitting(&self) -> bool {
        self.gate.is_submitting()
    }

    // =========================================================================
    // Food Cart
    // =========================================================================

    /// Adds one of `item`; returns the new quantity.
    pub fn add_food(&self, item: &FoodItem) -> u32 {
        let quantity = self.with_state_mut(|s| s.cart.add(item));
        debug!(item_id = item.id, quantity, "Booking cart add");
        quantity
    }

    /// Removes one of `item_id`; `false` if it was not in the cart.
    pub fn remove_food(&self, item_id: EntityId) -> bool {
        let changed = self.with_state_mut(|s| s.cart.remove(item_id));
        debug!(item_id, changed, "Booking cart remove");
        changed
    }

    pub fn quantity_of(&self, item_id: EntityId) -> u32 {
        self.with_state(|s| s.cart.quantity_of(item_id))
    }

    pub fn total_items(&self) -> u32 {
        self.with_state(|s| s.cart.total_items())
    }

    pub fn total_price(&self) -> Money {
        self.with_state(|s| s.cart.total_price())
    }

    pub fn clear_food(&self) {
        self.with_state_mut(|s| s.cart.clear());
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn select_console(&self, console: Console) {
        self.with_state_mut(|s| s.selection.select_console(console));
    }

    pub fn select_room(&self, room: Room) {
        self.with_state_mut(|s| s.selection.select_room(room));
    }

    pub fn select_unit(&self, unit_id: EntityId) {
        self.with_state_mut(|s| s.selection.select_unit(unit_id));
    }

    pub fn select_game(&self, game: Option<Game>) {
        self.with_state_mut(|s| s.selection.select_game(game));
    }

    pub fn set_date(&self, date: NaiveDate) {
        self.with_state_mut(|s| s.selection.set_date(date));
    }

    pub fn set_start_time(&self, time: NaiveTime) {
        self.with_state_mut(|s| s.selection.set_start_time(time));
    }

    pub fn set_duration(&self, hours: u32) {
        self.with_state_mut(|s| s.selection.set_duration(hours));
    }

    pub fn set_details(&self, details: BookingDetails) {
        self.with_state_mut(|s| s.details = details);
    }

    // =========================================================================
    // Wizard
    // =========================================================================

    pub fn current_step(&self) -> Step {
        self.with_state(|s| s.navigator.current())
    }

    /// Moves forward, or reports that the booking should be submitted.
    pub fn next_step(&self) -> Advance {
        self.with_state_mut(|s| s.navigator.next())
    }

    pub fn previous_step(&self) -> Step {
        self.with_state_mut(|s| s.navigator.back())
    }

    /// Jumps to a visited step by its 1-based index.
    pub fn go_to_step(&self, index: u8) -> CoreResult<Step> {
        self.with_state_mut(|s| s.navigator.go_to_index(index))
    }

    /// Forgets the whole booking (after a confirmed submission).
    ///
    /// The customer contact details survive so the next booking is prefilled.
    pub fn reset(&self) {
        self.with_state_mut(|s| {
            let customer = std::mem::take(&mut s.details.customer);
            *s = BookingState::default();
            s.details.customer = customer;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use playzone_core::{CustomerData, FoodCategory};

    fn food(id: EntityId, price: i64) -> FoodItem {
        FoodItem {
            id,
            name: format!("Menu {}", id),
            price: Money::from_rupiah(price),
            category: FoodCategory::Food,
            image_ref: None,
            is_available: true,
        }
    }

    #[test]
    fn test_cart_scenario() {
        let store = BookingStore::new();
        store.add_food(&food(1, 10_000));
        store.add_food(&food(1, 10_000));

        assert_eq!(store.total_price().rupiah(), 20_000);
        assert_eq!(store.total_items(), 2);
        assert_eq!(store.quantity_of(1), 2);
        assert!(!store.remove_food(99));
    }

    #[test]
    fn test_stores_are_independent_instances() {
        let a = BookingStore::new();
        let b = BookingStore::new();
        a.add_food(&food(1, 5_000));

        assert_eq!(a.total_items(), 1);
        assert_eq!(b.total_items(), 0);

        // clones share
        let a2 = a.clone();
        a2.add_food(&food(1, 5_000));
        assert_eq!(a.total_items(), 2);
    }

    #[test]
    fn test_subscribers_see_every_change() {
        let store = BookingStore::new();
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        store.add_food(&food(3, 7_000));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().totals.total_items, 1);

        store.next_step();
        assert_eq!(rx.borrow_and_update().step, Step::Room);
    }

    #[test]
    fn test_wizard_through_store() {
        let store = BookingStore::new();
        assert_eq!(store.next_step(), Advance::Moved(Step::Room));
        assert_eq!(store.next_step(), Advance::Moved(Step::DateTime));
        assert_eq!(store.previous_step(), Step::Room);
        assert!(store.go_to_step(4).is_err());
        assert_eq!(store.go_to_step(3).unwrap(), Step::DateTime);
        assert_eq!(store.snapshot().furthest_step, Step::DateTime);
    }

    #[test]
    fn test_reset_keeps_customer() {
        let store = BookingStore::new();
        store.set_details(BookingDetails {
            customer: CustomerData {
                name: "Budi".into(),
                email: "budi@example.com".into(),
                phone: "081234567890".into(),
            },
            payment_method_id: Some(2),
            promo_code: "WEEKEND".into(),
            event_name: String::new(),
        });
        store.select_unit(4);
        store.add_food(&food(1, 1_000));
        store.next_step();

        store.reset();
        let snapshot = store.snapshot();
        assert!(snapshot.selection.is_empty());
        assert!(snapshot.lines.is_empty());
        assert_eq!(snapshot.step, Step::Console);
        assert_eq!(snapshot.details.customer.name, "Budi");
        assert_eq!(snapshot.details.payment_method_id, None);
    }

    #[test]
    fn test_snapshot_reports_submitting() {
        let store = BookingStore::new();
        let guard = store.gate().try_begin().unwrap();
        store.publish();
        assert!(store.subscribe().borrow().submitting);

        drop(guard);
        store.publish();
        assert!(!store.snapshot().submitting);
    }
}
