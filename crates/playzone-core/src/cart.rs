//! # Cart
//!
//! The food cart used by both the booking flow and the restaurant flow.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Action              Method               Effect                        │
//! │  ──────              ──────               ──────                        │
//! │                                                                         │
//! │  Tap "+" ──────────► add(item) ─────────► qty + 1 (or new line, qty 1)  │
//! │                                                                         │
//! │  Tap "-" ──────────► remove(id) ────────► qty - 1 (line gone at 0)      │
//! │                                                                         │
//! │  Badge ────────────► quantity_of(id) ───► 0 when absent                 │
//! │                                                                         │
//! │  Summary ──────────► total_items() ─────► Σ qty                         │
//! │                      total_price() ─────► Σ price × qty                 │
//! │                                                                         │
//! │  Reset ────────────► clear() ───────────► no lines                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these operations can fail.

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{EntityId, FoodCategory, FoodItem};

/// One line of the cart.
///
/// The name, price and image are frozen when the item is first added so the
/// summary stays stable even if the menu is refetched mid-flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub id: EntityId,
    pub name: String,
    pub price: Money,
    /// Always >= 1 while the line exists.
    pub quantity: u32,
    pub category: FoodCategory,
    pub image_ref: Option<String>,
}

impl CartLine {
    /// Creates a line with quantity 1 from a menu item.
    pub fn from_item(item: &FoodItem) -> Self {
        CartLine {
            id: item.id,
            name: item.name.clone(),
            price: item.price,
            quantity: 1,
            category: item.category,
            image_ref: item.image_ref.clone(),
        }
    }

    /// Price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }
}

/// An ordered collection of cart lines.
///
/// ## Invariants
/// - Lines are unique by `id` (adding the same item increases quantity)
/// - Every line has quantity >= 1
/// - Lines keep the order in which they were first added
///
/// Deserializing goes through [`Cart::from_lines`], so a saved cart that
/// breaks these invariants is repaired on the way in.
#[derive(Debug, Clone, PartialEq, Default, Serialize, TS)]
#[ts(export)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Rebuilds a cart from stored lines.
    ///
    /// Lines sharing an id merge into the first one (quantities summed,
    /// first price kept). Lines with quantity 0 are dropped.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Cart::new();
        for line in lines {
            if line.quantity == 0 {
                continue;
            }
            match cart.lines.iter_mut().find(|l| l.id == line.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }

    /// Adds one unit of `item`.
    ///
    /// ## Behavior
    /// - Item already in cart: quantity + 1
    /// - Item not in cart: new line with quantity 1
    ///
    /// ## Returns
    /// The quantity of the line after the add.
    pub fn add(&mut self, item: &FoodItem) -> u32 {
        if let Some(line) = self.lines.iter_mut().find(|l| l.id == item.id) {
            line.quantity = line.quantity.saturating_add(1);
            return line.quantity;
        }

        self.lines.push(CartLine::from_item(item));
        1
    }

    /// Removes one unit of the item with `item_id`.
    ///
    /// ## Behavior
    /// - Quantity above 1: quantity - 1
    /// - Quantity exactly 1: the line is deleted
    /// - Item not in cart: nothing changes
    ///
    /// ## Returns
    /// `true` if the cart changed.
    pub fn remove(&mut self, item_id: EntityId) -> bool {
        let Some(pos) = self.lines.iter().position(|l| l.id == item_id) else {
            return false;
        };

        if self.lines[pos].quantity > 1 {
            self.lines[pos].quantity -= 1;
        } else {
            self.lines.remove(pos);
        }
        true
    }

    /// Quantity of `item_id`, or 0 when absent.
    pub fn quantity_of(&self, item_id: EntityId) -> u32 {
        self.lines
            .iter()
            .find(|l| l.id == item_id)
            .map_or(0, |l| l.quantity)
    }

    /// Sum of quantities across all lines.
    pub fn total_items(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, l| acc.saturating_add(l.quantity))
    }

    /// Sum of `price × quantity` across all lines.
    pub fn total_price(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct items.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct StoredCart {
            #[serde(default)]
            lines: Vec<CartLine>,
        }

        let stored = StoredCart::deserialize(deserializer)?;
        Ok(Cart::from_lines(stored.lines))
    }
}

/// Cart totals summary for views.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartTotals {
    pub line_count: usize,
    pub total_items: u32,
    pub total_price: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_items: cart.total_items(),
            total_price: cart.total_price(),
        }
    }
}
