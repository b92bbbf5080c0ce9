//! # Booking Selection
//!
//! The in-progress set of choices the customer makes before booking.
//!
//! Every field is optional and every setter succeeds: the selection is a
//! plain bag of choices. Completeness is only checked when a booking request
//! is assembled (see [`crate::booking`]).

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Console, EntityId, Game, Room};

/// The customer's current booking choices.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BookingSelection {
    pub console: Option<Console>,
    pub room: Option<Room>,
    pub unit_id: Option<EntityId>,
    pub game: Option<Game>,
    #[ts(as = "Option<String>")]
    pub date: Option<NaiveDate>,
    #[ts(as = "Option<String>")]
    pub start_time: Option<NaiveTime>,
    pub duration_hours: Option<u32>,
}

impl BookingSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_console(&mut self, console: Console) {
        self.console = Some(console);
    }

    pub fn select_room(&mut self, room: Room) {
        self.room = Some(room);
    }

    pub fn select_unit(&mut self, unit_id: EntityId) {
        self.unit_id = Some(unit_id);
    }

    pub fn select_game(&mut self, game: Option<Game>) {
        self.game = game;
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = Some(date);
    }

    pub fn set_start_time(&mut self, time: NaiveTime) {
        self.start_time = Some(time);
    }

    pub fn set_duration(&mut self, hours: u32) {
        self.duration_hours = Some(hours);
    }

    /// Forgets every choice.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
