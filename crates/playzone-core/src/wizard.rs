//! # Step Navigator
//!
//! Drives the four-step booking wizard.
//!
//! ## Step Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌─────────┐ next ┌─────────┐ next ┌──────────┐ next ┌─────────┐ next  │
//! │  │ Console │─────►│  Room   │─────►│ DateTime │─────►│  Food   │──────► │
//! │  │   (1)   │◄─────│   (2)   │◄─────│   (3)    │◄─────│   (4)   │ Submit │
//! │  └─────────┘ back └─────────┘ back └──────────┘ back └─────────┘        │
//! │                                                                         │
//! │  go_to(n): any step already visited, forward or backward               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Moving forward is never blocked here. Whether a step's form is complete
//! is the caller's business.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Step
// =============================================================================

/// A booking wizard step, declared in flow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Console,
    Room,
    DateTime,
    Food,
}

impl Step {
    pub const FIRST: Step = Step::Console;
    pub const LAST: Step = Step::Food;
    pub const ALL: [Step; 4] = [Step::Console, Step::Room, Step::DateTime, Step::Food];

    /// Parses a 1-based step index.
    pub fn from_index(index: u8) -> CoreResult<Step> {
        match index {
            1 => Ok(Step::Console),
            2 => Ok(Step::Room),
            3 => Ok(Step::DateTime),
            4 => Ok(Step::Food),
            other => Err(CoreError::InvalidStep { index: other }),
        }
    }

    /// The 1-based index, always in `[1, 4]`.
    #[inline]
    pub const fn index(self) -> u8 {
        match self {
            Step::Console => 1,
            Step::Room => 2,
            Step::DateTime => 3,
            Step::Food => 4,
        }
    }

    /// Following step, `None` after the last.
    pub fn next(self) -> Option<Step> {
        match self {
            Step::Console => Some(Step::Room),
            Step::Room => Some(Step::DateTime),
            Step::DateTime => Some(Step::Food),
            Step::Food => None,
        }
    }

    /// Preceding step, `None` before the first.
    pub fn previous(self) -> Option<Step> {
        match self {
            Step::Console => None,
            Step::Room => Some(Step::Console),
            Step::DateTime => Some(Step::Room),
            Step::Food => Some(Step::DateTime),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

// =============================================================================
// Navigator
// =============================================================================

/// Result of pressing "next".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "step", rename_all = "snake_case")]
pub enum Advance {
    /// Moved to the given step.
    Moved(Step),
    /// "Next" on the last step: the booking should be submitted.
    Submit,
}

/// Tracks the current step and how far the customer has got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StepNavigator {
    current: Step,
    furthest: Step,
}

impl Default for StepNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl StepNavigator {
    /// Starts at the console step.
    pub fn new() -> Self {
        StepNavigator {
            current: Step::FIRST,
            furthest: Step::FIRST,
        }
    }

    pub fn current(&self) -> Step {
        self.current
    }

    /// Furthest step visited so far.
    pub fn furthest_visited(&self) -> Step {
        self.furthest
    }

    pub fn is_last(&self) -> bool {
        self.current == Step::LAST
    }

    /// Whether `step` may be jumped to directly.
    pub fn can_go_to(&self, step: Step) -> bool {
        step <= self.furthest
    }

    /// Moves one step forward, or reports that the booking should be
    /// submitted when already on the last step.
    pub fn next(&mut self) -> Advance {
        match self.current.next() {
            Some(step) => {
                self.current = step;
                self.furthest = self.furthest.max(step);
                Advance::Moved(step)
            }
            None => Advance::Submit,
        }
    }

    /// Moves one step back; stays put on the first step.
    pub fn back(&mut self) -> Step {
        if let Some(step) = self.current.previous() {
            self.current = step;
        }
        self.current
    }

    /// Jumps to a previously visited step.
    pub fn go_to(&mut self, step: Step) -> CoreResult<Step> {
        if !self.can_go_to(step) {
            return Err(CoreError::StepNotVisited { step: step.index() });
        }
        self.current = step;
        Ok(step)
    }

    /// Jumps by 1-based index, rejecting indexes outside `[1, 4]`.
    pub fn go_to_index(&mut self, index: u8) -> CoreResult<Step> {
        self.go_to(Step::from_index(index)?)
    }

    /// Back to a fresh wizard.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
