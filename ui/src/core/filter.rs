//! Filter state shared by every dashboard widget.
//!
//! Mutations go through setters that refuse to let the age handles cross or
//! leave the configured bounds. Each accepted mutation bumps `version` and is
//! broadcast to subscribers as a [`FilterSnapshot`].

use api::{FilterSnapshot, Gender};
use futures_channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use tracing::trace;

/// Inclusive range the age sliders may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeBounds {
    pub min: u32,
    pub max: u32,
}

impl AgeBounds {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn clamp(&self, value: u32) -> u32 {
        value.clamp(self.min, self.max)
    }
}

impl Default for AgeBounds {
    fn default() -> Self {
        Self::new(18, 100)
    }
}

#[derive(Debug)]
pub struct FilterState {
    gender: Gender,
    age_min: u32,
    age_max: u32,
    bounds: AgeBounds,
    version: u64,
    subscribers: Vec<UnboundedSender<FilterSnapshot>>,
}

impl FilterState {
    /// Initial values are clamped into `bounds` and ordered.
    pub fn new(bounds: AgeBounds, gender: Gender, age_min: u32, age_max: u32) -> Self {
        let age_min = bounds.clamp(age_min);
        let age_max = bounds.clamp(age_max).max(age_min);
        Self {
            gender,
            age_min,
            age_max,
            bounds,
            version: 0,
            subscribers: Vec::new(),
        }
    }

    pub fn bounds(&self) -> AgeBounds {
        self.bounds
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn snapshot(&self) -> FilterSnapshot {
        FilterSnapshot {
            gender: self.gender,
            age_min: self.age_min,
            age_max: self.age_max,
            version: self.version,
        }
    }

    /// Receive a snapshot after every accepted mutation.
    pub fn subscribe(&mut self) -> UnboundedReceiver<FilterSnapshot> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    pub fn set_gender(&mut self, gender: Gender) -> bool {
        self.gender = gender;
        self.commit();
        true
    }

    /// Ignored when `value` is out of bounds or above the current maximum.
    pub fn set_age_min(&mut self, value: u32) -> bool {
        if !self.bounds.contains(value) || value > self.age_max {
            trace!(value, age_max = self.age_max, "age_min rejected");
            return false;
        }
        self.age_min = value;
        self.commit();
        true
    }

    /// Ignored when `value` is out of bounds or below the current minimum.
    pub fn set_age_max(&mut self, value: u32) -> bool {
        if !self.bounds.contains(value) || value < self.age_min {
            trace!(value, age_min = self.age_min, "age_max rejected");
            return false;
        }
        self.age_max = value;
        self.commit();
        true
    }

    fn commit(&mut self) {
        self.version += 1;
        let snapshot = self.snapshot();
        // Dropped receivers unsubscribe.
        self.subscribers.retain(|tx| tx.unbounded_send(snapshot).is_ok());
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(AgeBounds::default(), Gender::Both, 18, 60)
    }
}
