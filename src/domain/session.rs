// Per-session knowledge of bookings and availability.

use crate::domain::booking::{Booking, SlotKey, TimeSlot};
use std::collections::HashMap;

/// State owned by exactly one virtual user. Never shared, never persisted;
/// it is simply dropped when the session task is aborted.
#[derive(Debug, Clone)]
pub struct SessionState {
    user_id: String,
    created_bookings: Vec<Booking>,
    fetched_bookings: Vec<Booking>,
    availability: HashMap<SlotKey, Vec<TimeSlot>>,
}

impl SessionState {
    /// Starts a session with a fresh user identity and nothing cached.
    pub fn start() -> Self {
        Self::with_user_id(uuid::Uuid::new_v4().to_string())
    }

    pub fn with_user_id(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            created_bookings: Vec::new(),
            fetched_bookings: Vec::new(),
            availability: HashMap::new(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn created_bookings(&self) -> &[Booking] {
        &self.created_bookings
    }

    pub fn fetched_bookings(&self) -> &[Booking] {
        &self.fetched_bookings
    }

    /// Slots last reported for `key`, empty when never queried.
    pub fn cached_slots(&self, key: &SlotKey) -> &[TimeSlot] {
        self.availability
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Replaces whatever was cached for `key`; entries are never merged.
    pub fn cache_slots(&mut self, key: SlotKey, slots: Vec<TimeSlot>) {
        self.availability.insert(key, slots);
    }

    /// Drops the first cached slot equal to `slot`. Returns false when it was
    /// already gone.
    pub fn consume_slot(&mut self, key: &SlotKey, slot: &TimeSlot) -> bool {
        let Some(slots) = self.availability.get_mut(key) else {
            return false;
        };
        match slots.iter().position(|cached| cached == slot) {
            Some(index) => {
                slots.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn record_created(&mut self, booking: Booking) {
        self.created_bookings.push(booking);
    }

    /// Removes the first created booking equal to `booking`. Returns false
    /// when no such booking is held.
    pub fn forget_created(&mut self, booking: &Booking) -> bool {
        match self.created_bookings.iter().position(|b| b == booking) {
            Some(index) => {
                self.created_bookings.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn replace_fetched(&mut self, bookings: Vec<Booking>) {
        self.fetched_bookings = bookings;
    }
}
