// Client-side view of bookable services, slots and bookings.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Durations (minutes) a synthesized slot or availability query may use.
pub const SLOT_DURATIONS: [u32; 3] = [30, 60, 90];
/// Earliest synthesized start, 09:00 as minutes of day.
pub const EARLIEST_START: u32 = 540;
/// Latest synthesized start, 16:00 as minutes of day.
pub const LATEST_START: u32 = 960;

/// Opaque service identifier. Generated pools use UUIDs, but anything the
/// server echoes back is accepted verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(String);

impl ServiceId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A `[start, end)` interval in minutes of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: u32,
    pub end: u32,
}

impl TimeSlot {
    /// Picks a start in `[EARLIEST_START, LATEST_START]` and one of the
    /// standard durations.
    pub fn synthesize<R: Rng>(rng: &mut R) -> Self {
        let start = rng.random_range(EARLIEST_START..=LATEST_START);
        let duration = *SLOT_DURATIONS
            .choose(rng)
            .unwrap_or(&SLOT_DURATIONS[0]);
        Self {
            start,
            end: start + duration,
        }
    }

    pub fn duration(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }
}

/// Availability cache key: one service on one date.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub service_id: ServiceId,
    pub date: String,
}

impl SlotKey {
    pub fn new(service_id: ServiceId, date: impl Into<String>) -> Self {
        Self {
            service_id,
            date: date.into(),
        }
    }
}

/// A booking as the client believes it exists.
///
/// `booking_id` is minted locally when a create succeeds; the create response
/// carries no identifier, so it never matches a server-side record unless the
/// booking came from a list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub date: String,
    pub service_id: ServiceId,
    pub booking_id: String,
    pub user_id: String,
}

impl Booking {
    /// Builds a booking with a freshly generated client-side id.
    pub fn with_fresh_id(
        date: impl Into<String>,
        service_id: ServiceId,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            service_id,
            booking_id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.into(),
        }
    }
}
