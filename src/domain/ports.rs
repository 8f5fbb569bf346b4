use crate::domain::action::Action;
use crate::domain::booking::{Booking, ServiceId};
use crate::domain::errors::TransportError;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

// Request shapes are serialized straight onto the wire; a pragmatic leak of
// the JSON contract into the domain.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityQuery {
    pub service_id: ServiceId,
    pub date: String,
    pub service_duration: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub date: String,
    pub service_id: ServiceId,
    pub user_id: String,
    pub start: u32,
    pub end: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListBookingsQuery {
    pub user_id: String,
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingLookup {
    pub service_id: ServiceId,
    pub date: String,
    pub user_id: String,
    pub booking_id: String,
}

/// Status plus raw body; decoding is left to the caller so malformed bodies
/// can be handled per action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

// The executor depends on this trait, not on the reqwest client.
#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn available_slots(&self, query: &AvailabilityQuery)
    -> Result<ApiResponse, TransportError>;
    async fn create_booking(
        &self,
        request: &CreateBookingRequest,
    ) -> Result<ApiResponse, TransportError>;
    async fn list_bookings(&self, query: &ListBookingsQuery)
    -> Result<ApiResponse, TransportError>;
    async fn get_booking(&self, lookup: &BookingLookup) -> Result<ApiResponse, TransportError>;
    async fn delete_booking(&self, booking: &Booking) -> Result<ApiResponse, TransportError>;
}

/// How a single interaction ended, from the load generator's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success { status: u16 },
    UnexpectedStatus { status: u16 },
    Transport(TransportError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionSample {
    pub action: Action,
    pub latency: Duration,
    pub outcome: Outcome,
}

// Sink for per-interaction results; aggregation lives behind it.
pub trait InteractionRecorder: Send + Sync {
    fn record(&self, sample: InteractionSample);
}
