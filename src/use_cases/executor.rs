// Builds, sends and classifies one interaction, then applies its effect to
// the session.

use crate::domain::booking::SLOT_DURATIONS;
use crate::domain::{
    Action, ApiResponse, AvailabilityQuery, Booking, BookingApi, BookingLookup,
    CreateBookingRequest, IdentityPool, InteractionRecorder, InteractionSample, ListBookingsQuery,
    Outcome, SessionState, SlotKey, TimeSlot, TransportError,
};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Instant;

const LIST_LIMITS: [u32; 3] = [5, 10, 20];
const RAPID_CHECK_DURATION: u32 = 30;

#[derive(Clone)]
pub struct RequestExecutor<A, R> {
    api: A,
    recorder: R,
}

impl<A, R> RequestExecutor<A, R>
where
    A: BookingApi,
    R: InteractionRecorder,
{
    pub fn new(api: A, recorder: R) -> Self {
        Self { api, recorder }
    }

    /// Performs `action` for the session. Never fails: unexpected statuses
    /// and transport errors are recorded and leave the session untouched.
    pub async fn execute(
        &self,
        action: Action,
        session: &mut SessionState,
        pool: &IdentityPool,
        rng: &mut StdRng,
    ) {
        match action {
            Action::CheckAvailability => self.check_availability(session, pool, rng).await,
            Action::CreateBooking => self.create_booking(session, pool, rng).await,
            Action::ListBookings => self.list_bookings(session, rng).await,
            Action::GetBooking => self.get_booking(session, pool, rng).await,
            Action::DeleteBooking => self.delete_booking(session, pool, rng).await,
            Action::RapidAvailabilityCheck => self.rapid_availability_check(pool, rng).await,
        }
    }

    async fn check_availability(
        &self,
        session: &mut SessionState,
        pool: &IdentityPool,
        rng: &mut StdRng,
    ) {
        let query = AvailabilityQuery {
            service_id: pool.random_service(rng).clone(),
            date: pool.random_date(rng).to_string(),
            service_duration: pick(&SLOT_DURATIONS, rng),
        };

        let action = Action::CheckAvailability;
        let Some(response) = self.send(action, self.api.available_slots(&query)).await else {
            return;
        };

        // A body we cannot read still replaces the entry, with nothing.
        let slots = decode::<Vec<TimeSlot>>(action, &response).unwrap_or_default();
        session.cache_slots(SlotKey::new(query.service_id, query.date), slots);
    }

    async fn create_booking(
        &self,
        session: &mut SessionState,
        pool: &IdentityPool,
        rng: &mut StdRng,
    ) {
        let key = SlotKey::new(
            pool.random_service(rng).clone(),
            pool.random_date(rng).to_string(),
        );
        let cached = session.cached_slots(&key).choose(rng).copied();
        let slot = cached.unwrap_or_else(|| TimeSlot::synthesize(rng));

        let request = CreateBookingRequest {
            date: key.date.clone(),
            service_id: key.service_id.clone(),
            user_id: session.user_id().to_string(),
            start: slot.start,
            end: slot.end,
        };

        let Some(response) = self
            .send(Action::CreateBooking, self.api.create_booking(&request))
            .await
        else {
            return;
        };
        // 400 is an expected conflict: accepted, but nothing was booked.
        if response.status != 200 {
            return;
        }

        session.record_created(Booking::with_fresh_id(
            request.date,
            request.service_id,
            request.user_id,
        ));
        if cached.is_some() && !session.consume_slot(&key, &slot) {
            tracing::trace!(?slot, "booked slot already gone from cache");
        }
    }

    async fn list_bookings(&self, session: &mut SessionState, rng: &mut StdRng) {
        let query = ListBookingsQuery {
            user_id: session.user_id().to_string(),
            limit: pick(&LIST_LIMITS, rng),
        };

        let action = Action::ListBookings;
        let Some(response) = self.send(action, self.api.list_bookings(&query)).await else {
            return;
        };

        if let Some(bookings) = decode::<Vec<Booking>>(action, &response) {
            session.replace_fetched(bookings);
        }
    }

    async fn get_booking(&self, session: &SessionState, pool: &IdentityPool, rng: &mut StdRng) {
        let lookup = match session.fetched_bookings().choose(rng) {
            Some(booking) => BookingLookup {
                service_id: booking.service_id.clone(),
                date: booking.date.clone(),
                user_id: session.user_id().to_string(),
                booking_id: booking.booking_id.clone(),
            },
            None => BookingLookup {
                service_id: pool.random_service(rng).clone(),
                date: pool.random_date(rng).to_string(),
                user_id: session.user_id().to_string(),
                booking_id: uuid::Uuid::new_v4().to_string(),
            },
        };

        self.send(Action::GetBooking, self.api.get_booking(&lookup)).await;
    }

    async fn delete_booking(
        &self,
        session: &mut SessionState,
        pool: &IdentityPool,
        rng: &mut StdRng,
    ) {
        // A synthesized payload can never match a created booking, so a
        // successful delete of one leaves the session as it was.
        let payload = match session.created_bookings().choose(rng) {
            Some(booking) => booking.clone(),
            None => {
                let date = pool.random_date(rng).to_string();
                let service_id = pool.random_service(rng).clone();
                Booking::with_fresh_id(date, service_id, session.user_id())
            }
        };

        let Some(response) = self
            .send(Action::DeleteBooking, self.api.delete_booking(&payload))
            .await
        else {
            return;
        };
        if response.status == 200 && !session.forget_created(&payload) {
            tracing::trace!(
                booking_id = %payload.booking_id,
                "deleted booking not held by session"
            );
        }
    }

    async fn rapid_availability_check(&self, pool: &IdentityPool, rng: &mut StdRng) {
        let query = AvailabilityQuery {
            service_id: pool.random_service(rng).clone(),
            date: pool.random_date(rng).to_string(),
            service_duration: RAPID_CHECK_DURATION,
        };

        self.send(Action::RapidAvailabilityCheck, self.api.available_slots(&query))
            .await;
    }

    // Times the request, classifies the result and records it. Only accepted
    // responses are handed back for state updates.
    async fn send<F>(&self, action: Action, request: F) -> Option<ApiResponse>
    where
        F: Future<Output = Result<ApiResponse, TransportError>>,
    {
        let started = Instant::now();
        let result = request.await;
        let latency = started.elapsed();

        let (outcome, accepted) = match result {
            Ok(response) if action.accepts(response.status) => (
                Outcome::Success {
                    status: response.status,
                },
                Some(response),
            ),
            Ok(response) => {
                tracing::debug!(
                    request = action.request_name(),
                    status = response.status,
                    "unexpected status"
                );
                (
                    Outcome::UnexpectedStatus {
                        status: response.status,
                    },
                    None,
                )
            }
            Err(err) => {
                tracing::debug!(request = action.request_name(), error = %err, "request failed");
                (Outcome::Transport(err), None)
            }
        };

        self.recorder.record(InteractionSample {
            action,
            latency,
            outcome,
        });
        accepted
    }
}

fn pick(values: &[u32], rng: &mut StdRng) -> u32 {
    values.choose(rng).copied().unwrap_or(values[0])
}

// Malformed bodies are treated as "no data" but stay visible in the logs.
fn decode<T: DeserializeOwned>(action: Action, response: &ApiResponse) -> Option<T> {
    serde_json::from_str(&response.body)
        .inspect_err(|e| {
            tracing::warn!(
                request = action.request_name(),
                status = response.status,
                error = %e,
                "ignoring unreadable response body"
            );
        })
        .ok()
}
