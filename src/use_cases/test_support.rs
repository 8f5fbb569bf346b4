use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{
    ApiResponse, AvailabilityQuery, Booking, BookingApi, BookingLookup, CreateBookingRequest,
    InteractionRecorder, InteractionSample, ListBookingsQuery, TransportError,
};

type Reply = Result<ApiResponse, TransportError>;

// Every request the fake has seen, in order.
#[derive(Debug, Clone)]
pub(crate) enum Call {
    Availability(AvailabilityQuery),
    Create(CreateBookingRequest),
    List(ListBookingsQuery),
    Get(BookingLookup),
    Delete(Booking),
}

#[derive(Default)]
struct Script {
    availability: VecDeque<Reply>,
    create: VecDeque<Reply>,
    list: VecDeque<Reply>,
    get: VecDeque<Reply>,
    delete: VecDeque<Reply>,
    calls: Vec<Call>,
}

// Booking API fake answering from per-endpoint queues. An empty queue
// answers 200 with an empty JSON array.
#[derive(Clone, Default)]
pub(crate) struct ScriptedApi {
    script: Arc<Mutex<Script>>,
}

impl ScriptedApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_availability(&self, reply: Reply) {
        self.lock().availability.push_back(reply);
    }

    pub(crate) fn push_create(&self, reply: Reply) {
        self.lock().create.push_back(reply);
    }

    pub(crate) fn push_list(&self, reply: Reply) {
        self.lock().list.push_back(reply);
    }

    pub(crate) fn push_get(&self, reply: Reply) {
        self.lock().get.push_back(reply);
    }

    pub(crate) fn push_delete(&self, reply: Reply) {
        self.lock().delete.push_back(reply);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().expect("script mutex poisoned")
    }

    fn answer(&self, call: Call) -> Reply {
        let mut script = self.lock();
        let queue = match &call {
            Call::Availability(_) => &mut script.availability,
            Call::Create(_) => &mut script.create,
            Call::List(_) => &mut script.list,
            Call::Get(_) => &mut script.get,
            Call::Delete(_) => &mut script.delete,
        };
        let reply = queue
            .pop_front()
            .unwrap_or_else(|| Ok(ApiResponse::new(200, "[]")));
        script.calls.push(call);
        reply
    }
}

#[async_trait]
impl BookingApi for ScriptedApi {
    async fn available_slots(&self, query: &AvailabilityQuery) -> Reply {
        self.answer(Call::Availability(query.clone()))
    }

    async fn create_booking(&self, request: &CreateBookingRequest) -> Reply {
        self.answer(Call::Create(request.clone()))
    }

    async fn list_bookings(&self, query: &ListBookingsQuery) -> Reply {
        self.answer(Call::List(query.clone()))
    }

    async fn get_booking(&self, lookup: &BookingLookup) -> Reply {
        self.answer(Call::Get(lookup.clone()))
    }

    async fn delete_booking(&self, booking: &Booking) -> Reply {
        self.answer(Call::Delete(booking.clone()))
    }
}

#[derive(Clone, Default)]
pub(crate) struct RecordingRecorder {
    samples: Arc<Mutex<Vec<InteractionSample>>>,
}

impl RecordingRecorder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn samples(&self) -> Vec<InteractionSample> {
        self.samples
            .lock()
            .expect("samples mutex poisoned")
            .clone()
    }
}

impl InteractionRecorder for RecordingRecorder {
    fn record(&self, sample: InteractionSample) {
        self.samples
            .lock()
            .expect("samples mutex poisoned")
            .push(sample);
    }
}
