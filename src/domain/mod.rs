// Domain layer: identities, session state and the ports the engine talks through.

pub mod action;
pub mod booking;
pub mod errors;
pub mod pool;
pub mod ports;
pub mod session;

pub use action::Action;
pub use booking::{Booking, ServiceId, SlotKey, TimeSlot};
pub use errors::{PoolError, TransportError};
pub use pool::IdentityPool;
pub use ports::{
    ApiResponse, AvailabilityQuery, BookingApi, BookingLookup, CreateBookingRequest,
    InteractionRecorder, InteractionSample, ListBookingsQuery, Outcome,
};
pub use session::SessionState;
