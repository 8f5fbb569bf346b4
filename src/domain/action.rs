// The API interactions a virtual user can perform.

/// One discrete interaction type against the booking API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    CheckAvailability,
    CreateBooking,
    ListBookings,
    GetBooking,
    DeleteBooking,
    // Stress profile only: availability probe with no session bookkeeping.
    RapidAvailabilityCheck,
}

impl Action {
    pub const COUNT: usize = 6;

    pub const ALL: [Action; Self::COUNT] = [
        Action::CheckAvailability,
        Action::CreateBooking,
        Action::ListBookings,
        Action::GetBooking,
        Action::DeleteBooking,
        Action::RapidAvailabilityCheck,
    ];

    /// Name the interaction is reported under.
    pub fn request_name(self) -> &'static str {
        match self {
            Action::CheckAvailability => "/bookings/available",
            Action::CreateBooking => "/bookings/create",
            Action::ListBookings => "/bookings (list)",
            Action::GetBooking => "/bookings/user",
            Action::DeleteBooking => "/bookings/delete",
            Action::RapidAvailabilityCheck => "/bookings/available (heavy)",
        }
    }

    /// Whether `status` counts as a successful interaction.
    ///
    /// Conflicts on create/delete and misses on lookup are expected while
    /// bookings are simulated client-side, so they are not failures.
    pub fn accepts(self, status: u16) -> bool {
        match self {
            Action::CheckAvailability | Action::ListBookings => status == 200,
            Action::CreateBooking | Action::DeleteBooking => matches!(status, 200 | 400),
            Action::GetBooking => matches!(status, 200 | 404),
            Action::RapidAvailabilityCheck => status < 400,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Action::CheckAvailability => 0,
            Action::CreateBooking => 1,
            Action::ListBookings => 2,
            Action::GetBooking => 3,
            Action::DeleteBooking => 4,
            Action::RapidAvailabilityCheck => 5,
        }
    }
}
