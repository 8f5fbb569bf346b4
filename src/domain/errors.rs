use std::fmt;

// Errors raised while building an identity pool.
#[derive(Debug, PartialEq, Eq)]
pub enum PoolError {
    NoServices,
    NoDays,
    InvalidStartDate { year: i32, month: u32 },
    DateOverflow { day_count: u32 },
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::NoServices => write!(f, "service count must be positive"),
            PoolError::NoDays => write!(f, "day count must be positive"),
            PoolError::InvalidStartDate { year, month } => {
                write!(f, "no calendar date for {year}-{month:02}-01")
            }
            PoolError::DateOverflow { day_count } => {
                write!(f, "date window of {day_count} days overflows the calendar")
            }
        }
    }
}

impl std::error::Error for PoolError {}

// The request never produced a status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    InvalidUrl(String),
    Request(String),
    Timeout,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::InvalidUrl(err) => write!(f, "invalid request url: {err}"),
            TransportError::Request(err) => write!(f, "request failed: {err}"),
            TransportError::Timeout => write!(f, "request timed out"),
        }
    }
}

impl std::error::Error for TransportError {}
