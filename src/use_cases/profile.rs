// Compiled-in user profiles: who the virtual users are and how they behave.

use crate::domain::{Action, IdentityPool, PoolError};
use crate::use_cases::scheduler::{ScheduleError, SessionPlan, TaskTable, ThinkTime};
use std::fmt;
use std::time::Duration;

/// Size and calendar window of a profile's identity pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub service_count: usize,
    pub year: i32,
    pub month: u32,
    pub day_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub name: &'static str,
    pub pool: PoolSettings,
    pub tasks: Vec<(Action, u32)>,
    pub think_min: Duration,
    pub think_max: Duration,
}

#[derive(Debug)]
pub enum ProfileError {
    Pool(PoolError),
    Schedule(ScheduleError),
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::Pool(err) => write!(f, "identity pool: {err}"),
            ProfileError::Schedule(err) => write!(f, "schedule: {err}"),
        }
    }
}

impl std::error::Error for ProfileError {}

impl From<PoolError> for ProfileError {
    fn from(err: PoolError) -> Self {
        ProfileError::Pool(err)
    }
}

impl From<ScheduleError> for ProfileError {
    fn from(err: ScheduleError) -> Self {
        ProfileError::Schedule(err)
    }
}

impl UserProfile {
    /// A user exercising every endpoint, favouring availability lookups.
    pub fn full_lifecycle() -> Self {
        Self {
            name: "full_lifecycle",
            pool: PoolSettings {
                service_count: 5,
                year: 2024,
                month: 12,
                day_count: 15,
            },
            tasks: vec![
                (Action::CheckAvailability, 5),
                (Action::CreateBooking, 3),
                (Action::ListBookings, 2),
                (Action::GetBooking, 2),
                (Action::DeleteBooking, 1),
            ],
            think_min: Duration::from_secs(1),
            think_max: Duration::from_secs(3),
        }
    }

    /// A user hammering availability on a small pool with short pauses.
    pub fn stress() -> Self {
        Self {
            name: "stress",
            pool: PoolSettings {
                service_count: 3,
                year: 2024,
                month: 12,
                day_count: 7,
            },
            tasks: vec![(Action::RapidAvailabilityCheck, 1)],
            think_min: Duration::from_millis(500),
            think_max: Duration::from_millis(1500),
        }
    }

    /// Builds the shared pool and schedule. Call once per profile, before
    /// any session of it starts.
    pub fn plan(&self) -> Result<SessionPlan, ProfileError> {
        let pool = IdentityPool::initialize(
            self.pool.service_count,
            self.pool.year,
            self.pool.month,
            self.pool.day_count,
        )?;
        Ok(SessionPlan {
            profile: self.name,
            tasks: TaskTable::new(&self.tasks)?,
            think_time: ThinkTime::between(self.think_min, self.think_max)?,
            pool,
        })
    }
}
