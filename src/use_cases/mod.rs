// Use cases layer: profiles, scheduling and request execution.

pub mod executor;
pub mod profile;
pub mod scheduler;
#[cfg(test)]
pub(crate) mod test_support;

pub use executor::RequestExecutor;
pub use profile::{PoolSettings, ProfileError, UserProfile};
pub use scheduler::{ScheduleError, SessionPlan, TaskTable, ThinkTime, run_session};
