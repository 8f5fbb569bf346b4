// Weighted action selection and the per-session scheduling loop.

use crate::domain::{Action, BookingApi, IdentityPool, InteractionRecorder, SessionState};
use crate::use_cases::executor::RequestExecutor;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::rngs::StdRng;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, PartialEq, Eq)]
pub enum ScheduleError {
    NoActions,
    NoPositiveWeight,
    InvalidWeights(String),
    InvalidThinkTime { min: Duration, max: Duration },
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::NoActions => write!(f, "task table has no actions"),
            ScheduleError::NoPositiveWeight => {
                write!(f, "task table needs at least one positive weight")
            }
            ScheduleError::InvalidWeights(err) => write!(f, "invalid task weights: {err}"),
            ScheduleError::InvalidThinkTime { min, max } => {
                write!(f, "think time minimum {min:?} exceeds maximum {max:?}")
            }
        }
    }
}

impl std::error::Error for ScheduleError {}

/// Static weighted choice over actions.
///
/// An action is picked with probability `weight / sum(weights)`; weights need
/// not add up to anything in particular. A uniform draw is mapped onto the
/// cumulative weights in declaration order, so equal weights share evenly and
/// zero weights are never picked. A table with a single action skips sampling.
#[derive(Debug, Clone)]
pub struct TaskTable {
    actions: Vec<Action>,
    weights: Option<WeightedIndex<u32>>,
}

impl TaskTable {
    pub fn new(entries: &[(Action, u32)]) -> Result<Self, ScheduleError> {
        if entries.is_empty() {
            return Err(ScheduleError::NoActions);
        }
        if entries.iter().all(|(_, weight)| *weight == 0) {
            return Err(ScheduleError::NoPositiveWeight);
        }

        let actions = entries.iter().map(|(action, _)| *action).collect();
        let weights = if entries.len() == 1 {
            None
        } else {
            let index = WeightedIndex::new(entries.iter().map(|(_, weight)| *weight))
                .map_err(|e| ScheduleError::InvalidWeights(e.to_string()))?;
            Some(index)
        };
        Ok(Self { actions, weights })
    }

    pub fn pick<R: Rng>(&self, rng: &mut R) -> Action {
        match &self.weights {
            Some(weights) => self.actions[weights.sample(rng)],
            None => self.actions[0],
        }
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }
}

/// Uniform pause between a session's consecutive actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThinkTime {
    min: Duration,
    max: Duration,
}

impl ThinkTime {
    pub fn between(min: Duration, max: Duration) -> Result<Self, ScheduleError> {
        if min > max {
            return Err(ScheduleError::InvalidThinkTime { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        Duration::from_secs_f64(rng.random_range(self.min.as_secs_f64()..=self.max.as_secs_f64()))
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }
}

/// Everything a session of one profile shares with its siblings. Built once,
/// then handed to every session behind an `Arc`.
#[derive(Debug)]
pub struct SessionPlan {
    pub profile: &'static str,
    pub tasks: TaskTable,
    pub think_time: ThinkTime,
    pub pool: IdentityPool,
}

/// Runs one virtual user until its task is aborted.
///
/// Each iteration completes its request and state update before the pause
/// and the next pick; nothing here ever ends the loop.
#[tracing::instrument(
    name = "session",
    skip_all,
    fields(session_id = session_id, profile = plan.profile)
)]
pub async fn run_session<A, R>(
    session_id: usize,
    plan: Arc<SessionPlan>,
    executor: RequestExecutor<A, R>,
    mut rng: StdRng,
) where
    A: BookingApi,
    R: InteractionRecorder,
{
    let mut state = SessionState::start();
    tracing::debug!(user_id = state.user_id(), "session started");

    loop {
        let action = plan.tasks.pick(&mut rng);
        executor
            .execute(action, &mut state, &plan.pool, &mut rng)
            .await;
        tokio::time::sleep(plan.think_time.sample(&mut rng)).await;
    }
}
