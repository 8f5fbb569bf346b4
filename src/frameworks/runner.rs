// Framework bootstrap for a load run.

use crate::frameworks::config::{self, ConfigError};
use crate::interface_adapters::clients::BookingClient;
use crate::interface_adapters::recorder::InteractionTally;
use crate::use_cases::{ProfileError, RequestExecutor, UserProfile, run_session};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use url::Url;

#[derive(Debug, Clone)]
pub struct RunSettings {
    pub base_url: Url,
    pub request_timeout: Duration,
    pub lifecycle_users: usize,
    pub stress_users: usize,
}

impl RunSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: config::booking_api_url()?,
            request_timeout: config::request_timeout(),
            lifecycle_users: config::lifecycle_users(),
            stress_users: config::stress_users(),
        })
    }
}

#[derive(Debug)]
pub enum RunError {
    Config(ConfigError),
    Client(reqwest::Error),
    Profile(ProfileError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Config(err) => write!(f, "configuration error: {err}"),
            RunError::Client(err) => write!(f, "failed to initialize booking client: {err}"),
            RunError::Profile(err) => write!(f, "invalid user profile: {err}"),
        }
    }
}

impl std::error::Error for RunError {}

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Starts every configured session and keeps them running until `shutdown`
/// resolves, then aborts them and returns the interaction totals.
pub async fn run(
    settings: RunSettings,
    shutdown: impl Future<Output = ()>,
) -> Result<InteractionTally, RunError> {
    let client = BookingClient::new(settings.base_url.clone(), settings.request_timeout)
        .map_err(RunError::Client)?;
    let tally = InteractionTally::new();
    let executor = RequestExecutor::new(client, tally.clone());

    let profiles = [
        (UserProfile::full_lifecycle(), settings.lifecycle_users),
        (UserProfile::stress(), settings.stress_users),
    ];

    let mut sessions = JoinSet::new();
    let mut session_id = 0;
    for (profile, count) in profiles {
        if count == 0 {
            continue;
        }
        // Pools are built once here and only read by the sessions.
        let plan = Arc::new(profile.plan().map_err(RunError::Profile)?);
        tracing::info!(profile = plan.profile, sessions = count, "starting sessions");

        for _ in 0..count {
            sessions.spawn(run_session(
                session_id,
                Arc::clone(&plan),
                executor.clone(),
                session_rng(),
            ));
            session_id += 1;
        }
    }

    shutdown.await;
    tracing::info!(sessions = sessions.len(), "stopping sessions");
    // Hard stop: in-flight requests are dropped and session state discarded.
    sessions.shutdown().await;

    tally.log_summary();
    Ok(tally)
}

pub async fn run_with_config() -> Result<(), RunError> {
    init_runtime();

    let settings = RunSettings::from_env()
        .map_err(RunError::Config)
        .inspect_err(|e| tracing::error!(error = %e, "invalid configuration"))?;
    tracing::info!(
        base_url = %settings.base_url,
        request_timeout_ms = settings.request_timeout.as_millis() as u64,
        lifecycle_users = settings.lifecycle_users,
        stress_users = settings.stress_users,
        "load run configured"
    );

    run(settings, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    })
    .await
    .inspect_err(|e| tracing::error!(error = %e, "load run failed"))?;

    Ok(())
}

fn session_rng() -> StdRng {
    StdRng::from_rng(&mut rand::rng())
}
