// Shared, read-only identities every session of a profile draws from.

use crate::domain::booking::ServiceId;
use crate::domain::errors::PoolError;
use chrono::{Days, NaiveDate};
use rand::Rng;
use rand::seq::IndexedRandom;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Service ids and a consecutive date window, built once before any session
/// starts and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct IdentityPool {
    service_ids: Vec<ServiceId>,
    dates: Vec<String>,
}

impl IdentityPool {
    pub fn initialize(
        service_count: usize,
        year: i32,
        month: u32,
        day_count: u32,
    ) -> Result<Self, PoolError> {
        if service_count == 0 {
            return Err(PoolError::NoServices);
        }
        let dates = generate_dates(year, month, day_count)?;
        let service_ids = (0..service_count).map(|_| ServiceId::random()).collect();
        Ok(Self { service_ids, dates })
    }

    pub fn service_ids(&self) -> &[ServiceId] {
        &self.service_ids
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    pub fn random_service<R: Rng>(&self, rng: &mut R) -> &ServiceId {
        // Construction guarantees both collections are non-empty.
        &self.service_ids[rng.random_range(0..self.service_ids.len())]
    }

    pub fn random_date<R: Rng>(&self, rng: &mut R) -> &str {
        self.dates
            .choose(rng)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// Returns `day_count` consecutive `YYYY-MM-DD` dates starting on the first
/// of `month`. Windows longer than the month continue into the next one.
pub fn generate_dates(year: i32, month: u32, day_count: u32) -> Result<Vec<String>, PoolError> {
    if day_count == 0 {
        return Err(PoolError::NoDays);
    }
    let first =
        NaiveDate::from_ymd_opt(year, month, 1).ok_or(PoolError::InvalidStartDate { year, month })?;

    (0..day_count)
        .map(|offset| {
            first
                .checked_add_days(Days::new(u64::from(offset)))
                .map(|date| date.format(DATE_FORMAT).to_string())
                .ok_or(PoolError::DateOverflow { day_count })
        })
        .collect()
}
