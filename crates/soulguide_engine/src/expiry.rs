use chrono::{DateTime, Duration, Utc};
use soulguide_core::{ExpiryConfig, MAX_EXPIRY_DAYS};

use crate::random::RandomSource;

/// Assigns a time-to-live of `min_days..=max_days` whole days.
#[derive(Debug, Clone)]
pub struct ExpiryScheduler {
    min_days: u32,
    max_days: u32,
}

impl Default for ExpiryScheduler {
    fn default() -> Self {
        Self::from(&ExpiryConfig::default())
    }
}

impl From<&ExpiryConfig> for ExpiryScheduler {
    fn from(config: &ExpiryConfig) -> Self {
        // A zero-day TTL would make expiry equal creation.
        let max_days = config.max_days.min(MAX_EXPIRY_DAYS);
        let min_days = config.min_days.clamp(1, max_days.max(1));
        Self {
            min_days,
            max_days: max_days.max(min_days),
        }
    }
}

impl ExpiryScheduler {
    pub fn ttl_days(&self, rng: &mut dyn RandomSource) -> u32 {
        rng.uniform_inclusive(self.min_days, self.max_days)
            .clamp(self.min_days, self.max_days)
    }

    /// `None` when `created_at` is too close to the end of representable time.
    pub fn expires_at(
        &self,
        created_at: DateTime<Utc>,
        rng: &mut dyn RandomSource,
    ) -> Option<DateTime<Utc>> {
        created_at.checked_add_signed(Duration::days(i64::from(self.ttl_days(rng))))
    }
}
