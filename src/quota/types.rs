use serde::{Deserialize, Serialize};
use time::{Date, Month, OffsetDateTime};

use crate::quota::error::{QuotaError, invalid_record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanTier {
    Free,
    Premium,
}

// `used` is mutated only through the store's atomic operations; no caller
// ever computes and commits `used + 1` on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaRecord {
    pub tier: PlanTier,
    pub used: u32,
    pub limit: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub reset_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotaPhase {
    Active,
    Exhausted,
    // Anchor has passed but the rollover batch has not run yet.
    Resetting,
}

impl QuotaRecord {
    pub fn new(tier: PlanTier, limit: u32, reset_at: OffsetDateTime) -> Result<Self, QuotaError> {
        if limit == 0 {
            return Err(invalid_record("allowance limit must be positive"));
        }
        Ok(Self {
            tier,
            used: 0,
            limit,
            reset_at,
        })
    }

    pub fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.used)
    }

    pub fn phase(&self, now: OffsetDateTime) -> QuotaPhase {
        if now >= self.reset_at {
            QuotaPhase::Resetting
        } else if self.used >= self.limit {
            QuotaPhase::Exhausted
        } else {
            QuotaPhase::Active
        }
    }

    // Rolls the anchor forward in whole months from its prior value, never
    // from `now`, so the anchor day does not drift.
    pub fn roll_forward(&mut self, now: OffsetDateTime) -> bool {
        if now < self.reset_at {
            return false;
        }
        self.used = 0;
        while self.reset_at <= now {
            self.reset_at = advance_one_billing_month(self.reset_at);
        }
        true
    }
}

// Day is clamped when the target month is shorter (Jan 31 -> Feb 28).
pub fn advance_one_billing_month(ts: OffsetDateTime) -> OffsetDateTime {
    let date = ts.date();
    let (next_year, next_month) = match date.month() {
        Month::December => (date.year() + 1, Month::January),
        month => (date.year(), month.next()),
    };
    let day = date.day().min(next_month.length(next_year));
    match Date::from_calendar_date(next_year, next_month, day) {
        Ok(next_date) => ts.replace_date(next_date),
        Err(_) => ts,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationOutcome {
    pub allowed: bool,
    pub remaining: u32,
}
