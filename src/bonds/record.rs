use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{BondError, Result};

use super::schedule;

/// One tracked bond and the coupon dates derived from it.
///
/// `pay_dates` is never persisted; it is recomputed from `near_pay_date`,
/// `coupon_period_days` and `coupon_count` whenever the record enters a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondRecord {
    pub name: String,
    pub coupon_count: usize,
    #[serde(rename = "couponPeriod", deserialize_with = "wire::period_days")]
    pub coupon_period_days: u32,
    #[serde(deserialize_with = "wire::civil_date")]
    pub near_pay_date: NaiveDate,
    #[serde(skip)]
    pay_dates: Vec<NaiveDate>,
}

/// Largest coupon count a record may carry; a daily coupon for over a century.
pub const MAX_COUPON_COUNT: usize = 40_000;

/// Outcome of aging a record against a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aging {
    pub dropped: usize,
    pub expired: bool,
}

impl BondRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            coupon_count: 0,
            coupon_period_days: 0,
            near_pay_date: NaiveDate::default(),
            pay_dates: Vec::new(),
        }
    }

    /// Builds a record and projects its schedule in one step.
    pub fn with_schedule(
        name: impl Into<String>,
        coupon_count: usize,
        coupon_period_days: u32,
        near_pay_date: NaiveDate,
    ) -> Self {
        let mut record = Self::new(name);
        record.coupon_count = coupon_count;
        record.coupon_period_days = coupon_period_days;
        record.near_pay_date = near_pay_date;
        record.recompute_schedule();
        record
    }

    pub fn pay_dates(&self) -> &[NaiveDate] {
        &self.pay_dates
    }

    pub fn is_expired(&self) -> bool {
        self.coupon_count == 0
    }

    /// Rejects schedules that cannot be projected as exactly `coupon_count`
    /// strictly increasing dates.
    pub fn validate(&self) -> Result<()> {
        if self.coupon_count > MAX_COUPON_COUNT {
            return Err(BondError::InvalidRecord(format!(
                "`{}` has {} coupons, at most {MAX_COUPON_COUNT} are supported",
                self.name, self.coupon_count
            )));
        }
        if self.coupon_count > 1 && self.coupon_period_days == 0 {
            return Err(BondError::InvalidRecord(format!(
                "`{}` has {} coupons but no coupon period",
                self.name, self.coupon_count
            )));
        }
        if schedule::last_pay_date(self.near_pay_date, self.coupon_period_days, self.coupon_count)
            .is_none()
        {
            return Err(BondError::InvalidRecord(format!(
                "`{}` has coupons past the last supported date",
                self.name
            )));
        }
        Ok(())
    }

    /// Projects `pay_dates` from the stored fields. Invalid records get an
    /// empty schedule.
    pub fn recompute_schedule(&mut self) {
        self.pay_dates = if self.validate().is_ok() {
            schedule::project(
                self.near_pay_date,
                self.coupon_period_days,
                self.coupon_count,
            )
        } else {
            Vec::new()
        };
    }

    /// Drops every pay date on or before `as_of` and advances the near pay date.
    ///
    /// A schedule that is out of step with `coupon_count` (a freshly
    /// deserialized record) is projected first. When nothing remains the near
    /// pay date is left as it was and the coupon count drops to zero.
    pub fn age_forward(&mut self, as_of: NaiveDate) -> Aging {
        if self.pay_dates.len() != self.coupon_count {
            self.recompute_schedule();
        }
        let dropped = schedule::elapsed_count(&self.pay_dates, as_of);
        self.pay_dates.drain(..dropped);
        self.coupon_count = self.coupon_count.saturating_sub(dropped);
        if let Some(first) = self.pay_dates.first() {
            self.near_pay_date = *first;
        }
        Aging {
            dropped,
            expired: self.coupon_count == 0,
        }
    }

    /// Recomputes the schedule from the stored fields, then ages it to `as_of`.
    pub fn refresh(&mut self, as_of: NaiveDate) -> Aging {
        self.recompute_schedule();
        self.age_forward(as_of)
    }
}

mod wire {
    use chrono::{DateTime, NaiveDate};
    use serde::{de::Error, Deserialize, Deserializer};

    const NANOS_PER_DAY: i64 = 86_400_000_000_000;
    // Larger values can only be nanosecond durations written by the earlier tool.
    const MAX_PLAIN_DAYS: i64 = 1_000_000;

    pub(super) fn period_days<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = i64::deserialize(deserializer)?;
        let days = if raw > MAX_PLAIN_DAYS {
            raw / NANOS_PER_DAY
        } else {
            raw
        };
        u32::try_from(days)
            .map_err(|_| D::Error::custom(format!("coupon period out of range: {raw}")))
    }

    pub(super) fn civil_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if let Ok(date) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
            return Ok(date);
        }
        DateTime::parse_from_rfc3339(&raw)
            .map(|timestamp| timestamp.date_naive())
            .map_err(|_| D::Error::custom(format!("invalid pay date `{raw}`")))
    }
}
