//! Coupon date projection and per-month aggregation.
//!
//! All arithmetic is on civil dates: adding a period of `n` days walks the
//! calendar, so month lengths and leap years are respected and there is no
//! time-of-day or daylight-saving drift.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};

use super::record::BondRecord;

/// Projects `count` payment dates starting at `near_pay_date`, `period_days` apart.
///
/// A zero period only makes sense for a single remaining coupon, and the last
/// date must be representable; callers check both first (see
/// [`BondRecord::validate`]).
pub fn project(near_pay_date: NaiveDate, period_days: u32, count: usize) -> Vec<NaiveDate> {
    let step = Days::new(u64::from(period_days));
    std::iter::successors(Some(near_pay_date), |date| date.checked_add_days(step))
        .take(count)
        .collect()
}

/// Date of the final coupon, or `None` when it falls outside chrono's calendar.
pub fn last_pay_date(near_pay_date: NaiveDate, period_days: u32, count: usize) -> Option<NaiveDate> {
    let steps = u64::try_from(count.saturating_sub(1)).ok()?;
    let offset = steps.checked_mul(u64::from(period_days))?;
    near_pay_date.checked_add_days(Days::new(offset))
}

/// Whole days between the nearest and the following pay date.
pub fn period_from_dates(near: NaiveDate, next: NaiveDate) -> i64 {
    (next - near).num_days()
}

/// Number of leading dates in an ordered schedule that are not strictly after `as_of`.
pub fn elapsed_count(pay_dates: &[NaiveDate], as_of: NaiveDate) -> usize {
    pay_dates.partition_point(|date| *date <= as_of)
}

/// Counts payments across `records` that fall in `year`/`month` by scanning every date.
pub fn count_in_month(records: &[BondRecord], year: i32, month: u32) -> usize {
    records
        .iter()
        .flat_map(|record| record.pay_dates())
        .filter(|date| date.year() == year && date.month() == month)
        .count()
}

/// Payment counts pre-bucketed by `(year, month)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthlyTally {
    buckets: BTreeMap<(i32, u32), usize>,
}

impl MonthlyTally {
    pub fn from_records(records: &[BondRecord]) -> Self {
        let mut buckets = BTreeMap::new();
        for date in records.iter().flat_map(|record| record.pay_dates()) {
            *buckets.entry((date.year(), date.month())).or_insert(0) += 1;
        }
        Self { buckets }
    }

    pub fn count(&self, year: i32, month: u32) -> usize {
        self.buckets.get(&(year, month)).copied().unwrap_or(0)
    }

    pub fn year_total(&self, year: i32) -> usize {
        self.buckets
            .range((year, 1)..=(year, 12))
            .map(|(_, count)| *count)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
