use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{BondError, Result};
use crate::storage::BondStore;

use super::record::BondRecord;
use super::schedule::MonthlyTally;

/// What happens to a bond once every coupon date has elapsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpiryPolicy {
    /// Keep the bond listed with zero remaining coupons.
    #[default]
    Keep,
    /// Drop the bond when it is appended or loaded.
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Added(usize),
    DiscardedExpired,
}

/// Ordered set of tracked bonds with payment counts bucketed by month.
#[derive(Debug, Clone, Default)]
pub struct BondCollection {
    records: Vec<BondRecord>,
    tally: MonthlyTally,
    expiry_policy: ExpiryPolicy,
}

impl BondCollection {
    pub fn new(expiry_policy: ExpiryPolicy) -> Self {
        Self {
            records: Vec::new(),
            tally: MonthlyTally::default(),
            expiry_policy,
        }
    }

    pub fn expiry_policy(&self) -> ExpiryPolicy {
        self.expiry_policy
    }

    pub fn records(&self) -> &[BondRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&BondRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Projects and ages `record` against `today`, then appends it.
    pub fn append(&mut self, mut record: BondRecord, today: NaiveDate) -> Result<AppendOutcome> {
        record.validate()?;
        let aging = record.refresh(today);
        if aging.expired && self.expiry_policy == ExpiryPolicy::Remove {
            tracing::info!(name = %record.name, "discarding bond with no future coupons");
            return Ok(AppendOutcome::DiscardedExpired);
        }
        self.records.push(record);
        self.rebuild_tally();
        let index = self.records.len() - 1;
        tracing::info!(index, dropped = aging.dropped, "bond appended");
        Ok(AppendOutcome::Added(index))
    }

    /// Replaces every record, re-deriving and aging each schedule.
    ///
    /// Validation happens before anything is replaced, so a bad record leaves
    /// the collection untouched.
    pub fn replace_all(&mut self, mut records: Vec<BondRecord>, today: NaiveDate) -> Result<usize> {
        for record in &records {
            record.validate()?;
        }
        for record in records.iter_mut() {
            record.refresh(today);
        }
        if self.expiry_policy == ExpiryPolicy::Remove {
            records.retain(|record| !record.is_expired());
        }
        self.records = records;
        self.rebuild_tally();
        Ok(self.records.len())
    }

    pub fn load_from(
        &mut self,
        store: &dyn BondStore,
        path: &Path,
        today: NaiveDate,
    ) -> Result<usize> {
        let records = store.load(path)?;
        let count = self.replace_all(records, today)?;
        tracing::info!(path = %path.display(), count, "bonds loaded");
        Ok(count)
    }

    /// Writes the records as they are, without aging them first.
    pub fn save_to(&self, store: &dyn BondStore, path: &Path) -> Result<()> {
        store.store(path, &self.records)?;
        tracing::info!(path = %path.display(), count = self.records.len(), "bonds saved");
        Ok(())
    }

    pub fn remove_at(&mut self, index: usize) -> Result<BondRecord> {
        if index >= self.records.len() {
            return Err(BondError::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        let removed = self.records.remove(index);
        self.rebuild_tally();
        Ok(removed)
    }

    pub fn count_in_month(&self, year: i32, month: u32) -> usize {
        self.tally.count(year, month)
    }

    pub fn year_total(&self, year: i32) -> usize {
        self.tally.year_total(year)
    }

    fn rebuild_tally(&mut self) {
        self.tally = MonthlyTally::from_records(&self.records);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonds::schedule;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2025, 1, 1)
    }

    fn sample() -> BondCollection {
        let mut bonds = BondCollection::default();
        bonds
            .append(BondRecord::with_schedule("A", 4, 90, date(2025, 1, 15)), today())
            .unwrap();
        bonds
            .append(BondRecord::with_schedule("B", 12, 30, date(2025, 1, 20)), today())
            .unwrap();
        bonds
            .append(BondRecord::with_schedule("C", 3, 182, date(2025, 6, 30)), today())
            .unwrap();
        bonds
    }

    #[test]
    fn append_ages_the_record_before_inserting() {
        let mut bonds = BondCollection::default();
        let outcome = bonds
            .append(
                BondRecord::with_schedule("A", 4, 90, date(2024, 10, 1)),
                date(2025, 1, 1),
            )
            .unwrap();
        assert_eq!(outcome, AppendOutcome::Added(0));
        let record = bonds.get(0).unwrap();
        assert_eq!(record.coupon_count, 2);
        assert_eq!(record.near_pay_date, date(2025, 3, 30));
    }

    #[test]
    fn monthly_counts_sum_to_yearly_total() {
        let bonds = sample();
        for year in 2024..=2027 {
            let by_month: usize = (1..=12).map(|m| bonds.count_in_month(year, m)).sum();
            let scanned = bonds
                .records()
                .iter()
                .flat_map(|r| r.pay_dates())
                .filter(|d| chrono::Datelike::year(*d) == year)
                .count();
            assert_eq!(by_month, scanned);
            assert_eq!(bonds.year_total(year), scanned);
        }
    }

    #[test]
    fn bucketed_counts_match_linear_scan() {
        let bonds = sample();
        for month in 1..=12 {
            assert_eq!(
                bonds.count_in_month(2025, month),
                schedule::count_in_month(bonds.records(), 2025, month)
            );
        }
    }

    #[test]
    fn remove_out_of_range_leaves_collection_unchanged() {
        let mut bonds = sample();
        let before = bonds.records().to_vec();
        let err = bonds.remove_at(3).unwrap_err();
        assert!(matches!(err, BondError::IndexOutOfRange { index: 3, len: 3 }));
        assert_eq!(bonds.records(), before.as_slice());
    }

    #[test]
    fn remove_targets_exactly_one_record() {
        let mut bonds = sample();
        assert_eq!(bonds.count_in_month(2025, 2), 1);
        let removed = bonds.remove_at(1).unwrap();
        assert_eq!(removed.name, "B");
        let names: Vec<&str> = bonds.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
        assert_eq!(bonds.count_in_month(2025, 2), 0);
    }

    #[test]
    fn expired_bonds_follow_the_configured_policy() {
        let old = BondRecord::with_schedule("Old", 2, 30, date(2020, 1, 1));

        let mut keep = BondCollection::new(ExpiryPolicy::Keep);
        assert_eq!(keep.append(old.clone(), today()).unwrap(), AppendOutcome::Added(0));
        assert_eq!(keep.get(0).unwrap().coupon_count, 0);

        let mut remove = BondCollection::new(ExpiryPolicy::Remove);
        assert_eq!(
            remove.append(old.clone(), today()).unwrap(),
            AppendOutcome::DiscardedExpired
        );
        assert!(remove.is_empty());
        assert_eq!(remove.replace_all(vec![old], today()).unwrap(), 0);
    }

    #[test]
    fn replace_all_rejects_invalid_records_without_touching_state() {
        let mut bonds = sample();
        let invalid = BondRecord::with_schedule("Bad", 5, 0, date(2025, 3, 1));
        assert!(bonds.replace_all(vec![invalid], today()).is_err());
        assert_eq!(bonds.len(), 3);
    }

    #[test]
    fn unprojectable_schedules_are_rejected_whole() {
        let mut bonds = sample();
        let before = bonds.records().to_vec();
        let far = BondRecord::with_schedule("Far", 5, 40_000_000, date(2025, 3, 1));
        let mut huge = BondRecord::new("Huge");
        huge.coupon_count = crate::bonds::MAX_COUPON_COUNT + 1;
        huge.coupon_period_days = 1;
        huge.near_pay_date = date(2030, 1, 1);

        for bad in [far, huge] {
            let good = BondRecord::with_schedule("Good", 2, 30, date(2025, 6, 1));
            assert!(matches!(
                bonds.replace_all(vec![good, bad.clone()], today()),
                Err(BondError::InvalidRecord(_))
            ));
            assert!(matches!(
                bonds.append(bad, today()),
                Err(BondError::InvalidRecord(_))
            ));
        }
        assert_eq!(bonds.records(), before.as_slice());
    }
}
