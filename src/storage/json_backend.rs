use std::{fs, path::Path};

use crate::{
    bonds::BondRecord,
    errors::Result,
    utils::persistence::{tmp_path, write_atomic},
};

use super::BondStore;

/// Stores bond lists as a pretty-printed JSON array.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBondStore;

impl BondStore for JsonBondStore {
    fn load(&self, path: &Path) -> Result<Vec<BondRecord>> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn store(&self, path: &Path, records: &[BondRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        let tmp = tmp_path(path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    #[test]
    fn stores_and_reads_back_records_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bonds.json");
        let near = NaiveDate::from_ymd_opt(2030, 2, 1).unwrap();
        let records = vec![
            BondRecord::with_schedule("First", 3, 91, near),
            BondRecord::with_schedule("Second", 1, 0, near),
        ];

        JsonBondStore.store(&path, &records).unwrap();
        let loaded = JsonBondStore.load(&path).unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].name, "First");
        assert_eq!(loaded[1].coupon_period_days, 0);
        assert!(loaded[0].pay_dates().is_empty());
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let err = JsonBondStore.load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, crate::errors::BondError::Io(_)));
    }
}
