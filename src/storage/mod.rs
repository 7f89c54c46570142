pub mod json_backend;

use std::path::Path;

use crate::{bonds::BondRecord, errors::Result};

/// Abstraction over where bond lists are read from and written to.
pub trait BondStore {
    fn load(&self, path: &Path) -> Result<Vec<BondRecord>>;
    fn store(&self, path: &Path, records: &[BondRecord]) -> Result<()>;
}

pub use json_backend::JsonBondStore;
