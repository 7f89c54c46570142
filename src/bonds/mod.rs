//! Bond records, their coupon schedules, and the collection the dashboard works on.

pub mod collection;
pub mod record;
pub mod schedule;

pub use collection::{AppendOutcome, BondCollection, ExpiryPolicy};
pub use record::{Aging, BondRecord, MAX_COUPON_COUNT};
pub use schedule::MonthlyTally;
