#![doc(test(attr(deny(warnings))))]

//! Coupon Calendar tracks bond coupon payment schedules and shows how many
//! payments fall into each month of a year in a terminal dashboard.

pub mod bonds;
pub mod cli;
pub mod clock;
pub mod config;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Coupon Calendar tracing initialized.");
    });
}
