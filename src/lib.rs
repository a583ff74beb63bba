#![doc(test(attr(deny(warnings))))]

//! Finance Core offers the domain model for personal-finance tracking:
//! money-safe arithmetic, validated entities, recurrence scheduling, and a
//! JSON storage collaborator.

pub mod domain;
pub mod errors;
pub mod ledger;
pub mod money;
pub mod storage;
pub mod time;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finance Core tracing initialized.");
    });
}
