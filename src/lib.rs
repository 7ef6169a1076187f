#![doc(test(attr(deny(warnings))))]

//! Money Tracker records income and expense transactions, summarises them and tracks a
//! daily spending limit. The ledger and aggregation logic live in `mtp-core`; this crate
//! wires them to JSON storage, user configuration and an interactive shell.

pub mod cli;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Money Tracker tracing initialized.");
    });
}
