//! mtp-domain
//!
//! Pure domain models for the money tracker (transactions, drafts, budget settings and the
//! category taxonomy). No I/O, no CLI, no storage. Only data types and core enums.

pub mod budget;
pub mod category;
pub mod transaction;

pub use budget::*;
pub use category::*;
pub use transaction::*;

/// Re-exported so downstream crates share one decimal type.
pub use rust_decimal::Decimal;
