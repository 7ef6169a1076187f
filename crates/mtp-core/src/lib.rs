//! mtp-core
//!
//! Ledger store, aggregation engine and draft validation for the money tracker.
//! Depends on mtp-domain. No CLI, no terminal I/O; persistence goes through [`KeyValueStore`].

pub mod draft_service;
pub mod error;
pub mod format;
pub mod ledger_store;
pub mod storage;
pub mod summary_service;
pub mod time;

pub use draft_service::*;
pub use error::CoreError;
pub use format::*;
pub use ledger_store::*;
pub use storage::*;
pub use summary_service::*;
pub use time::*;
