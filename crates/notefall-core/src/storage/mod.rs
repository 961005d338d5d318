//! Play results and session logs.
//!
//! Finished plays become [`PlayRecord`]s. An [`ExportFormat`] turns records
//! into lines and a [`SessionLog`] appends those lines to a dated file under
//! the session directory:
//!
//! - `sessions/YYYY-MM-DD/session_HHMMSS.tsv` for human-readable logs
//! - `sessions/YYYY-MM-DD/session_HHMMSS.json` (NDJSON) for programmatic access

mod format;
mod json;
mod record;
mod session;
mod tsv;

pub use format::*;
pub use json::*;
pub use record::*;
pub use session::*;
pub use tsv::*;
