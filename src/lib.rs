//! sheetstore: typed employee attendance records over a spreadsheet API
//!
//! A remote rectangular table (fixed 8-column header row + data rows) is
//! used as a makeshift record store. Records have no stable server-side
//! key; identity is positional, so every write re-derives its target row
//! from a fresh full-table scan and addresses cells by A1 coordinates.
//!
//! # Architecture
//!
//! - [`RecordStore`]: the CRUD surface (list, get, create, update status,
//!   remove, bulk replace, initialize, connectivity probe)
//! - [`record`]: the Row Mapper between header-keyed rows and [`Employee`]
//! - [`SheetsClient`]: reqwest transport for the three backend verbs
//!   (read / write / clear a range)
//! - [`CellRange`]: the A1 coordinate grammar
//!
//! The backend is non-transactional: multi-row operations are independent
//! range writes with no atomicity across them, and concurrent writers race
//! with last-write-wins at cell granularity. See the operation docs on
//! [`RecordStore`] for the specific hazards.

pub mod client;
pub mod config;
pub mod error;
pub mod range;
pub mod record;
pub mod store;

pub use client::{SheetsClient, ValueRange};
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use range::{CellRange, Column};
pub use record::{normalize_header, parse_table, Employee, NewEmployee, HEADER, INITIAL_STATUS};
pub use store::{Connectivity, RecordStore, RowLocation};
