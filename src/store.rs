//! The record store: CRUD operations over positionally-identified rows
//!
//! Records carry no stable server-side key, so every mutating operation
//! re-derives its target row from a fresh full-table scan before writing.
//! Row numbers are never cached across calls.

use crate::client::SheetsClient;
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::range::{CellRange, Column};
use crate::record::{self, Employee, NewEmployee, HEADER, INITIAL_STATUS};
use futures::future::try_join_all;

/// Result of re-resolving a record's current position
///
/// Only valid until the next structural change to the table; never cache it
/// across calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLocation {
    /// 1-based sheet row currently holding the record
    pub row: u32,
    /// The record as parsed from the scan that located it
    pub record: Employee,
}

/// Outcome of a connectivity probe; never an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connectivity {
    pub ok: bool,
    pub detail: String,
}

/// CRUD-style record store over a remote rectangular table
///
/// Stateless between calls: each operation is a self-contained
/// read-then-optionally-write sequence against the backend, and the only
/// state held is the immutable connection configuration. Two sequential
/// calls may observe different backend states; nothing is cached.
#[derive(Debug, Clone)]
pub struct RecordStore {
    client: SheetsClient,
}

impl RecordStore {
    /// Create a store from connection parameters
    pub fn new(config: StoreConfig) -> StoreResult<Self> {
        Ok(Self {
            client: SheetsClient::new(config)?,
        })
    }

    /// Create a store around an existing client
    pub fn with_client(client: SheetsClient) -> Self {
        Self { client }
    }

    /// The underlying transport client
    pub fn client(&self) -> &SheetsClient {
        &self.client
    }

    fn sheet(&self) -> &str {
        &self.client.config().sheet_name
    }

    /// Fetch the whole table, header row included
    async fn fetch_table(&self) -> StoreResult<Vec<Vec<String>>> {
        self.client
            .read_range(&CellRange::sheet(self.sheet()))
            .await
    }

    /// Fetch and parse all records, in current row order
    ///
    /// An empty table yields an empty list, not an error. Rows without an
    /// employee id are dropped.
    pub async fn list_records(&self) -> StoreResult<Vec<Employee>> {
        let rows = self.fetch_table().await?;
        Ok(record::parse_table(&rows))
    }

    /// Look up one record by id; `None` if absent from the current scan
    pub async fn get_record(&self, id: &str) -> StoreResult<Option<Employee>> {
        let records = self.list_records().await?;
        Ok(records.into_iter().find(|r| r.id == id))
    }

    /// Re-resolve a record's current sheet row from a fresh scan
    ///
    /// This is the positional-identity step every mutating-by-id operation
    /// goes through. The returned row number is only valid until the next
    /// structural change to the table.
    pub async fn locate_record(&self, id: &str) -> StoreResult<RowLocation> {
        let records = self.list_records().await?;
        locate_in(records, id).ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    /// Append a new record after the last current row
    ///
    /// Reads the table to learn the current row count, then writes one
    /// full-row range at `count + 1` (row 2 on an empty table) with fixed
    /// initial status, empty login time, zero break time, and the current
    /// timestamp.
    ///
    /// Caller-visible hazard: two concurrent creations can compute the same
    /// target row from stale reads, in which case the later write silently
    /// overwrites the earlier one. The backend offers no transaction to
    /// prevent this.
    pub async fn create_record(&self, draft: &NewEmployee) -> StoreResult<()> {
        let rows = self.fetch_table().await?;
        let row = next_append_row(rows.len());
        tracing::debug!(id = %draft.id, row, "creating record");

        let cells = vec![
            draft.id.clone(),
            draft.name.clone(),
            draft.department.clone(),
            draft.position.clone(),
            INITIAL_STATUS.to_string(),
            String::new(),
            "0".to_string(),
            record::now_timestamp(),
        ];

        self.client
            .write_range(&CellRange::row(self.sheet(), row), vec![cells])
            .await
    }

    /// Update a record's status fields in place
    ///
    /// Locates the record's current row, then issues a single range write
    /// spanning columns E-H (status, login time, break time, last-activity
    /// timestamp), so the four fields change together or not at all.
    /// Fails with [`StoreError::NotFound`] before any write if the id is
    /// absent.
    pub async fn update_status(
        &self,
        id: &str,
        status: &str,
        login_time: Option<&str>,
        break_time: u32,
    ) -> StoreResult<()> {
        let location = self.locate_record(id).await?;
        tracing::debug!(id, row = location.row, status, "updating status");

        let cells = vec![
            status.to_string(),
            login_time.unwrap_or_default().to_string(),
            break_time.to_string(),
            record::now_timestamp(),
        ];
        let range = CellRange::columns(
            self.sheet(),
            Column::Status,
            Column::LastActivity,
            location.row,
        );

        self.client.write_range(&range, vec![cells]).await
    }

    /// Remove a record by blanking its row
    ///
    /// The backend has no delete-row verb, so all eight cells of the
    /// located row are cleared in place. The row itself remains, leaving a
    /// gap; subsequent rows keep their numbers. A later scan simply drops
    /// the blanked row, and any later write re-resolves positions anyway.
    /// Fails with [`StoreError::NotFound`] if the id is absent.
    pub async fn remove_record(&self, id: &str) -> StoreResult<()> {
        let location = self.locate_record(id).await?;
        tracing::debug!(id, row = location.row, "removing record");

        self.client
            .clear_range(&CellRange::row(self.sheet(), location.row))
            .await
    }

    /// Overwrite rows 2..N with the given records, in input order
    ///
    /// Record `i` is written to sheet row `i + 2` as one full-row range;
    /// all row writes are dispatched concurrently and joined. There is no
    /// read-before-write, so any out-of-band changes made since the caller
    /// last read the table are clobbered. A single sub-write failure fails
    /// the whole call; writes already completed are not rolled back, and
    /// the error does not identify which sub-writes succeeded.
    pub async fn bulk_replace(&self, records: &[Employee]) -> StoreResult<()> {
        tracing::debug!(count = records.len(), "bulk replacing records");

        let writes = records.iter().enumerate().map(|(i, rec)| {
            let range = CellRange::row(self.sheet(), row_for_index(i));
            async move { self.client.write_range(&range, vec![rec.to_row()]).await }
        });

        try_join_all(writes).await?;
        Ok(())
    }

    /// Write the fixed header row if the table is completely empty
    ///
    /// Idempotent: a table with any rows at all is left untouched.
    pub async fn initialize_if_empty(&self) -> StoreResult<()> {
        let rows = self.fetch_table().await?;
        if !rows.is_empty() {
            return Ok(());
        }

        tracing::info!(sheet = %self.sheet(), "initializing empty sheet with header row");
        let header = HEADER.iter().map(|s| s.to_string()).collect();
        self.client
            .write_range(&CellRange::header(self.sheet()), vec![header])
            .await
    }

    /// Probe the backend with a read-only fetch
    ///
    /// The one operation that never fails: any error is downgraded into a
    /// negative result with a credential-sanitized detail message.
    pub async fn check_connectivity(&self) -> Connectivity {
        match self.fetch_table().await {
            Ok(_) => Connectivity {
                ok: true,
                detail: "connection successful".to_string(),
            },
            Err(e) => Connectivity {
                ok: false,
                detail: format!("connection failed: {}", e.sanitized_message()),
            },
        }
    }
}

/// Sheet row for appending after `row_count` existing rows (header included)
///
/// An empty table still appends at row 2, leaving row 1 for the header.
fn next_append_row(row_count: usize) -> u32 {
    (row_count as u32 + 1).max(2)
}

/// Sheet row for the record at 0-based scan index `i`
fn row_for_index(i: usize) -> u32 {
    i as u32 + 2
}

/// Scan a record list for an id, pairing the hit with its derived row number
fn locate_in(records: Vec<Employee>, id: &str) -> Option<RowLocation> {
    records.into_iter().enumerate().find_map(|(i, record)| {
        (record.id == id).then(|| RowLocation {
            row: row_for_index(i),
            record,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_append_row() {
        assert_eq!(next_append_row(0), 2); // empty table
        assert_eq!(next_append_row(1), 2); // header only
        assert_eq!(next_append_row(3), 4); // header + two data rows
    }

    #[test]
    fn test_row_for_index() {
        assert_eq!(row_for_index(0), 2);
        assert_eq!(row_for_index(4), 6);
    }

    #[test]
    fn test_locate_in() {
        let records = vec![
            Employee {
                id: "E1".to_string(),
                name: String::new(),
                department: String::new(),
                position: String::new(),
                status: INITIAL_STATUS.to_string(),
                login_time: None,
                break_time: 0,
                last_activity: "t".to_string(),
            },
            Employee {
                id: "E2".to_string(),
                name: String::new(),
                department: String::new(),
                position: String::new(),
                status: INITIAL_STATUS.to_string(),
                login_time: None,
                break_time: 0,
                last_activity: "t".to_string(),
            },
        ];

        let location = locate_in(records.clone(), "E2").unwrap();
        assert_eq!(location.row, 3);
        assert_eq!(location.record.id, "E2");

        assert!(locate_in(records, "E9").is_none());
    }
}
