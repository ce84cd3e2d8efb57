//! # Record List
//!
//! Holds the full record set fetched from the server and derives the
//! dashboard view from it on every read.
//!
//! ## Deletion
//!
//! | Operation | Empty set | Declined | Server fails | Server succeeds |
//! |-----------|-----------|----------|--------------|-----------------|
//! | `delete_one` | n/a | `Cancelled` | set unchanged, `Err` | record removed |
//! | `delete_all` | `NothingToDelete`, no request | `Cancelled` | set unchanged, `Err` | set cleared |
//!
//! A failed bulk delete never removes anything locally: the server may or
//! may not have acted, and the next [`load`](RecordListModel::load) is the
//! only way to find out.

use areg_client::{ApiClient, ApiError};
use areg_core::{project, Record, RecordId, SortOrder};

use crate::confirm::Confirm;

/// Result of a single-record delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The server deleted the record and it left the held set.
    Deleted,
    /// The user declined; nothing was sent.
    Cancelled,
}

/// Result of a bulk delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkDeleteOutcome {
    /// The held set was already empty; nothing was sent.
    NothingToDelete,
    /// The user declined; nothing was sent.
    Cancelled,
    /// The server deleted everything; `count` records left the held set.
    Deleted { count: usize },
}

/// Dashboard state: records, search term, sort order.
#[derive(Debug)]
pub struct RecordListModel {
    client: ApiClient,
    records: Vec<Record>,
    search: String,
    sort: SortOrder,
}

impl RecordListModel {
    /// An empty list (oldest first, no search term). Call [`load`](Self::load)
    /// to fill it.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            records: Vec::new(),
            search: String::new(),
            sort: SortOrder::default(),
        }
    }

    /// Replace the held set with the server's. On failure the held set is
    /// left as it was.
    pub async fn load(&mut self) -> Result<usize, ApiError> {
        let records = self.client.records().list().await?;
        tracing::debug!(count = records.len(), "loaded records");
        self.records = records;
        Ok(self.records.len())
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.sort = order;
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort
    }

    /// The filtered, sorted view. Recomputed on every call.
    pub fn view(&self) -> Vec<&Record> {
        project(&self.records, &self.search, self.sort)
    }

    /// The held set, in server order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a held record by identity.
    pub fn find(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|r| &r.id == id)
    }

    /// Delete one record after the user confirms.
    pub async fn delete_one<C>(
        &mut self,
        id: &RecordId,
        confirm: &C,
    ) -> Result<DeleteOutcome, ApiError>
    where
        C: Confirm + ?Sized,
    {
        if !confirm.confirm("Are you sure you want to delete this record?") {
            return Ok(DeleteOutcome::Cancelled);
        }
        self.client.records().delete(id).await?;
        self.records.retain(|r| &r.id != id);
        tracing::info!(record = %id, "record deleted");
        Ok(DeleteOutcome::Deleted)
    }

    /// Delete every record after the user confirms. Does nothing when the
    /// held set is empty.
    pub async fn delete_all<C>(&mut self, confirm: &C) -> Result<BulkDeleteOutcome, ApiError>
    where
        C: Confirm + ?Sized,
    {
        if self.records.is_empty() {
            return Ok(BulkDeleteOutcome::NothingToDelete);
        }
        let prompt = format!(
            "Delete all {} records? This cannot be undone.",
            self.records.len()
        );
        if !confirm.confirm(&prompt) {
            return Ok(BulkDeleteOutcome::Cancelled);
        }
        if let Err(e) = self.client.records().delete_all().await {
            tracing::warn!(held = self.records.len(), error = %e, "bulk delete failed; keeping held records");
            return Err(e);
        }
        let count = self.records.len();
        self.records.clear();
        tracing::info!(count, "all records deleted");
        Ok(BulkDeleteOutcome::Deleted { count })
    }
}
