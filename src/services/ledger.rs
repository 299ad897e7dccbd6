//! Ledger service
//!
//! One ledger holds one user's expenses or income. The whole collection is
//! persisted as a single blob after every mutation; memory is only updated
//! once the write has gone through.

use crate::audit::{AuditEntry, AuditLogger};
use crate::error::FinanceResult;
use crate::models::{DateRange, Money, NewRecord, Record, RecordId, RecordKind, RecordUpdate};
use crate::storage::{load_blob, save_blob, BlobKey, BlobKind, SharedStore};

/// Write-through collection of one user's records of one kind
pub struct Ledger {
    store: SharedStore,
    key: BlobKey,
    kind: RecordKind,
    user_id: String,
    records: Vec<Record>,
    audit: Option<AuditLogger>,
}

impl Ledger {
    /// Open the ledger, loading any previously saved records
    pub fn open(store: SharedStore, kind: RecordKind, user_id: &str) -> FinanceResult<Self> {
        let key = BlobKey::for_user(blob_kind(kind), user_id);
        let records: Vec<Record> = load_blob(store.as_ref(), &key)?;
        tracing::debug!(blob = %key, count = records.len(), "ledger opened");

        Ok(Self {
            store,
            key,
            kind,
            user_id: user_id.to_string(),
            records,
            audit: None,
        })
    }

    /// Log every committed mutation to `audit`
    pub fn with_audit(mut self, audit: AuditLogger) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Discard in-memory state and re-read the blob
    pub fn reload(&mut self) -> FinanceResult<()> {
        self.records = load_blob(self.store.as_ref(), &self.key)?;
        Ok(())
    }

    /// Validate and append a record, returning its new id
    pub fn add(&mut self, new: NewRecord) -> FinanceResult<RecordId> {
        let record = new.into_record()?;
        let id = record.id;

        let mut next = self.records.clone();
        next.push(record.clone());
        self.commit(next)?;

        self.audit(AuditEntry::create(
            &self.user_id,
            self.kind.into(),
            id.to_string(),
            &record,
        ));
        Ok(id)
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Look a record up by its full id or its short `rec-xxxxxxxx` form
    pub fn find(&self, identifier: &str) -> Option<&Record> {
        let identifier = identifier.trim();
        if let Ok(id) = identifier.parse::<RecordId>() {
            return self.get(id);
        }
        self.records.iter().find(|r| r.id.short() == identifier)
    }

    pub fn list_by_category(&self, category: &str) -> Vec<&Record> {
        self.records.iter().filter(|r| r.in_category(category)).collect()
    }

    pub fn list_by_tag(&self, tag: &str) -> Vec<&Record> {
        self.records.iter().filter(|r| r.has_tag(tag)).collect()
    }

    pub fn list_recurring(&self) -> Vec<&Record> {
        self.records.iter().filter(|r| r.is_recurring).collect()
    }

    /// Records inside `range`, in insertion order
    pub fn list_in(&self, range: &DateRange) -> Vec<&Record> {
        self.records.iter().filter(|r| range.contains(&r.date)).collect()
    }

    /// Sum of amounts inside `range`
    pub fn total(&self, range: &DateRange) -> Money {
        self.records
            .iter()
            .filter(|r| range.contains(&r.date))
            .map(|r| r.amount)
            .sum()
    }

    /// `income.total(range) - self.total(range)`, with `self` as the expense ledger
    pub fn net_balance(&self, income: &Ledger, range: &DateRange) -> Money {
        income.total(range) - self.total(range)
    }

    /// Remove a record; `false` if no record has that id
    pub fn delete(&mut self, id: RecordId) -> FinanceResult<bool> {
        let Some(position) = self.records.iter().position(|r| r.id == id) else {
            return Ok(false);
        };

        let mut next = self.records.clone();
        let removed = next.remove(position);
        self.commit(next)?;

        self.audit(AuditEntry::delete(
            &self.user_id,
            self.kind.into(),
            id.to_string(),
            &removed,
        ));
        Ok(true)
    }

    /// Apply a partial update; `false` if no record has that id
    ///
    /// Every supplied field is validated before anything is changed.
    pub fn update(&mut self, id: RecordId, update: RecordUpdate) -> FinanceResult<bool> {
        let Some(position) = self.records.iter().position(|r| r.id == id) else {
            return Ok(false);
        };

        let before = self.records[position].clone();
        let mut after = before.clone();
        update.apply_to(&mut after)?;

        let mut next = self.records.clone();
        next[position] = after.clone();
        self.commit(next)?;

        self.audit(AuditEntry::update(
            &self.user_id,
            self.kind.into(),
            id.to_string(),
            &before,
            &after,
        ));
        Ok(true)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    fn commit(&mut self, next: Vec<Record>) -> FinanceResult<()> {
        save_blob(self.store.as_ref(), &self.key, &next)?;
        self.records = next;
        Ok(())
    }

    fn audit(&self, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            logger.record(entry);
        }
    }
}

fn blob_kind(kind: RecordKind) -> BlobKind {
    match kind {
        RecordKind::Expense => BlobKind::Expenses,
        RecordKind::Income => BlobKind::Income,
    }
}
