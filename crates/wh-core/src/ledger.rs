//! The in-memory session over one entry collection.

use chrono::{DateTime, NaiveDate, Utc};

use crate::entry::{EntryDraft, EntrySpan, TimeEntry, validate};
use crate::merge::{ImportFormatError, ImportMode, MergeOutcome, import};
use crate::types::{EntryId, ValidationError};

/// Owns the entry collection for a single logical session.
///
/// Every mutation either succeeds completely or leaves the collection as it
/// was. Callers load a snapshot, mutate through the ledger, and persist
/// [`Ledger::entries`] afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    entries: Vec<TimeEntry>,
}

impl Ledger {
    pub const fn new(entries: Vec<TimeEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[TimeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&TimeEntry> {
        self.entries.iter().find(|e| e.id.as_str() == id)
    }

    /// Validates and appends a new entry with a fresh id.
    pub fn add(&mut self, draft: &EntryDraft) -> Result<&TimeEntry, ValidationError> {
        self.add_with(draft, EntryId::generate(), Utc::now())
    }

    /// Like [`Ledger::add`] with caller-supplied identity.
    pub fn add_with(
        &mut self,
        draft: &EntryDraft,
        id: EntryId,
        created_at: DateTime<Utc>,
    ) -> Result<&TimeEntry, ValidationError> {
        let normalized = validate(draft)?;
        self.entries.push(normalized.into_entry(id, created_at));
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Replaces every editable field of entry `id` in place.
    pub fn edit(&mut self, id: &str, draft: &EntryDraft) -> Result<&TimeEntry, ValidationError> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id.as_str() == id)
            .ok_or_else(|| ValidationError::UnknownEntry { id: id.to_string() })?;
        let normalized = validate(draft)?;
        let entry = &mut self.entries[index];
        entry.replace_with(normalized);
        Ok(entry)
    }

    /// Removes entry `id`, returning it.
    pub fn remove(&mut self, id: &str) -> Result<TimeEntry, ValidationError> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id.as_str() == id)
            .ok_or_else(|| ValidationError::UnknownEntry { id: id.to_string() })?;
        Ok(self.entries.remove(index))
    }

    /// Removes every entry whose start or end date is `day`. Returns how many
    /// were removed.
    pub fn remove_day(&mut self, day: NaiveDate) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !e.touches(day));
        before - self.entries.len()
    }

    /// Removes everything. Returns how many entries were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    /// Imports `buffer`, replacing the collection only when it parses.
    pub fn import(&mut self, buffer: &str, mode: ImportMode) -> Result<usize, ImportFormatError> {
        let MergeOutcome { entries, count, .. } = import(&self.entries, buffer, mode)?;
        self.entries = entries;
        Ok(count)
    }
}
