use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Maximum length of a cash entry note, in characters.
pub const NOTE_MAX_LEN: usize = 30;

/// A recorded cash holding in New Taiwan dollars and/or US dollars.
///
/// Entries are created and deleted, never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashEntry {
    /// System-assigned, monotonically increasing identifier
    pub id: i64,

    /// Amount in New Taiwan dollars (whole units)
    pub taiwanese_dollars: i64,

    /// Amount in US dollars
    pub us_dollars: f64,

    /// Short free-text note
    pub note: String,

    /// Date of the entry (daily granularity)
    pub date: NaiveDate,
}

/// Payload for inserting a new cash entry. The id is assigned by the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCashEntry {
    pub taiwanese_dollars: i64,
    pub us_dollars: f64,
    #[serde(default)]
    pub note: String,
    pub date: NaiveDate,
}

impl NewCashEntry {
    pub fn new(
        taiwanese_dollars: i64,
        us_dollars: f64,
        note: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            taiwanese_dollars,
            us_dollars,
            note: note.into(),
            date,
        }
    }

    /// Reject negative or non-finite amounts and over-long notes.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.taiwanese_dollars < 0 {
            return Err(CoreError::ValidationError(format!(
                "Taiwanese dollars must not be negative, got {}",
                self.taiwanese_dollars
            )));
        }
        if !self.us_dollars.is_finite() || self.us_dollars < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "US dollars must be a non-negative number, got {}",
                self.us_dollars
            )));
        }
        let note_len = self.note.chars().count();
        if note_len > NOTE_MAX_LEN {
            return Err(CoreError::ValidationError(format!(
                "Note is {note_len} characters long, maximum is {NOTE_MAX_LEN}"
            )));
        }
        Ok(())
    }
}
