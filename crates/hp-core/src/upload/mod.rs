//! Background upload status.
//!
//! Lab-report files are uploaded in the background; each upload is tracked
//! as an [`UploadRecord`] whose status moves through an explicit transition
//! table. [`HistoryItem`] is the read-only projection shown in upload history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    Pending,
    Uploading,
    Retrying,
    Completed,
    Failed,
    Cancelled,
}

impl UploadStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    pub fn can_transition_to(&self, to: UploadStatus) -> bool {
        use UploadStatus::*;
        matches!(
            (self, to),
            (Pending, Uploading)
                | (Pending, Cancelled)
                | (Uploading, Completed)
                | (Uploading, Failed)
                | (Uploading, Retrying)
                | (Uploading, Cancelled)
                | (Retrying, Uploading)
                | (Retrying, Failed)
                | (Retrying, Cancelled)
                | (Failed, Retrying)
                | (Failed, Cancelled)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("illegal upload transition {from:?} -> {to:?}")]
pub struct UploadTransitionError {
    pub from: UploadStatus,
    pub to: UploadStatus,
}

/// A single file upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRecord {
    pub id: Uuid,
    pub file_name: String,
    pub status: UploadStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Number of times the upload entered `Uploading`.
    pub attempts: u32,
    pub error: Option<String>,
}

impl UploadRecord {
    pub fn new(file_name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            file_name: file_name.into(),
            status: UploadStatus::Pending,
            created_at: now,
            updated_at: now,
            completed_at: None,
            attempts: 0,
            error: None,
        }
    }

    /// Move to `to`, stamping `updated_at`. Entering `Failed` requires an
    /// error message via [`UploadRecord::fail`].
    pub fn transition(
        &mut self,
        to: UploadStatus,
        now: DateTime<Utc>,
    ) -> Result<(), UploadTransitionError> {
        if !self.status.can_transition_to(to) {
            return Err(UploadTransitionError {
                from: self.status,
                to,
            });
        }

        match to {
            UploadStatus::Uploading => {
                self.attempts += 1;
                self.error = None;
            }
            UploadStatus::Completed => self.completed_at = Some(now),
            _ => {}
        }
        self.status = to;
        self.updated_at = now;
        Ok(())
    }

    pub fn fail(
        &mut self,
        error: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<(), UploadTransitionError> {
        self.transition(UploadStatus::Failed, now)?;
        self.error = Some(error.into());
        Ok(())
    }

    pub fn history_item(&self) -> HistoryItem {
        HistoryItem {
            upload_id: self.id,
            title: self.file_name.clone(),
            status: self.status,
            timestamp: self.completed_at.unwrap_or(self.updated_at),
            error: self.error.clone(),
        }
    }
}

/// Upload history row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub upload_id: Uuid,
    pub title: String,
    pub status: UploadStatus,
    pub timestamp: DateTime<Utc>,
    pub error: Option<String>,
}

/// History rows newest first.
pub fn history(records: &[UploadRecord]) -> Vec<HistoryItem> {
    let mut items: Vec<HistoryItem> = records.iter().map(UploadRecord::history_item).collect();
    items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    items
}
