//! Save and restore of in-progress answers.

use std::sync::Arc;

use quizkeep_core::Submission;

use crate::error::{DecodeError, RestoreError, StorageError};
use crate::store::KeyValueStore;

/// Keeps the latest submission under one fixed key.
///
/// Every save is a full snapshot; there is no merging with what was there.
#[derive(Clone)]
pub struct ProgressStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl ProgressStore {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replace the saved snapshot with `submission`.
    ///
    /// On error the previous snapshot is left as it was.
    pub async fn save(&self, submission: &Submission) -> Result<(), StorageError> {
        let encoded = encode(submission)?;
        self.store.set(&self.key, &encoded).await?;
        tracing::debug!(
            key = %self.key,
            answers = submission.len(),
            bytes = encoded.len(),
            "saved progress"
        );
        Ok(())
    }

    /// Read the saved snapshot, reporting why it could not be read.
    pub async fn try_restore(&self) -> Result<Option<Submission>, RestoreError> {
        let raw = match self.store.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(None),
            Err(StorageError::Corrupt(reason)) => return Err(DecodeError::NotText(reason).into()),
            Err(e) => return Err(e.into()),
        };
        let submission = serde_json::from_str(&raw).map_err(DecodeError::Json)?;
        Ok(Some(submission))
    }

    /// Read the saved snapshot, treating any failure as "nothing saved".
    pub async fn restore(&self) -> Option<Submission> {
        match self.try_restore().await {
            Ok(submission) => submission,
            Err(e) => {
                tracing::warn!(key = %self.key, "ignoring saved progress: {e}");
                None
            }
        }
    }
}

impl std::fmt::Debug for ProgressStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressStore")
            .field("store", &self.store.name())
            .field("key", &self.key)
            .finish()
    }
}

/// Encode a submission, refusing encodings that do not decode back to it.
fn encode(submission: &Submission) -> Result<String, StorageError> {
    let encoded =
        serde_json::to_string(submission).map_err(|e| StorageError::Serialization(e.to_string()))?;
    let decoded: Submission = serde_json::from_str(&encoded)
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    if &decoded != submission {
        return Err(StorageError::Serialization(
            "encoded answers do not round-trip".into(),
        ));
    }
    Ok(encoded)
}
