//! In-memory check store.

use std::sync::RwLock;

use chrono::Utc;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::EligibilityCheckRecord;

use super::CheckStore;

/// A [`CheckStore`] that keeps records in memory.
///
/// Records are kept in insertion order; listings sort by `created_at`
/// descending and fall back to most-recent insertion first on ties.
#[derive(Debug, Default)]
pub struct InMemoryCheckStore {
    records: RwLock<Vec<EligibilityCheckRecord>>,
}

impl InMemoryCheckStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> EngineError {
    EngineError::Store {
        message: "check store lock poisoned".to_string(),
    }
}

impl CheckStore for InMemoryCheckStore {
    fn save(&self, mut record: EligibilityCheckRecord) -> EngineResult<EligibilityCheckRecord> {
        if record.id.is_none() {
            record.id = Some(Uuid::new_v4());
        }
        if record.created_at.is_none() {
            record.created_at = Some(Utc::now());
        }

        let mut records = self.records.write().map_err(|_| poisoned())?;
        records.push(record.clone());
        Ok(record)
    }

    fn list_for_owner(&self, owner_id: &str) -> EngineResult<Vec<EligibilityCheckRecord>> {
        let records = self.records.read().map_err(|_| poisoned())?;
        let mut owned: Vec<EligibilityCheckRecord> = records
            .iter()
            .rev()
            .filter(|record| record.owner_id.as_deref() == Some(owner_id))
            .cloned()
            .collect();
        // Stable sort keeps reverse insertion order among equal timestamps.
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    fn count(&self) -> EngineResult<usize> {
        Ok(self.records.read().map_err(|_| poisoned())?.len())
    }
}
