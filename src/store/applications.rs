//! In-memory application status store.

use std::sync::RwLock;

use chrono::Utc;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{ApplicationStatus, ApplicationUpdate};

use super::ApplicationStatusStore;

/// An [`ApplicationStatusStore`] that keeps applications in memory.
#[derive(Debug, Default)]
pub struct InMemoryApplicationStore {
    applications: RwLock<Vec<ApplicationStatus>>,
}

impl InMemoryApplicationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> EngineError {
    EngineError::Store {
        message: "application store lock poisoned".to_string(),
    }
}

fn not_found(id: Uuid) -> EngineError {
    EngineError::NotFound {
        resource: "Application",
        id: id.to_string(),
    }
}

fn is_owned(application: &ApplicationStatus, owner_id: &str, id: Uuid) -> bool {
    application.id == Some(id) && application.owner_id == owner_id
}

impl ApplicationStatusStore for InMemoryApplicationStore {
    fn create(&self, mut application: ApplicationStatus) -> EngineResult<ApplicationStatus> {
        let mut applications = self.applications.write().map_err(|_| poisoned())?;

        // (owner, program) is unique
        if applications.iter().any(|existing| {
            existing.owner_id == application.owner_id
                && existing.program_id == application.program_id
        }) {
            return Err(EngineError::Conflict {
                message: format!(
                    "owner '{}' already tracks an application for program '{}'",
                    application.owner_id, application.program_id
                ),
            });
        }

        let now = Utc::now();
        application.id = Some(Uuid::new_v4());
        application.created_at = Some(now);
        application.updated_at = Some(now);

        applications.push(application.clone());
        Ok(application)
    }

    fn list_for_owner(&self, owner_id: &str) -> EngineResult<Vec<ApplicationStatus>> {
        let applications = self.applications.read().map_err(|_| poisoned())?;
        Ok(applications
            .iter()
            .filter(|application| application.owner_id == owner_id)
            .cloned()
            .collect())
    }

    fn get(&self, owner_id: &str, id: Uuid) -> EngineResult<ApplicationStatus> {
        let applications = self.applications.read().map_err(|_| poisoned())?;
        applications
            .iter()
            .find(|application| is_owned(application, owner_id, id))
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    fn update(
        &self,
        owner_id: &str,
        id: Uuid,
        update: ApplicationUpdate,
    ) -> EngineResult<ApplicationStatus> {
        let mut applications = self.applications.write().map_err(|_| poisoned())?;
        let application = applications
            .iter_mut()
            .find(|application| is_owned(application, owner_id, id))
            .ok_or_else(|| not_found(id))?;

        application.apply(update);
        application.updated_at = Some(Utc::now());
        Ok(application.clone())
    }

    fn delete(&self, owner_id: &str, id: Uuid) -> EngineResult<()> {
        let mut applications = self.applications.write().map_err(|_| poisoned())?;
        let index = applications
            .iter()
            .position(|application| is_owned(application, owner_id, id))
            .ok_or_else(|| not_found(id))?;
        applications.remove(index);
        Ok(())
    }

    fn count(&self) -> EngineResult<usize> {
        Ok(self.applications.read().map_err(|_| poisoned())?.len())
    }
}
