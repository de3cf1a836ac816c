//! Eligibility service facade.
//!
//! [`EligibilityService`] ties a catalog source, a check store and an
//! application store to the pure evaluator. It is the entry point used by the
//! HTTP API and by embedders that call the engine directly.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::{CatalogSource, CatalogStatistics, CategoryFilter, list_active};
use crate::eligibility::{ProgramAssessment, evaluate, explain};
use crate::error::{EngineError, EngineResult, FieldViolation};
use crate::models::{
    ApplicantProfile, ApplicationStatus, ApplicationUpdate, EligibilityCheckRecord, Program,
};
use crate::store::{ApplicationStatusStore, CheckStore, InMemoryApplicationStore};

/// The result of one eligibility check.
///
/// A storage failure does not invalidate the evaluation: `record` is always the
/// evaluated result, unsaved when `storage_error` is set.
#[derive(Debug)]
pub struct CheckOutcome {
    /// The evaluated record; stamped with id and timestamp when stored.
    pub record: EligibilityCheckRecord,
    /// Set when the record could not be stored.
    pub storage_error: Option<EngineError>,
}

impl CheckOutcome {
    /// Returns true if the record was stored.
    pub fn is_stored(&self) -> bool {
        self.storage_error.is_none()
    }
}

/// Runs eligibility checks, catalog queries and application tracking.
#[derive(Clone)]
pub struct EligibilityService {
    catalog: Arc<dyn CatalogSource>,
    store: Arc<dyn CheckStore>,
    applications: Arc<dyn ApplicationStatusStore>,
}

impl EligibilityService {
    /// Creates a service over the given catalog source and check store.
    ///
    /// Applications are kept in an [`InMemoryApplicationStore`] until
    /// [`with_application_store`](Self::with_application_store) replaces it.
    pub fn new(catalog: Arc<dyn CatalogSource>, store: Arc<dyn CheckStore>) -> Self {
        Self {
            catalog,
            store,
            applications: Arc::new(InMemoryApplicationStore::new()),
        }
    }

    /// Uses `applications` for application tracking.
    pub fn with_application_store(
        mut self,
        applications: Arc<dyn ApplicationStatusStore>,
    ) -> Self {
        self.applications = applications;
        self
    }

    /// Evaluates `profile` for `owner_id` and stores the result.
    ///
    /// Fails with `Validation` for a bad profile and `CatalogUnavailable` when
    /// the catalog cannot be fetched; neither is retried. The catalog is
    /// fetched once, after validation, and the whole evaluation runs against
    /// that snapshot.
    pub fn check_eligibility(
        &self,
        owner_id: &str,
        profile: ApplicantProfile,
    ) -> EngineResult<CheckOutcome> {
        profile.validate()?;

        let snapshot = self.catalog.snapshot()?;
        let start = Instant::now();
        let record = evaluate(profile, snapshot.programs())?.with_owner(owner_id);

        info!(
            owner_id,
            catalog_version = snapshot.version(),
            catalog_size = snapshot.programs().len(),
            eligible = record.eligible_count(),
            total_potential_benefits = %record.total_potential_benefits(),
            duration_us = start.elapsed().as_micros() as u64,
            "Eligibility evaluated"
        );

        match self.store.save(record.clone()) {
            Ok(saved) => Ok(CheckOutcome {
                record: saved,
                storage_error: None,
            }),
            Err(err) => {
                warn!(owner_id, error = %err, "Failed to store eligibility check");
                Ok(CheckOutcome {
                    record,
                    storage_error: Some(err),
                })
            }
        }
    }

    /// Lists active programs, optionally restricted to one category.
    ///
    /// `None` and `Some("all")` list everything; an unrecognised category
    /// lists nothing.
    pub fn list_programs(&self, category: Option<&str>) -> EngineResult<Vec<Program>> {
        let filter = CategoryFilter::from(category);
        let snapshot = self.catalog.snapshot()?;
        Ok(list_active(snapshot.programs())
            .into_iter()
            .filter(|program| filter.matches(program))
            .collect())
    }

    /// Lists `owner_id`'s eligibility checks, newest first.
    pub fn list_history(&self, owner_id: &str) -> EngineResult<Vec<EligibilityCheckRecord>> {
        self.store.list_for_owner(owner_id)
    }

    /// Explains, program by program, why `profile` does or does not match.
    pub fn explain(&self, profile: &ApplicantProfile) -> EngineResult<Vec<ProgramAssessment>> {
        profile.validate()?;
        let snapshot = self.catalog.snapshot()?;
        explain(profile, snapshot.programs())
    }

    /// Catalog, history and application statistics.
    pub fn statistics(&self) -> EngineResult<CatalogStatistics> {
        let snapshot = self.catalog.snapshot()?;
        let total_checks = self.store.count()?;
        let total_applications = self.applications.count()?;
        Ok(CatalogStatistics::compute(
            snapshot.programs(),
            total_checks,
            total_applications,
        ))
    }

    /// Starts tracking an application.
    ///
    /// The owner must be named and the program must exist in the current
    /// catalog; inactive programs can still be tracked. Fails with `Conflict`
    /// when the owner already tracks the program.
    pub fn create_application(
        &self,
        application: ApplicationStatus,
    ) -> EngineResult<ApplicationStatus> {
        let mut violations = Vec::new();
        if application.owner_id.trim().is_empty() {
            violations.push(FieldViolation::new("owner_id", "must not be empty"));
        }

        let snapshot = self.catalog.snapshot()?;
        if !snapshot
            .programs()
            .iter()
            .any(|program| program.id == application.program_id)
        {
            violations.push(FieldViolation::new(
                "program_id",
                format!("unknown program '{}'", application.program_id),
            ));
        }
        if !violations.is_empty() {
            return Err(EngineError::Validation { violations });
        }

        let created = self.applications.create(application)?;
        info!(
            owner_id = %created.owner_id,
            program_id = %created.program_id,
            status = %created.status,
            "Application tracked"
        );
        Ok(created)
    }

    /// Lists `owner_id`'s applications in creation order.
    pub fn list_applications(&self, owner_id: &str) -> EngineResult<Vec<ApplicationStatus>> {
        self.applications.list_for_owner(owner_id)
    }

    /// Fetches one of `owner_id`'s applications.
    pub fn get_application(&self, owner_id: &str, id: Uuid) -> EngineResult<ApplicationStatus> {
        self.applications.get(owner_id, id)
    }

    /// Changes one of `owner_id`'s applications.
    pub fn update_application(
        &self,
        owner_id: &str,
        id: Uuid,
        update: ApplicationUpdate,
    ) -> EngineResult<ApplicationStatus> {
        let updated = self.applications.update(owner_id, id, update)?;
        info!(
            owner_id,
            application_id = %id,
            status = %updated.status,
            "Application updated"
        );
        Ok(updated)
    }

    /// Stops tracking one of `owner_id`'s applications.
    pub fn delete_application(&self, owner_id: &str, id: Uuid) -> EngineResult<()> {
        self.applications.delete(owner_id, id)?;
        info!(owner_id, application_id = %id, "Application deleted");
        Ok(())
    }
}
