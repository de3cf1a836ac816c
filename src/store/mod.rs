//! Eligibility check and application persistence.
//!
//! The engine does not own storage. It hands finished records to a
//! [`CheckStore`], which stamps `id` and `created_at` and serves history
//! listings per owner. Application tracking goes through an
//! [`ApplicationStatusStore`].

mod applications;
mod memory;

pub use applications::InMemoryApplicationStore;
pub use memory::InMemoryCheckStore;

use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{ApplicationStatus, ApplicationUpdate, EligibilityCheckRecord};

/// Storage for eligibility check records.
pub trait CheckStore: Send + Sync {
    /// Stores `record`, assigning `id` and `created_at` when they are unset.
    ///
    /// Values already present are kept. Returns the stored record.
    fn save(&self, record: EligibilityCheckRecord) -> EngineResult<EligibilityCheckRecord>;

    /// Lists the records stored for `owner_id`, newest first.
    fn list_for_owner(&self, owner_id: &str) -> EngineResult<Vec<EligibilityCheckRecord>>;

    /// Number of stored records across all owners.
    fn count(&self) -> EngineResult<usize>;
}

/// Storage for application status records, scoped by owner.
///
/// Every lookup names the owner; a record owned by someone else is reported
/// as `EngineError::NotFound`, the same as a missing one.
pub trait ApplicationStatusStore: Send + Sync {
    /// Stores a new application, assigning `id`, `created_at` and `updated_at`.
    ///
    /// Fails with `EngineError::Conflict` if the owner already tracks the program.
    fn create(&self, application: ApplicationStatus) -> EngineResult<ApplicationStatus>;

    /// Lists the owner's applications in creation order.
    fn list_for_owner(&self, owner_id: &str) -> EngineResult<Vec<ApplicationStatus>>;

    /// Fetches one of the owner's applications.
    fn get(&self, owner_id: &str, id: Uuid) -> EngineResult<ApplicationStatus>;

    /// Applies `update` and refreshes `updated_at`.
    fn update(
        &self,
        owner_id: &str,
        id: Uuid,
        update: ApplicationUpdate,
    ) -> EngineResult<ApplicationStatus>;

    /// Removes one of the owner's applications.
    fn delete(&self, owner_id: &str, id: Uuid) -> EngineResult<()>;

    /// Number of stored applications across all owners.
    fn count(&self) -> EngineResult<usize>;
}
