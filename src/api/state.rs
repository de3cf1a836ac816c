//! Application state for the eligibility API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::service::EligibilityService;

/// Shared application state.
///
/// Holds the eligibility service, which in turn owns the catalog source and
/// the check store.
#[derive(Clone)]
pub struct AppState {
    service: Arc<EligibilityService>,
}

impl AppState {
    /// Creates a new application state around the given service.
    pub fn new(service: EligibilityService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Returns a reference to the eligibility service.
    pub fn service(&self) -> &EligibilityService {
        &self.service
    }

    /// Returns a shared handle to the service, for work moved off the async runtime.
    pub fn shared_service(&self) -> Arc<EligibilityService> {
        Arc::clone(&self.service)
    }
}
