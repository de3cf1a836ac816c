//! HTTP API module for the benefits eligibility engine.
//!
//! This module provides the REST endpoints for checking eligibility, listing
//! programs, reading check history, tracking applications and catalog
//! statistics.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    EligibilityRequest, ExplainRequest, NewApplicationRequest, OwnerQuery, ProgramsQuery,
    UpdateApplicationRequest,
};
pub use response::{ApiError, ApiErrorResponse, EligibilityResponse};
pub use state::AppState;
