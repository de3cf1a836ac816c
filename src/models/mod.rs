//! Core data models for the benefits eligibility engine.
//!
//! This module contains the applicant profile, the benefit program definition,
//! the eligibility check record produced by each evaluation and the
//! application status records owners use to track their applications.

mod application;
mod eligibility_check;
mod profile;
mod program;

pub use application::{ApplicationState, ApplicationStatus, ApplicationUpdate};
pub use eligibility_check::{
    CURRENCY_SCALE, EligibilityCheckRecord, MAX_CURRENCY_AMOUNT, total_benefits,
};
pub use profile::{
    ApplicantProfile, INCOME_DECIMAL_PLACES, MAX_ANNUAL_INCOME, MAX_APPLICANT_AGE,
    MAX_HOUSEHOLD_SIZE, MIN_APPLICANT_AGE, MIN_HOUSEHOLD_SIZE, US_STATES, is_us_state,
};
pub use program::{Program, ProgramCategory, UnknownCategory};
