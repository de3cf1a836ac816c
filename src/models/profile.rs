//! Applicant profile model.
//!
//! This module defines the [`ApplicantProfile`] submitted for each eligibility
//! check, along with the domain limits applied when validating it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult, FieldViolation};

use super::MAX_CURRENCY_AMOUNT;

/// The youngest applicant age accepted.
pub const MIN_APPLICANT_AGE: i32 = 16;

/// The oldest applicant age accepted.
pub const MAX_APPLICANT_AGE: i32 = 100;

/// The smallest household size accepted.
pub const MIN_HOUSEHOLD_SIZE: i32 = 1;

/// The largest household size accepted.
pub const MAX_HOUSEHOLD_SIZE: i32 = 20;

/// Income is recorded to the cent.
pub const INCOME_DECIMAL_PLACES: u32 = 2;

/// The largest annual income accepted.
pub const MAX_ANNUAL_INCOME: Decimal = MAX_CURRENCY_AMOUNT;

/// The states an applicant may report, matched exactly.
pub const US_STATES: [&str; 50] = [
    "Alabama",
    "Alaska",
    "Arizona",
    "Arkansas",
    "California",
    "Colorado",
    "Connecticut",
    "Delaware",
    "Florida",
    "Georgia",
    "Hawaii",
    "Idaho",
    "Illinois",
    "Indiana",
    "Iowa",
    "Kansas",
    "Kentucky",
    "Louisiana",
    "Maine",
    "Maryland",
    "Massachusetts",
    "Michigan",
    "Minnesota",
    "Mississippi",
    "Missouri",
    "Montana",
    "Nebraska",
    "Nevada",
    "New Hampshire",
    "New Jersey",
    "New Mexico",
    "New York",
    "North Carolina",
    "North Dakota",
    "Ohio",
    "Oklahoma",
    "Oregon",
    "Pennsylvania",
    "Rhode Island",
    "South Carolina",
    "South Dakota",
    "Tennessee",
    "Texas",
    "Utah",
    "Vermont",
    "Virginia",
    "Washington",
    "West Virginia",
    "Wisconsin",
    "Wyoming",
];

/// Returns true if `state` is one of the recognised US state names.
pub fn is_us_state(state: &str) -> bool {
    US_STATES.contains(&state)
}

/// The attributes describing the person being evaluated for benefits.
///
/// Profiles are transient: they are only persisted as the snapshot embedded
/// in an [`EligibilityCheckRecord`](super::EligibilityCheckRecord).
///
/// # Example
///
/// ```
/// use benefits_engine::models::ApplicantProfile;
/// use rust_decimal::Decimal;
///
/// let profile = ApplicantProfile {
///     age: 20,
///     annual_income: Decimal::new(15_000_00, 2),
///     is_student: true,
///     is_citizen: true,
///     household_size: 1,
///     state: "Texas".to_string(),
/// };
/// assert!(profile.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    /// Age in whole years.
    pub age: i32,
    /// Annual income in dollars.
    pub annual_income: Decimal,
    /// Whether the applicant is enrolled as a student.
    pub is_student: bool,
    /// Whether the applicant is a citizen or an eligible non-citizen.
    #[serde(alias = "is_citizen_or_eligible_non_citizen")]
    pub is_citizen: bool,
    /// Number of people in the household.
    pub household_size: i32,
    /// US state of residence. Informational only; no program restricts by state.
    pub state: String,
}

impl ApplicantProfile {
    /// Checks every field against its domain constraints.
    ///
    /// All fields are checked; the returned error lists each offending field
    /// rather than stopping at the first. Values are never coerced.
    pub fn validate(&self) -> EngineResult<()> {
        let mut violations = Vec::new();

        if !(MIN_APPLICANT_AGE..=MAX_APPLICANT_AGE).contains(&self.age) {
            violations.push(FieldViolation::new(
                "age",
                format!(
                    "must be between {} and {}, got {}",
                    MIN_APPLICANT_AGE, MAX_APPLICANT_AGE, self.age
                ),
            ));
        }

        if self.annual_income < Decimal::ZERO {
            violations.push(FieldViolation::new(
                "annual_income",
                format!("must not be negative, got {}", self.annual_income),
            ));
        } else if self.annual_income.normalize().scale() > INCOME_DECIMAL_PLACES {
            violations.push(FieldViolation::new(
                "annual_income",
                format!(
                    "must have at most {} decimal places, got {}",
                    INCOME_DECIMAL_PLACES, self.annual_income
                ),
            ));
        } else if self.annual_income > MAX_ANNUAL_INCOME {
            violations.push(FieldViolation::new(
                "annual_income",
                format!("must not exceed {}", MAX_ANNUAL_INCOME),
            ));
        }

        if !(MIN_HOUSEHOLD_SIZE..=MAX_HOUSEHOLD_SIZE).contains(&self.household_size) {
            violations.push(FieldViolation::new(
                "household_size",
                format!(
                    "must be between {} and {}, got {}",
                    MIN_HOUSEHOLD_SIZE, MAX_HOUSEHOLD_SIZE, self.household_size
                ),
            ));
        }

        if self.state.trim().is_empty() {
            violations.push(FieldViolation::new("state", "must not be empty"));
        } else if !is_us_state(&self.state) {
            violations.push(FieldViolation::new(
                "state",
                format!("'{}' is not a recognised US state", self.state),
            ));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(EngineError::Validation { violations })
        }
    }
}
