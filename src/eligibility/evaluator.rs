//! Eligibility evaluation.
//!
//! [`evaluate`] is a pure function of the profile and a catalog snapshot. It
//! reads no clock, generates no ids and performs no I/O, so identical inputs
//! always produce identical records.

use crate::error::EngineResult;
use crate::models::{ApplicantProfile, EligibilityCheckRecord, Program};

use super::criteria::{ProgramAssessment, assess_program, is_eligible};

/// Evaluates `profile` against every program in `catalog`.
///
/// The profile is validated first; an invalid profile fails with
/// `EngineError::Validation` and no program is evaluated. Matching programs
/// keep catalog order, and the record's total is the sum of their benefit
/// amounts truncated at the cent.
///
/// Fails with `EngineError::BenefitTotalOverflow` when the matched amounts
/// cannot be totalled at cent precision; catalogs that pass
/// [`Program::validate`] never do.
///
/// The returned record has no `id`, `owner_id` or `created_at`; those are
/// assigned when it is stored.
///
/// # Example
///
/// ```
/// use benefits_engine::eligibility::evaluate;
/// use benefits_engine::models::{ApplicantProfile, Program, ProgramCategory};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let profile = ApplicantProfile {
///     age: 20,
///     annual_income: Decimal::from_str("15000").unwrap(),
///     is_student: true,
///     is_citizen: true,
///     household_size: 1,
///     state: "Texas".to_string(),
/// };
/// let grant = Program {
///     id: "a".to_string(),
///     name: "Program A".to_string(),
///     description: String::new(),
///     category: ProgramCategory::Education,
///     max_benefit_amount: Some(Decimal::from_str("7395").unwrap()),
///     application_url: None,
///     min_age: Some(18),
///     max_age: None,
///     max_income: Some(Decimal::from_str("50000").unwrap()),
///     requires_enrollment: true,
///     requires_citizenship: false,
///     is_active: true,
/// };
///
/// let record = evaluate(profile, &[grant]).unwrap();
/// assert_eq!(record.eligible_count(), 1);
/// assert_eq!(record.total_potential_benefits().to_string(), "7395.00");
/// ```
pub fn evaluate(
    profile: ApplicantProfile,
    catalog: &[Program],
) -> EngineResult<EligibilityCheckRecord> {
    profile.validate()?;

    let eligible_programs: Vec<Program> = catalog
        .iter()
        .filter(|program| is_eligible(&profile, program))
        .cloned()
        .collect();

    EligibilityCheckRecord::new(profile, eligible_programs)
}

/// Assesses `profile` against every program in `catalog`, explaining each decision.
///
/// Inactive programs are included so the caller can see why they were excluded.
pub fn explain(
    profile: &ApplicantProfile,
    catalog: &[Program],
) -> EngineResult<Vec<ProgramAssessment>> {
    profile.validate()?;
    Ok(catalog
        .iter()
        .map(|program| assess_program(profile, program))
        .collect())
}
