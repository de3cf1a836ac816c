//! Eligibility determination.
//!
//! This module decides which programs an applicant qualifies for. A program
//! matches when it is active and the applicant satisfies each of its age,
//! income, enrollment and citizenship criteria; the matched programs and their
//! summed benefit value form an eligibility check record.

mod criteria;
mod evaluator;

pub use criteria::{Criterion, CriterionCheck, ProgramAssessment, assess_program, is_eligible};
pub use evaluator::{evaluate, explain};
