//! Per-program eligibility criteria.
//!
//! A program matches a profile iff none of the six criteria below fails.
//! A criterion that the program does not specify is not applicable and
//! imposes no restriction. All bounds are inclusive.

use serde::{Deserialize, Serialize};

use crate::models::{ApplicantProfile, Program};

/// One clause of the eligibility predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    /// The program is active.
    Active,
    /// `age >= min_age`, when `min_age` is set.
    MinimumAge,
    /// `age <= max_age`, when `max_age` is set.
    MaximumAge,
    /// `annual_income <= max_income`, when `max_income` is set.
    IncomeCeiling,
    /// The applicant is a student, when the program requires enrollment.
    Enrollment,
    /// The applicant is a citizen or eligible non-citizen, when required.
    Citizenship,
}

impl Criterion {
    /// Every criterion, in evaluation order.
    pub const ALL: [Criterion; 6] = [
        Criterion::Active,
        Criterion::MinimumAge,
        Criterion::MaximumAge,
        Criterion::IncomeCeiling,
        Criterion::Enrollment,
        Criterion::Citizenship,
    ];

    /// Checks this criterion.
    ///
    /// Returns `None` when the program does not impose it, otherwise whether
    /// the profile satisfies it.
    pub fn check(&self, profile: &ApplicantProfile, program: &Program) -> Option<bool> {
        match self {
            Criterion::Active => Some(program.is_active),
            Criterion::MinimumAge => program.min_age.map(|min| profile.age >= min),
            Criterion::MaximumAge => program.max_age.map(|max| profile.age <= max),
            Criterion::IncomeCeiling => program
                .max_income
                .map(|ceiling| profile.annual_income <= ceiling),
            Criterion::Enrollment => program.requires_enrollment.then_some(profile.is_student),
            Criterion::Citizenship => program.requires_citizenship.then_some(profile.is_citizen),
        }
    }

    /// Explains the outcome of an applicable criterion.
    fn reasoning(&self, profile: &ApplicantProfile, program: &Program, passed: bool) -> String {
        match self {
            Criterion::Active if passed => "Program is active".to_string(),
            Criterion::Active => "Program is inactive".to_string(),
            Criterion::MinimumAge => {
                let min = program.min_age.unwrap_or_default();
                let op = if passed { ">=" } else { "<" };
                format!("Age {} {} minimum age {}", profile.age, op, min)
            }
            Criterion::MaximumAge => {
                let max = program.max_age.unwrap_or_default();
                let op = if passed { "<=" } else { ">" };
                format!("Age {} {} maximum age {}", profile.age, op, max)
            }
            Criterion::IncomeCeiling => {
                let ceiling = program.max_income.unwrap_or_default();
                let op = if passed { "<=" } else { ">" };
                format!(
                    "Income ${} {} ceiling ${}",
                    profile.annual_income, op, ceiling
                )
            }
            Criterion::Enrollment if passed => "Applicant is enrolled as a student".to_string(),
            Criterion::Enrollment => "Program requires student enrollment".to_string(),
            Criterion::Citizenship if passed => {
                "Applicant is a citizen or eligible non-citizen".to_string()
            }
            Criterion::Citizenship => {
                "Program requires citizenship or eligible non-citizen status".to_string()
            }
        }
    }
}

/// Returns true iff every applicable criterion holds.
///
/// # Example
///
/// ```
/// use benefits_engine::eligibility::is_eligible;
/// use benefits_engine::models::{ApplicantProfile, Program, ProgramCategory};
/// use rust_decimal::Decimal;
///
/// let profile = ApplicantProfile {
///     age: 20,
///     annual_income: Decimal::new(15000, 0),
///     is_student: false,
///     is_citizen: true,
///     household_size: 1,
///     state: "Texas".to_string(),
/// };
/// let mut program = Program {
///     id: "teach".to_string(),
///     name: "TEACH Grant".to_string(),
///     description: String::new(),
///     category: ProgramCategory::Education,
///     max_benefit_amount: None,
///     application_url: None,
///     min_age: Some(18),
///     max_age: None,
///     max_income: None,
///     requires_enrollment: true,
///     requires_citizenship: true,
///     is_active: true,
/// };
/// assert!(!is_eligible(&profile, &program));
/// program.requires_enrollment = false;
/// assert!(is_eligible(&profile, &program));
/// ```
pub fn is_eligible(profile: &ApplicantProfile, program: &Program) -> bool {
    Criterion::ALL
        .iter()
        .all(|criterion| criterion.check(profile, program) != Some(false))
}

/// The outcome of one applicable criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionCheck {
    /// The criterion that was checked.
    pub criterion: Criterion,
    /// Whether the profile satisfied it.
    pub passed: bool,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// Why a profile does or does not match one program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramAssessment {
    /// The program that was assessed.
    pub program_id: String,
    /// The program's display name.
    pub program_name: String,
    /// True iff no applicable criterion failed.
    pub eligible: bool,
    /// Every applicable criterion, in evaluation order.
    pub checks: Vec<CriterionCheck>,
}

impl ProgramAssessment {
    /// The criteria that failed.
    pub fn failed(&self) -> impl Iterator<Item = &CriterionCheck> {
        self.checks.iter().filter(|check| !check.passed)
    }
}

/// Assesses one program, recording every applicable criterion.
pub fn assess_program(profile: &ApplicantProfile, program: &Program) -> ProgramAssessment {
    let checks: Vec<CriterionCheck> = Criterion::ALL
        .iter()
        .filter_map(|criterion| {
            criterion
                .check(profile, program)
                .map(|passed| CriterionCheck {
                    criterion: *criterion,
                    passed,
                    reasoning: criterion.reasoning(profile, program, passed),
                })
        })
        .collect();

    ProgramAssessment {
        program_id: program.id.clone(),
        program_name: program.name.clone(),
        eligible: checks.iter().all(|check| check.passed),
        checks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProgramCategory;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_profile() -> ApplicantProfile {
        ApplicantProfile {
            age: 20,
            annual_income: dec("15000.00"),
            is_student: true,
            is_citizen: true,
            household_size: 1,
            state: "Texas".to_string(),
        }
    }

    fn unrestricted_program() -> Program {
        Program {
            id: "open".to_string(),
            name: "Open Program".to_string(),
            description: String::new(),
            category: ProgramCategory::Financial,
            max_benefit_amount: None,
            application_url: None,
            min_age: None,
            max_age: None,
            max_income: None,
            requires_enrollment: false,
            requires_citizenship: false,
            is_active: true,
        }
    }

    #[test]
    fn test_unrestricted_program_matches_any_profile() {
        let mut profile = create_profile();
        profile.is_student = false;
        profile.is_citizen = false;
        profile.annual_income = dec("99999999.99");
        profile.age = 100;
        assert!(is_eligible(&profile, &unrestricted_program()));
    }

    #[test]
    fn test_unrestricted_program_only_checks_active() {
        let assessment = assess_program(&create_profile(), &unrestricted_program());
        assert!(assessment.eligible);
        assert_eq!(assessment.checks.len(), 1);
        assert_eq!(assessment.checks[0].criterion, Criterion::Active);
    }

    #[test]
    fn test_inactive_program_never_matches() {
        let mut program = unrestricted_program();
        program.is_active = false;
        assert!(!is_eligible(&create_profile(), &program));
    }

    #[test]
    fn test_min_age_is_inclusive() {
        let mut program = unrestricted_program();
        program.min_age = Some(20);
        assert!(is_eligible(&create_profile(), &program));
        program.min_age = Some(21);
        assert!(!is_eligible(&create_profile(), &program));
    }

    #[test]
    fn test_max_age_is_inclusive() {
        let mut program = unrestricted_program();
        program.max_age = Some(20);
        assert!(is_eligible(&create_profile(), &program));
        program.max_age = Some(19);
        assert!(!is_eligible(&create_profile(), &program));
    }

    #[test]
    fn test_zero_max_age_still_applies() {
        let mut program = unrestricted_program();
        program.max_age = Some(0);
        assert!(!is_eligible(&create_profile(), &program));
    }

    #[test]
    fn test_income_ceiling_is_inclusive() {
        let mut program = unrestricted_program();
        program.max_income = Some(dec("15000.00"));
        assert!(is_eligible(&create_profile(), &program));
        program.max_income = Some(dec("14999.99"));
        assert!(!is_eligible(&create_profile(), &program));
    }

    #[test]
    fn test_zero_income_ceiling_admits_zero_income_only() {
        let mut program = unrestricted_program();
        program.max_income = Some(Decimal::ZERO);
        let mut profile = create_profile();
        assert!(!is_eligible(&profile, &program));
        profile.annual_income = Decimal::ZERO;
        assert!(is_eligible(&profile, &program));
    }

    #[test]
    fn test_enrollment_requirement() {
        let mut program = unrestricted_program();
        program.requires_enrollment = true;
        let mut profile = create_profile();
        assert!(is_eligible(&profile, &program));
        profile.is_student = false;
        assert!(!is_eligible(&profile, &program));
    }

    #[test]
    fn test_citizenship_requirement() {
        let mut program = unrestricted_program();
        program.requires_citizenship = true;
        let mut profile = create_profile();
        assert!(is_eligible(&profile, &program));
        profile.is_citizen = false;
        assert!(!is_eligible(&profile, &program));
    }

    #[test]
    fn test_state_is_not_a_criterion() {
        let mut profile = create_profile();
        profile.state = "Alaska".to_string();
        assert!(is_eligible(&profile, &unrestricted_program()));
    }

    #[test]
    fn test_assessment_reports_every_failure_with_reasoning() {
        let program = Program {
            min_age: Some(25),
            max_income: Some(dec("10000.00")),
            requires_citizenship: true,
            ..unrestricted_program()
        };
        let mut profile = create_profile();
        profile.is_citizen = false;

        let assessment = assess_program(&profile, &program);
        assert!(!assessment.eligible);

        let failed: Vec<Criterion> = assessment.failed().map(|c| c.criterion).collect();
        assert_eq!(
            failed,
            vec![
                Criterion::MinimumAge,
                Criterion::IncomeCeiling,
                Criterion::Citizenship
            ]
        );

        let reasons: Vec<&str> = assessment.failed().map(|c| c.reasoning.as_str()).collect();
        assert_eq!(reasons[0], "Age 20 < minimum age 25");
        assert_eq!(reasons[1], "Income $15000.00 > ceiling $10000.00");
        assert!(reasons[2].contains("requires citizenship"));
    }

    #[test]
    fn test_assessment_agrees_with_is_eligible() {
        let program = Program {
            min_age: Some(18),
            max_age: Some(20),
            max_income: Some(dec("15000.00")),
            requires_enrollment: true,
            requires_citizenship: true,
            ..unrestricted_program()
        };
        let assessment = assess_program(&create_profile(), &program);
        assert!(assessment.eligible);
        assert_eq!(assessment.eligible, is_eligible(&create_profile(), &program));
        assert_eq!(assessment.checks.len(), 6);
        assert_eq!(assessment.checks[1].reasoning, "Age 20 >= minimum age 18");
        assert_eq!(assessment.checks[2].reasoning, "Age 20 <= maximum age 20");
    }

    #[test]
    fn test_criterion_serialization() {
        assert_eq!(
            serde_json::to_string(&Criterion::IncomeCeiling).unwrap(),
            "\"income_ceiling\""
        );
    }
}
