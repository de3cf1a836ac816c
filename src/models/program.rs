//! Benefit program model and related types.
//!
//! This module defines the [`Program`] struct and the closed [`ProgramCategory`]
//! enumeration used to group programs in the catalog.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{CURRENCY_SCALE, MAX_CURRENCY_AMOUNT};

/// The kind of benefit a program provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramCategory {
    /// Grants, loans and other college funding.
    Education,
    /// Health coverage.
    Healthcare,
    /// Food assistance.
    Food,
    /// Housing assistance.
    Housing,
    /// Employment and work-study.
    Employment,
    /// Emergency and general financial aid.
    Financial,
}

impl ProgramCategory {
    /// Every category, in display order.
    pub const ALL: [ProgramCategory; 6] = [
        ProgramCategory::Education,
        ProgramCategory::Healthcare,
        ProgramCategory::Food,
        ProgramCategory::Housing,
        ProgramCategory::Employment,
        ProgramCategory::Financial,
    ];

    /// The wire name of the category (e.g. `"food"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgramCategory::Education => "education",
            ProgramCategory::Healthcare => "healthcare",
            ProgramCategory::Food => "food",
            ProgramCategory::Housing => "housing",
            ProgramCategory::Employment => "employment",
            ProgramCategory::Financial => "financial",
        }
    }

    /// The human-readable label (e.g. `"Food Assistance"`).
    pub fn label(&self) -> &'static str {
        match self {
            ProgramCategory::Education => "Education",
            ProgramCategory::Healthcare => "Healthcare",
            ProgramCategory::Food => "Food Assistance",
            ProgramCategory::Housing => "Housing",
            ProgramCategory::Employment => "Employment",
            ProgramCategory::Financial => "Financial Aid",
        }
    }
}

impl fmt::Display for ProgramCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`ProgramCategory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown program category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for ProgramCategory {
    type Err = UnknownCategory;

    /// Parses the exact wire name; no case folding or partial matches.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProgramCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A government benefit program and its eligibility criteria.
///
/// Absent optional criteria impose no restriction. Programs are read-only to
/// the evaluator; the catalog validates them with [`Program::validate`].
///
/// # Example
///
/// ```
/// use benefits_engine::models::{Program, ProgramCategory};
/// use rust_decimal::Decimal;
///
/// let program = Program {
///     id: "pell_grant".to_string(),
///     name: "Federal Pell Grant".to_string(),
///     description: "Need-based grants for undergraduates".to_string(),
///     category: ProgramCategory::Education,
///     max_benefit_amount: Some(Decimal::new(7395_00, 2)),
///     application_url: Some("https://studentaid.gov/h/apply-for-aid/fafsa".to_string()),
///     min_age: Some(16),
///     max_age: None,
///     max_income: Some(Decimal::new(60000_00, 2)),
///     requires_enrollment: true,
///     requires_citizenship: true,
///     is_active: true,
/// };
/// assert!(program.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Stable unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Display description.
    #[serde(default)]
    pub description: String,
    /// The category the program belongs to.
    #[serde(alias = "program_type")]
    pub category: ProgramCategory,
    /// The maximum benefit value, if known.
    #[serde(default)]
    pub max_benefit_amount: Option<Decimal>,
    /// Where to apply.
    #[serde(default)]
    pub application_url: Option<String>,
    /// Minimum applicant age (inclusive).
    #[serde(default)]
    pub min_age: Option<i32>,
    /// Maximum applicant age (inclusive).
    #[serde(default)]
    pub max_age: Option<i32>,
    /// Income ceiling (inclusive). Absent means no ceiling.
    #[serde(default)]
    pub max_income: Option<Decimal>,
    /// Applicant must be enrolled as a student.
    #[serde(default)]
    pub requires_enrollment: bool,
    /// Applicant must be a citizen or eligible non-citizen.
    #[serde(default)]
    pub requires_citizenship: bool,
    /// Inactive programs are never listed or matched.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Program {
    /// The benefit amount counted towards totals; absent amounts count as zero.
    pub fn benefit_value(&self) -> Decimal {
        self.max_benefit_amount.unwrap_or(Decimal::ZERO)
    }

    /// Checks the invariants of a program definition.
    ///
    /// Money amounts must be non-negative, carry at most two decimal places
    /// and not exceed [`MAX_CURRENCY_AMOUNT`].
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidProgram {
            program_id: self.id.clone(),
            message,
        };

        if self.id.trim().is_empty() {
            return Err(invalid("id must not be empty".to_string()));
        }
        if self.name.trim().is_empty() {
            return Err(invalid("name must not be empty".to_string()));
        }
        if let Some(min_age) = self.min_age {
            if min_age < 0 {
                return Err(invalid(format!("min_age {} is negative", min_age)));
            }
        }
        if let (Some(min_age), Some(max_age)) = (self.min_age, self.max_age) {
            if min_age > max_age {
                return Err(invalid(format!(
                    "min_age {} is greater than max_age {}",
                    min_age, max_age
                )));
            }
        }
        for (field, amount) in [
            ("max_income", self.max_income),
            ("max_benefit_amount", self.max_benefit_amount),
        ] {
            let Some(amount) = amount else { continue };
            if amount < Decimal::ZERO {
                return Err(invalid(format!("{} is negative", field)));
            }
            if amount.normalize().scale() > CURRENCY_SCALE {
                return Err(invalid(format!(
                    "{} {} has more than {} decimal places",
                    field, amount, CURRENCY_SCALE
                )));
            }
            if amount > MAX_CURRENCY_AMOUNT {
                return Err(invalid(format!(
                    "{} {} exceeds {}",
                    field, amount, MAX_CURRENCY_AMOUNT
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_program() -> Program {
        Program {
            id: "snap".to_string(),
            name: "SNAP (Food Stamps)".to_string(),
            description: "Food-purchasing assistance".to_string(),
            category: ProgramCategory::Food,
            max_benefit_amount: Some(Decimal::new(28100, 2)),
            application_url: Some("https://www.fns.usda.gov/snap/apply".to_string()),
            min_age: Some(18),
            max_age: None,
            max_income: Some(Decimal::new(2500000, 2)),
            requires_enrollment: false,
            requires_citizenship: true,
            is_active: true,
        }
    }

    #[test]
    fn test_category_serialization() {
        assert_eq!(
            serde_json::to_string(&ProgramCategory::Healthcare).unwrap(),
            "\"healthcare\""
        );
        assert_eq!(
            serde_json::to_string(&ProgramCategory::Financial).unwrap(),
            "\"financial\""
        );
    }

    #[test]
    fn test_category_from_str_is_exact() {
        assert_eq!("food".parse::<ProgramCategory>(), Ok(ProgramCategory::Food));
        assert!("Food".parse::<ProgramCategory>().is_err());
        assert!("foo".parse::<ProgramCategory>().is_err());
        assert!("".parse::<ProgramCategory>().is_err());
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(ProgramCategory::Food.label(), "Food Assistance");
        assert_eq!(ProgramCategory::Financial.label(), "Financial Aid");
        assert_eq!(ProgramCategory::Housing.to_string(), "housing");
    }

    #[test]
    fn test_deserialize_minimal_program_uses_defaults() {
        let json = r#"{
            "id": "housing_voucher",
            "name": "Housing Choice Voucher",
            "category": "housing"
        }"#;

        let program: Program = serde_json::from_str(json).unwrap();
        assert_eq!(program.category, ProgramCategory::Housing);
        assert!(program.is_active);
        assert!(!program.requires_enrollment);
        assert!(!program.requires_citizenship);
        assert_eq!(program.max_benefit_amount, None);
        assert_eq!(program.benefit_value(), Decimal::ZERO);
    }

    #[test]
    fn test_deserialize_accepts_program_type_alias() {
        let json = r#"{
            "id": "medicaid",
            "name": "Medicaid",
            "program_type": "healthcare",
            "max_benefit_amount": "8000.00"
        }"#;

        let program: Program = serde_json::from_str(json).unwrap();
        assert_eq!(program.category, ProgramCategory::Healthcare);
        assert_eq!(program.benefit_value(), Decimal::new(800000, 2));
    }

    #[test]
    fn test_valid_program_passes_validation() {
        assert!(create_test_program().validate().is_ok());
    }

    #[test]
    fn test_min_age_above_max_age_is_invalid() {
        let mut program = create_test_program();
        program.min_age = Some(60);
        program.max_age = Some(50);

        match program.validate() {
            Err(EngineError::InvalidProgram {
                program_id,
                message,
            }) => {
                assert_eq!(program_id, "snap");
                assert!(message.contains("min_age 60"));
            }
            other => panic!("Expected InvalidProgram error, got {other:?}"),
        }
    }

    #[test]
    fn test_equal_age_bounds_are_valid() {
        let mut program = create_test_program();
        program.min_age = Some(50);
        program.max_age = Some(50);
        assert!(program.validate().is_ok());
    }

    #[test]
    fn test_negative_amounts_are_invalid() {
        let mut program = create_test_program();
        program.max_income = Some(Decimal::new(-1, 0));
        assert!(program.validate().is_err());

        let mut program = create_test_program();
        program.max_benefit_amount = Some(Decimal::new(-1, 2));
        assert!(program.validate().is_err());
    }

    #[test]
    fn test_empty_name_is_invalid() {
        let mut program = create_test_program();
        program.name = String::new();
        assert!(program.validate().is_err());
    }

    #[test]
    fn test_amounts_above_currency_limit_are_invalid() {
        let mut program = create_test_program();
        program.max_benefit_amount = Some(Decimal::MAX);
        match program.validate() {
            Err(EngineError::InvalidProgram { message, .. }) => {
                assert!(message.starts_with("max_benefit_amount"));
                assert!(message.contains("exceeds 99999999.99"));
            }
            other => panic!("Expected InvalidProgram error, got {other:?}"),
        }

        let mut program = create_test_program();
        program.max_income = Some(Decimal::new(100_000_000_00, 2));
        assert!(program.validate().is_err());
    }

    #[test]
    fn test_amount_at_currency_limit_is_valid() {
        let mut program = create_test_program();
        program.max_benefit_amount = Some(MAX_CURRENCY_AMOUNT);
        program.max_income = Some(MAX_CURRENCY_AMOUNT);
        assert!(program.validate().is_ok());
    }

    #[test]
    fn test_sub_cent_amounts_are_invalid() {
        let mut program = create_test_program();
        program.max_benefit_amount = Some(Decimal::new(1005, 3));
        assert!(program.validate().is_err());

        // Trailing zeros beyond the cent are harmless
        program.max_benefit_amount = Some(Decimal::new(1000, 3));
        assert!(program.validate().is_ok());
    }
}
