//! Eligibility check record model.
//!
//! An [`EligibilityCheckRecord`] is the result of one evaluation: a snapshot of
//! the applicant profile, the matched programs and the derived benefit total.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

use super::{ApplicantProfile, Program};

/// Currency totals are carried to the cent.
pub const CURRENCY_SCALE: u32 = 2;

/// The largest single money amount accepted (10 digits, 2 after the point).
pub const MAX_CURRENCY_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// Sums the benefit value of `programs`, truncating toward zero at the cent.
///
/// Missing `max_benefit_amount` values count as zero. The result always has
/// scale 2, so `7395` is returned as `7395.00`. A sum that overflows, or that
/// is too large to carry two decimal places, fails with
/// `EngineError::BenefitTotalOverflow`.
///
/// # Example
///
/// ```
/// use benefits_engine::models::total_benefits;
///
/// assert_eq!(total_benefits(&[]).unwrap().to_string(), "0.00");
/// ```
pub fn total_benefits(programs: &[Program]) -> EngineResult<Decimal> {
    let overflow = || EngineError::BenefitTotalOverflow {
        programs: programs.len(),
    };

    let sum = programs
        .iter()
        .try_fold(Decimal::ZERO, |acc, program| {
            acc.checked_add(program.benefit_value())
        })
        .ok_or_else(overflow)?;

    let mut total = sum.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::ToZero);
    total.rescale(CURRENCY_SCALE);
    // rescale keeps a smaller scale when the mantissa cannot hold two places
    if total.scale() != CURRENCY_SCALE {
        return Err(overflow());
    }
    Ok(total)
}

/// The persisted result of one eligibility evaluation.
///
/// The profile is embedded by value, so later profile or catalog edits never
/// alter a stored record. `total_potential_benefits` is derived from
/// `eligible_programs` at construction and is never set independently;
/// deserializing a record whose total disagrees with its programs fails.
///
/// `id`, `owner_id` and `created_at` are empty on a freshly evaluated record;
/// the check store assigns `id` and `created_at` when the record is saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredCheckRecord")]
pub struct EligibilityCheckRecord {
    /// Identifier assigned by the store.
    pub id: Option<Uuid>,
    /// The owner the check was run for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    /// Snapshot of the profile at the time of the check.
    #[serde(flatten)]
    pub profile: ApplicantProfile,
    /// Matching programs, in catalog order.
    eligible_programs: Vec<Program>,
    /// Sum of the matching programs' benefit amounts.
    total_potential_benefits: Decimal,
    /// When the record was stored.
    pub created_at: Option<DateTime<Utc>>,
}

/// Wire shape of a record read back from storage, checked before use.
#[derive(Deserialize)]
struct StoredCheckRecord {
    id: Option<Uuid>,
    #[serde(default)]
    owner_id: Option<String>,
    #[serde(flatten)]
    profile: ApplicantProfile,
    eligible_programs: Vec<Program>,
    total_potential_benefits: Decimal,
    created_at: Option<DateTime<Utc>>,
}

impl TryFrom<StoredCheckRecord> for EligibilityCheckRecord {
    type Error = String;

    fn try_from(stored: StoredCheckRecord) -> Result<Self, Self::Error> {
        let record = EligibilityCheckRecord::new(stored.profile, stored.eligible_programs)
            .map_err(|err| err.to_string())?;
        if record.total_potential_benefits != stored.total_potential_benefits {
            return Err(format!(
                "total_potential_benefits {} does not match eligible programs total {}",
                stored.total_potential_benefits, record.total_potential_benefits
            ));
        }
        Ok(Self {
            id: stored.id,
            owner_id: stored.owner_id,
            created_at: stored.created_at,
            ..record
        })
    }
}

impl EligibilityCheckRecord {
    /// Builds an unsaved record, deriving the benefit total from `eligible_programs`.
    pub fn new(profile: ApplicantProfile, eligible_programs: Vec<Program>) -> EngineResult<Self> {
        let total_potential_benefits = total_benefits(&eligible_programs)?;
        Ok(Self {
            id: None,
            owner_id: None,
            profile,
            eligible_programs,
            total_potential_benefits,
            created_at: None,
        })
    }

    /// Attaches the owner the check was run for.
    pub fn with_owner(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }

    /// The programs the applicant matched, in catalog order.
    pub fn eligible_programs(&self) -> &[Program] {
        &self.eligible_programs
    }

    /// The total potential benefit value of the matched programs.
    pub fn total_potential_benefits(&self) -> Decimal {
        self.total_potential_benefits
    }

    /// Number of matched programs.
    pub fn eligible_count(&self) -> usize {
        self.eligible_programs.len()
    }

    /// Returns true once the record has been stored.
    pub fn is_saved(&self) -> bool {
        self.id.is_some() && self.created_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProgramCategory;
    use chrono::TimeZone;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_program(id: &str, amount: Option<&str>) -> Program {
        Program {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            category: ProgramCategory::Education,
            max_benefit_amount: amount.map(dec),
            application_url: None,
            min_age: None,
            max_age: None,
            max_income: None,
            requires_enrollment: false,
            requires_citizenship: false,
            is_active: true,
        }
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

    #[test]
    fn test_total_benefits_sums_amounts() {
        let programs = vec![
            create_program("a", Some("7395.00")),
            create_program("b", Some("281.00")),
        ];
        assert_eq!(total_benefits(&programs).unwrap(), dec("7676.00"));
    }

    #[test]
    fn test_total_benefits_treats_missing_amount_as_zero() {
        let programs = vec![create_program("a", Some("150.00")), create_program("b", None)];
        assert_eq!(total_benefits(&programs).unwrap(), dec("150.00"));
    }

    #[test]
    fn test_total_benefits_is_scaled_to_cents() {
        let programs = vec![create_program("a", Some("7395"))];
        assert_eq!(total_benefits(&programs).unwrap().to_string(), "7395.00");
        assert_eq!(total_benefits(&[]).unwrap().to_string(), "0.00");
    }

    #[test]
    fn test_total_benefits_truncates_sub_cent_amounts() {
        let programs = vec![
            create_program("a", Some("0.005")),
            create_program("b", Some("0.009")),
        ];
        // 0.014 truncates to 0.01, it is never rounded up.
        assert_eq!(total_benefits(&programs).unwrap().to_string(), "0.01");
    }

    #[test]
    fn test_total_benefits_has_no_float_drift() {
        let programs: Vec<Program> = (0..10)
            .map(|i| create_program(&format!("p{i}"), Some("0.10")))
            .collect();
        assert_eq!(total_benefits(&programs).unwrap(), dec("1.00"));
    }

    #[test]
    fn test_new_record_derives_total_and_is_unsaved() {
        let record = EligibilityCheckRecord::new(
            create_profile(),
            vec![create_program("a", Some("7395.00"))],
        )
        .unwrap();
        assert_eq!(record.total_potential_benefits(), dec("7395.00"));
        assert_eq!(record.eligible_count(), 1);
        assert!(record.id.is_none());
        assert!(record.created_at.is_none());
        assert!(!record.is_saved());
    }

    #[test]
    fn test_with_owner_sets_owner() {
        let record = EligibilityCheckRecord::new(create_profile(), vec![])
            .unwrap()
            .with_owner("user_1");
        assert_eq!(record.owner_id.as_deref(), Some("user_1"));
    }

    #[test]
    fn test_serialized_record_embeds_profile_fields() {
        let mut record = EligibilityCheckRecord::new(
            create_profile(),
            vec![create_program("a", Some("7395.00"))],
        )
        .unwrap();
        record.id = Some(Uuid::nil());
        record.created_at = Some(Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["age"], 20);
        assert_eq!(json["state"], "Texas");
        assert_eq!(json["annual_income"], "15000.00");
        assert_eq!(json["total_potential_benefits"], "7395.00");
        assert_eq!(json["eligible_programs"][0]["id"], "a");
        assert!(json.get("owner_id").is_none());

        let restored: EligibilityCheckRecord = serde_json::from_value(json).unwrap();
        assert_eq!(restored, record);
    }

    #[test]
    fn test_record_snapshot_is_independent_of_later_profile_edits() {
        let mut profile = create_profile();
        let record = EligibilityCheckRecord::new(profile.clone(), vec![]).unwrap();
        profile.age = 90;
        assert_eq!(record.profile.age, 20);
    }

    #[test]
    fn test_total_benefits_overflow_is_an_error() {
        let programs = vec![
            create_program("a", Some("79228162514264337593543950335")),
            create_program("b", Some("79228162514264337593543950335")),
        ];
        match total_benefits(&programs) {
            Err(EngineError::BenefitTotalOverflow { programs }) => assert_eq!(programs, 2),
            other => panic!("Expected BenefitTotalOverflow, got {other:?}"),
        }
    }

    #[test]
    fn test_total_benefits_too_large_for_cents_is_an_error() {
        let programs = vec![create_program("a", Some("79228162514264337593543950335"))];
        assert!(matches!(
            total_benefits(&programs),
            Err(EngineError::BenefitTotalOverflow { programs: 1 })
        ));
    }

    #[test]
    fn test_total_benefits_at_catalog_limit_keeps_cents() {
        let programs: Vec<Program> = (0..1000)
            .map(|i| create_program(&format!("p{i}"), Some("99999999.99")))
            .collect();
        let total = total_benefits(&programs).unwrap();
        assert_eq!(total, dec("99999999990.00"));
        assert_eq!(total.scale(), CURRENCY_SCALE);
    }

    #[test]
    fn test_deserialize_rejects_total_that_disagrees_with_programs() {
        let record = EligibilityCheckRecord::new(
            create_profile(),
            vec![create_program("a", Some("7395.00"))],
        )
        .unwrap();
        let mut json = serde_json::to_value(&record).unwrap();
        json["total_potential_benefits"] = serde_json::json!("1000000.00");

        let error = serde_json::from_value::<EligibilityCheckRecord>(json).unwrap_err();
        assert!(error.to_string().contains("does not match"));
    }

    #[test]
    fn test_deserialize_normalizes_total_scale() {
        let record = EligibilityCheckRecord::new(
            create_profile(),
            vec![create_program("a", Some("7395"))],
        )
        .unwrap();
        let mut json = serde_json::to_value(&record).unwrap();
        json["total_potential_benefits"] = serde_json::json!("7395");

        let restored: EligibilityCheckRecord = serde_json::from_value(json).unwrap();
        assert_eq!(restored.total_potential_benefits().to_string(), "7395.00");
    }
}
