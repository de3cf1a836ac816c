//! Catalog queries.
//!
//! Listing and filtering are independent of eligibility evaluation. All
//! functions preserve the order of their input.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Program, ProgramCategory};

/// The filter value that matches every category.
pub const ALL_CATEGORIES: &str = "all";

/// A parsed category filter.
///
/// Parsing never fails: an unrecognised value becomes
/// [`CategoryFilter::Unrecognized`], which matches nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Identity filter (`"all"`).
    All,
    /// Exact match on one category.
    Only(ProgramCategory),
    /// A value that names no category.
    Unrecognized(String),
}

impl CategoryFilter {
    /// Parses a filter value. Matching is exact; there is no case folding.
    pub fn parse(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            return CategoryFilter::All;
        }
        match value.parse::<ProgramCategory>() {
            Ok(category) => CategoryFilter::Only(category),
            Err(_) => CategoryFilter::Unrecognized(value.to_string()),
        }
    }

    /// Returns true if `program` passes the filter.
    pub fn matches(&self, program: &Program) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => program.category == *category,
            CategoryFilter::Unrecognized(_) => false,
        }
    }
}

impl From<Option<&str>> for CategoryFilter {
    fn from(value: Option<&str>) -> Self {
        value.map_or(CategoryFilter::All, CategoryFilter::parse)
    }
}

/// Returns the active programs, in catalog order.
pub fn list_active(catalog: &[Program]) -> Vec<Program> {
    catalog.iter().filter(|p| p.is_active).cloned().collect()
}

/// Filters `programs` by category.
///
/// `"all"` returns every program; a known category returns exact matches; any
/// other value returns an empty list rather than an error.
///
/// # Example
///
/// ```
/// use benefits_engine::catalog::filter_by_category;
///
/// assert!(filter_by_category(&[], "all").is_empty());
/// assert!(filter_by_category(&[], "transport").is_empty());
/// ```
pub fn filter_by_category(programs: &[Program], category: &str) -> Vec<Program> {
    let filter = CategoryFilter::parse(category);
    programs
        .iter()
        .filter(|p| filter.matches(p))
        .cloned()
        .collect()
}

/// Summary figures about the catalog, check history and applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStatistics {
    /// Number of active programs.
    pub total_programs: usize,
    /// Number of stored eligibility checks.
    pub total_eligibility_checks: usize,
    /// Number of tracked applications.
    pub total_applications: usize,
    /// Active programs per category. Categories with no programs are omitted.
    pub program_type_distribution: BTreeMap<ProgramCategory, usize>,
}

impl CatalogStatistics {
    /// Computes statistics over the active programs of `catalog`.
    pub fn compute(
        catalog: &[Program],
        total_eligibility_checks: usize,
        total_applications: usize,
    ) -> Self {
        let mut program_type_distribution = BTreeMap::new();
        let mut total_programs = 0;
        for program in catalog.iter().filter(|p| p.is_active) {
            total_programs += 1;
            *program_type_distribution
                .entry(program.category)
                .or_insert(0) += 1;
        }
        Self {
            total_programs,
            total_eligibility_checks,
            total_applications,
            program_type_distribution,
        }
    }
}
