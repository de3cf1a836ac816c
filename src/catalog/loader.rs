//! Catalog loading functionality.
//!
//! This module provides the [`CatalogLoader`] type for loading program
//! catalogs from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::Program;

/// Catalog file structure.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    programs: Vec<Program>,
}

/// Loads program catalogs from YAML.
///
/// The catalog file holds a single `programs` list. Programs keep the order in
/// which they appear in the file; that order is the catalog iteration order
/// used by evaluation and listing.
///
/// ```text
/// programs:
///   - id: pell_grant
///     name: Federal Pell Grant
///     category: education
///     max_benefit_amount: "7395.00"
///     min_age: 16
///     max_income: "60000.00"
///     requires_enrollment: true
///     requires_citizenship: true
/// ```
///
/// # Example
///
/// ```no_run
/// use benefits_engine::catalog::CatalogLoader;
///
/// let programs = CatalogLoader::load("./config/catalog/programs.yaml").unwrap();
/// println!("Loaded {} programs", programs.len());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogLoader;

impl CatalogLoader {
    /// Loads and validates the catalog at `path`.
    ///
    /// # Returns
    ///
    /// Returns the programs on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML or unknown categories (`ConfigParseError`)
    /// - A program breaks an invariant or ids repeat (`InvalidProgram`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Vec<Program>> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content, &path_str)
    }

    /// Parses and validates a catalog from YAML text.
    ///
    /// `origin` names the source in error messages.
    pub fn from_yaml_str(content: &str, origin: &str) -> EngineResult<Vec<Program>> {
        let file: CatalogFile =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;

        Self::validate_programs(&file.programs)?;
        Ok(file.programs)
    }

    /// Validates each program and rejects duplicate ids.
    pub fn validate_programs(programs: &[Program]) -> EngineResult<()> {
        let mut seen = HashSet::with_capacity(programs.len());
        for program in programs {
            program.validate()?;
            if !seen.insert(program.id.as_str()) {
                return Err(EngineError::InvalidProgram {
                    program_id: program.id.clone(),
                    message: "duplicate program id".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProgramCategory;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn catalog_path() -> &'static str {
        "./config/catalog/programs.yaml"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_seed_catalog() {
        let result = CatalogLoader::load(catalog_path());
        assert!(result.is_ok(), "Failed to load catalog: {:?}", result.err());

        let programs = result.unwrap();
        assert_eq!(programs.len(), 10);
        assert_eq!(programs[0].id, "pell_grant");
        assert_eq!(programs[0].name, "Federal Pell Grant");
        assert_eq!(programs[0].max_benefit_amount, Some(dec("7395.00")));
    }

    #[test]
    fn test_seed_catalog_preserves_file_order() {
        let programs = CatalogLoader::load(catalog_path()).unwrap();
        let ids: Vec<&str> = programs.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "pell_grant",
                "direct_subsidized_loans",
                "federal_work_study",
                "snap",
                "medicaid",
                "fseog",
                "teach_grant",
                "state_university_grant",
                "wic",
                "emergency_financial_aid",
            ]
        );
    }

    #[test]
    fn test_seed_catalog_wic_has_age_window() {
        let programs = CatalogLoader::load(catalog_path()).unwrap();
        let wic = programs.iter().find(|p| p.id == "wic").unwrap();
        assert_eq!(wic.category, ProgramCategory::Food);
        assert_eq!(wic.min_age, Some(16));
        assert_eq!(wic.max_age, Some(50));
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        let result = CatalogLoader::load("/nonexistent/programs.yaml");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("programs.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let result = CatalogLoader::from_yaml_str("programs: [", "inline");

        match result {
            Err(EngineError::ConfigParseError { path, .. }) => assert_eq!(path, "inline"),
            other => panic!("Expected ConfigParseError, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_category_returns_parse_error() {
        let yaml = r#"
programs:
  - id: transit
    name: Transit Pass
    category: transport
"#;
        let result = CatalogLoader::from_yaml_str(yaml, "inline");
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let yaml = r#"
programs:
  - id: snap
    name: SNAP
    category: food
  - id: snap
    name: SNAP again
    category: food
"#;
        match CatalogLoader::from_yaml_str(yaml, "inline") {
            Err(EngineError::InvalidProgram {
                program_id,
                message,
            }) => {
                assert_eq!(program_id, "snap");
                assert_eq!(message, "duplicate program id");
            }
            other => panic!("Expected InvalidProgram error, got {other:?}"),
        }
    }

    #[test]
    fn test_inverted_age_bounds_are_rejected() {
        let yaml = r#"
programs:
  - id: wic
    name: WIC
    category: food
    min_age: 51
    max_age: 50
"#;
        assert!(matches!(
            CatalogLoader::from_yaml_str(yaml, "inline"),
            Err(EngineError::InvalidProgram { .. })
        ));
    }

    #[test]
    fn test_decimal_strings_keep_cents() {
        let yaml = r#"
programs:
  - id: snap
    name: SNAP
    category: food
    max_benefit_amount: "281.10"
    max_income: "25000.00"
"#;
        let programs = CatalogLoader::from_yaml_str(yaml, "inline").unwrap();
        assert_eq!(programs[0].max_benefit_amount, Some(dec("281.10")));
        assert_eq!(programs[0].max_income, Some(dec("25000.00")));
        assert!(programs[0].is_active);
    }
}
