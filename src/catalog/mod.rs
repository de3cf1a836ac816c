//! Program catalog: loading, snapshots and queries.
//!
//! This module provides functionality to load benefit program catalogs from
//! YAML files, to hand out immutable versioned snapshots of the catalog, and
//! to list and filter programs independently of eligibility evaluation.
//!
//! # Example
//!
//! ```no_run
//! use benefits_engine::catalog::{CatalogSource, InMemoryCatalog, filter_by_category, list_active};
//!
//! let catalog = InMemoryCatalog::from_file("./config/catalog/programs.yaml").unwrap();
//! let snapshot = catalog.snapshot().unwrap();
//! let food = filter_by_category(&list_active(snapshot.programs()), "food");
//! println!("{} food programs", food.len());
//! ```

mod loader;
mod query;
mod source;

pub use loader::CatalogLoader;
pub use query::{
    ALL_CATEGORIES, CatalogStatistics, CategoryFilter, filter_by_category, list_active,
};
pub use source::{CatalogSnapshot, CatalogSource, FileCatalog, InMemoryCatalog};
