//! Benefits Eligibility Engine
//!
//! This crate decides which government benefit programs an applicant
//! qualifies for, sums the potential benefit value, and records each check
//! for later retrieval. It also exposes the catalog and checks over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod catalog;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod telemetry;
