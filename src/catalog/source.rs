//! Catalog sources and immutable snapshots.
//!
//! Evaluation never reads a live, mutable catalog. A [`CatalogSource`] hands
//! out a [`CatalogSnapshot`] once per request and the evaluator works from
//! that snapshot only, so a concurrent catalog update can never be observed
//! half-way through an evaluation.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::Program;

use super::CatalogLoader;

/// An immutable, versioned view of the program catalog.
///
/// Cloning a snapshot is cheap; the programs are shared.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    version: u64,
    programs: Arc<[Program]>,
}

impl CatalogSnapshot {
    /// Creates a snapshot with the given version.
    pub fn new(version: u64, programs: Vec<Program>) -> Self {
        Self {
            version,
            programs: programs.into(),
        }
    }

    /// The catalog version this snapshot was taken from.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// All programs, active and inactive, in catalog order.
    pub fn programs(&self) -> &[Program] {
        &self.programs
    }
}

/// Something that can provide a consistent catalog snapshot.
///
/// Failures to reach the underlying catalog are reported as
/// [`EngineError::CatalogUnavailable`]. Sources do not retry.
pub trait CatalogSource: Send + Sync {
    /// Fetches a snapshot of the current catalog.
    fn snapshot(&self) -> EngineResult<CatalogSnapshot>;
}

/// A catalog held in memory and replaced wholesale.
///
/// Each [`replace`](InMemoryCatalog::replace) publishes a new snapshot with the
/// next version number. Snapshots already handed out are unaffected.
///
/// # Example
///
/// ```
/// use benefits_engine::catalog::{CatalogSource, InMemoryCatalog};
///
/// let catalog = InMemoryCatalog::new(vec![]).unwrap();
/// assert_eq!(catalog.snapshot().unwrap().version(), 1);
/// assert_eq!(catalog.replace(vec![]).unwrap(), 2);
/// ```
#[derive(Debug)]
pub struct InMemoryCatalog {
    current: RwLock<CatalogSnapshot>,
}

impl InMemoryCatalog {
    /// Creates a catalog at version 1 after validating `programs`.
    pub fn new(programs: Vec<Program>) -> EngineResult<Self> {
        CatalogLoader::validate_programs(&programs)?;
        Ok(Self {
            current: RwLock::new(CatalogSnapshot::new(1, programs)),
        })
    }

    /// Loads a catalog from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        Self::new(CatalogLoader::load(path)?)
    }

    /// Validates and publishes a new catalog, returning its version.
    ///
    /// On validation failure the current catalog is left untouched.
    pub fn replace(&self, programs: Vec<Program>) -> EngineResult<u64> {
        CatalogLoader::validate_programs(&programs)?;

        let mut current = self
            .current
            .write()
            .map_err(|_| EngineError::CatalogUnavailable {
                message: "catalog lock poisoned".to_string(),
            })?;
        let version = current.version() + 1;
        *current = CatalogSnapshot::new(version, programs);

        info!(
            version,
            programs = current.programs().len(),
            "Published catalog"
        );
        Ok(version)
    }
}

impl CatalogSource for InMemoryCatalog {
    fn snapshot(&self) -> EngineResult<CatalogSnapshot> {
        self.current
            .read()
            .map(|snapshot| snapshot.clone())
            .map_err(|_| EngineError::CatalogUnavailable {
                message: "catalog lock poisoned".to_string(),
            })
    }
}

/// A catalog read from a YAML file on every fetch.
///
/// Any failure to read or parse the file surfaces as
/// [`EngineError::CatalogUnavailable`]. The version counts successful loads.
#[derive(Debug)]
pub struct FileCatalog {
    path: PathBuf,
    loads: AtomicU64,
}

impl FileCatalog {
    /// Creates a source for the catalog file at `path`. The file is not read yet.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            loads: AtomicU64::new(0),
        }
    }

    /// The catalog file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for FileCatalog {
    fn snapshot(&self) -> EngineResult<CatalogSnapshot> {
        let programs =
            CatalogLoader::load(&self.path).map_err(|err| EngineError::CatalogUnavailable {
                message: err.to_string(),
            })?;
        let version = self.loads.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(
            path = %self.path.display(),
            version,
            programs = programs.len(),
            "Loaded catalog file"
        );
        Ok(CatalogSnapshot::new(version, programs))
    }
}
