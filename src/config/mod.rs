//! Runtime configuration for the benefits eligibility service.
//!
//! Settings come from environment variables, optionally seeded from a `.env`
//! file. The program catalog itself is loaded by [`crate::catalog`].
//!
//! # Example
//!
//! ```no_run
//! use benefits_engine::config::AppSettings;
//!
//! let settings = AppSettings::from_env().unwrap();
//! println!("Serving on {}:{}", settings.host, settings.port);
//! ```

mod settings;

pub use settings::{
    AppSettings, DEFAULT_CATALOG_PATH, DEFAULT_HOST, DEFAULT_LOG_LEVEL, DEFAULT_PORT,
    ENV_CATALOG_PATH, ENV_HOST, ENV_LOG_LEVEL, ENV_PORT,
};
