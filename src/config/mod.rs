//! Driver configuration management.
//!
//! A single typed struct behind `parking_lot::RwLock`, filled from a JSON
//! file at startup. Core objects never read the global directly: the factory
//! takes a snapshot and passes what each object needs at construction.

pub mod driver;

pub use driver::{current, load, load_from_path, set_config, DriverConfig, CONFIG_ENV_VAR, DRIVER_CONFIG};
