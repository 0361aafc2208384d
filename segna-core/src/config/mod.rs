//! Configuration table, types and loading
//!
//! The table in [`table`] is the source of truth. Everything else builds an
//! immutable [`DeviceConfig`] from it for the firmware to borrow.

pub mod line;
pub mod loader;
pub mod table;
pub mod toml;
pub mod types;
pub mod validate;

pub use loader::{log_summary, EMBEDDED_DEVICE_TOML};
pub use toml::{parse_overrides, ParseError};
pub use types::*;
pub use validate::ConfigError;
