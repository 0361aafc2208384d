//! Device configuration for the Segna LED receiver firmware
//!
//! This crate is the configuration contract the firmware initialization
//! code reads at startup:
//!
//! - Compile-time constant table (WiFi credentials, listener ports, LED pins)
//! - Typed [`config::DeviceConfig`] value built once and passed by reference
//! - Validation of the pin and port invariants
//! - Embedded `device.toml` overrides, fixed at build time
//! - LED colour to command letter mapping

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod led;

pub use config::{ConfigError, DeviceConfig};
pub use led::LedColor;
