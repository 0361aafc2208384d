//! Startup configuration loading
//!
//! Builds the [`DeviceConfig`] the firmware runs with: the constant table,
//! overridden by the device.toml that was embedded at build time. Falls back
//! to the bare table if the embedded file is broken.

#[cfg(feature = "defmt")]
use defmt::{debug, error, info, warn};

use super::toml::parse_overrides;
use super::types::DeviceConfig;

/// Device file compiled into the image
/// Edit device.toml and rebuild to customize
pub const EMBEDDED_DEVICE_TOML: &str = include_str!("../../device.toml");

impl DeviceConfig {
    /// Build the startup configuration
    ///
    /// Call once during init and pass the result by reference.
    pub fn load() -> Self {
        Self::load_from(EMBEDDED_DEVICE_TOML)
    }

    /// Build a configuration from device.toml text over the table
    pub fn load_from(device_toml: &str) -> Self {
        let config = match parse_overrides(device_toml, Self::from_table()) {
            Ok(config) => config,
            Err(_e) => {
                // build.rs lexes device.toml with the same line grammar, so
                // only text handed to load_from directly can land here
                #[cfg(feature = "defmt")]
                error!("Failed to parse device.toml: {:?}", _e);
                return Self::fallback();
            }
        };

        match config.validate() {
            Ok(()) => {
                #[cfg(feature = "defmt")]
                info!("Parsed embedded device configuration");
                log_summary(&config);
                config
            }
            Err(_e) => {
                #[cfg(feature = "defmt")]
                error!("Invalid device configuration: {:?}", _e);
                Self::fallback()
            }
        }
    }

    /// Table-only configuration
    ///
    /// The table's pins, ports and credentials are asserted at compile
    /// time, so this always passes `validate`.
    fn fallback() -> Self {
        #[cfg(feature = "defmt")]
        warn!("Using compiled-in configuration table");
        let config = Self::from_table();
        log_summary(&config);
        config
    }
}

/// Log a summary of the configuration
///
/// The password is never logged.
pub fn log_summary(_config: &DeviceConfig) {
    #[cfg(feature = "defmt")]
    {
        info!("WiFi SSID: {}", _config.credentials.ssid.as_str());
        info!(
            "HTTP port {}, WebSocket port {}",
            _config.ports.http, _config.ports.websocket
        );
        for (color, pin) in _config.leds.iter() {
            debug!("  LED {} ({}): gpio{}", color, color.letter(), pin);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::table;

    #[test]
    fn test_embedded_file_loads() {
        let parsed = parse_overrides(EMBEDDED_DEVICE_TOML, DeviceConfig::from_table()).unwrap();
        assert_eq!(parsed.validate(), Ok(()));
        assert_eq!(DeviceConfig::load(), parsed);
    }

    #[test]
    fn test_embedded_file_matches_table() {
        // device.toml ships with the same values as the table
        assert_eq!(DeviceConfig::load(), DeviceConfig::from_table());
    }

    #[test]
    fn test_load_applies_overrides() {
        let config = DeviceConfig::load_from("[server]\nhttp_port = 8080\n");
        assert_eq!(config.ports.http, 8080);
        assert_eq!(config.ports.websocket, table::WEBSOCKET_PORT);
    }

    #[test]
    fn test_broken_file_falls_back() {
        let config = DeviceConfig::load_from("[server]\nhttp_port = eighty\n");
        assert_eq!(config, DeviceConfig::from_table());
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let config = DeviceConfig::load_from("[leds]\nred = 34\n");
        assert_eq!(config, DeviceConfig::from_table());
    }

    #[test]
    fn test_fallback_is_valid() {
        assert_eq!(DeviceConfig::fallback().validate(), Ok(()));
    }

    #[test]
    fn test_toml_outside_line_grammar_falls_back() {
        // Valid TOML that build.rs refuses, because the firmware can't read it
        for input in [
            "[wifi]\nssid = 'home'\n",
            "[server]\nhttp_port = 8_080\n",
            "leds = { red = 4 }\n",
        ] {
            assert!(input.lines().any(|l| crate::config::line::lex_line(l).is_err()));
            assert_eq!(DeviceConfig::load_from(input), DeviceConfig::from_table());
        }
    }

    #[test]
    fn test_load_is_stable() {
        assert_eq!(DeviceConfig::load(), DeviceConfig::load());
    }
}
