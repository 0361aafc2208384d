//! Configuration validation
//!
//! The constant table is checked at compile time. Anything assembled at
//! startup (table plus device.toml overrides) goes through [`validate`]
//! before the firmware touches a pin or binds a port.

use super::types::DeviceConfig;
use crate::led::LedColor;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// SSID is empty
    EmptySsid,
    /// Password is empty
    EmptyPassword,
    /// HTTP and WebSocket listeners share a port
    PortConflict { port: u16 },
    /// Port 0 cannot be listened on
    ReservedPort,
    /// Two LEDs are wired to the same pin
    DuplicatePin {
        pin: u8,
        first: LedColor,
        second: LedColor,
    },
    /// Pin cannot drive an LED
    PinNotOutput { color: LedColor, pin: u8 },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::EmptySsid => write!(f, "WiFi SSID is empty"),
            ConfigError::EmptyPassword => write!(f, "WiFi password is empty"),
            ConfigError::PortConflict { port } => {
                write!(f, "HTTP and WebSocket both use port {}", port)
            }
            ConfigError::ReservedPort => write!(f, "port 0 is reserved"),
            ConfigError::DuplicatePin { pin, first, second } => {
                write!(f, "{} and {} LEDs share gpio{}", first, second, pin)
            }
            ConfigError::PinNotOutput { color, pin } => {
                write!(f, "gpio{} ({} LED) cannot drive an output", pin, color)
            }
        }
    }
}

/// Whether an ESP32 GPIO can drive an LED
///
/// Excludes pads that don't exist (20, 24, 28-31, >39), the SPI flash
/// lines (6-11) and the input-only pads (34-39).
pub const fn is_output_pin(pin: u8) -> bool {
    !matches!(pin, 6..=11 | 20 | 24 | 28..=31 | 34..=u8::MAX)
}

/// True when no two pins are equal
pub const fn pins_distinct(pins: &[u8]) -> bool {
    let mut i = 0;
    while i < pins.len() {
        let mut j = i + 1;
        while j < pins.len() {
            if pins[i] == pins[j] {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

/// Validate a device configuration
///
/// Credentials, then ports, then pins. Returns the first problem found.
pub fn validate(config: &DeviceConfig) -> Result<(), ConfigError> {
    if config.credentials.ssid.is_empty() {
        return Err(ConfigError::EmptySsid);
    }
    if config.credentials.password.is_empty() {
        return Err(ConfigError::EmptyPassword);
    }

    let ports = config.ports;
    if ports.http == 0 || ports.websocket == 0 {
        return Err(ConfigError::ReservedPort);
    }
    if ports.http == ports.websocket {
        return Err(ConfigError::PortConflict { port: ports.http });
    }

    let pins = config.leds.as_array();
    if !pins_distinct(&pins) {
        for (i, first) in LedColor::ALL.into_iter().enumerate() {
            for second in LedColor::ALL.into_iter().skip(i + 1) {
                let pin = config.leds.pin(first);
                if pin == config.leds.pin(second) {
                    return Err(ConfigError::DuplicatePin { pin, first, second });
                }
            }
        }
    }

    for (color, pin) in config.leds.iter() {
        if !is_output_pin(pin) {
            return Err(ConfigError::PinNotOutput { color, pin });
        }
    }

    Ok(())
}
