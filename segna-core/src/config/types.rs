//! Configuration type definitions
//!
//! [`DeviceConfig`] is the typed form of the constant table. It is built
//! once at startup and handed to initializers by reference.

use heapless::String;

use super::table;
use super::validate::{self, ConfigError};
use crate::led::LedColor;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum SSID length (802.11)
pub const MAX_SSID_LEN: usize = 32;

/// Maximum WPA2 passphrase length
pub const MAX_PASSWORD_LEN: usize = 64;

/// Number of indicator LEDs
pub const LED_COUNT: usize = 5;

/// WiFi station credentials
#[derive(Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Credentials {
    /// Network name
    pub ssid: String<MAX_SSID_LEN>,
    /// Network passphrase
    pub password: String<MAX_PASSWORD_LEN>,
}

impl Credentials {
    /// Credentials from the compiled-in table
    pub fn from_table() -> Self {
        Self {
            ssid: fit(table::WIFI_SSID),
            password: fit(table::WIFI_PASSWORD),
        }
    }
}

// Password stays out of logs.
impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credentials")
            .field("ssid", &self.ssid.as_str())
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Credentials {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Credentials {{ ssid: {}, password: <redacted> }}", self.ssid.as_str());
    }
}

/// Listening ports for the HTTP and WebSocket servers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ServerPorts {
    /// HTTP listener port
    pub http: u16,
    /// WebSocket listener port
    pub websocket: u16,
}

impl Default for ServerPorts {
    fn default() -> Self {
        Self {
            http: table::HTTP_PORT,
            websocket: table::WEBSOCKET_PORT,
        }
    }
}

/// GPIO pin for each indicator LED
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LedPins {
    /// White LED, letter A
    pub white: u8,
    /// Yellow LED, letter B
    pub yellow: u8,
    /// Green LED, letter C
    pub green: u8,
    /// Red LED, letter D
    pub red: u8,
    /// Blue LED, letter E
    pub blue: u8,
}

impl Default for LedPins {
    fn default() -> Self {
        Self {
            white: table::LED_WHITE_PIN,
            yellow: table::LED_YELLOW_PIN,
            green: table::LED_GREEN_PIN,
            red: table::LED_RED_PIN,
            blue: table::LED_BLUE_PIN,
        }
    }
}

impl LedPins {
    /// Pin driving the given colour
    pub const fn pin(&self, color: LedColor) -> u8 {
        match color {
            LedColor::White => self.white,
            LedColor::Yellow => self.yellow,
            LedColor::Green => self.green,
            LedColor::Red => self.red,
            LedColor::Blue => self.blue,
        }
    }

    /// Reassign the pin for a colour
    pub fn set(&mut self, color: LedColor, pin: u8) {
        match color {
            LedColor::White => self.white = pin,
            LedColor::Yellow => self.yellow = pin,
            LedColor::Green => self.green = pin,
            LedColor::Red => self.red = pin,
            LedColor::Blue => self.blue = pin,
        }
    }

    /// Pins in letter order (A..E)
    pub const fn as_array(&self) -> [u8; LED_COUNT] {
        [self.white, self.yellow, self.green, self.red, self.blue]
    }

    /// Iterate `(colour, pin)` pairs in letter order
    pub fn iter(&self) -> impl Iterator<Item = (LedColor, u8)> + '_ {
        LedColor::ALL.into_iter().map(move |c| (c, self.pin(c)))
    }

    /// Which colour a pin drives, if any
    ///
    /// With duplicated pins the first colour in letter order wins.
    pub fn color_of(&self, pin: u8) -> Option<LedColor> {
        self.iter().find(|&(_, p)| p == pin).map(|(c, _)| c)
    }
}

/// Complete device configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceConfig {
    /// WiFi credentials
    pub credentials: Credentials,
    /// Server listener ports
    pub ports: ServerPorts,
    /// LED output pins
    pub leds: LedPins,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self::from_table()
    }
}

impl DeviceConfig {
    /// Exact copy of the compiled-in constant table
    pub fn from_table() -> Self {
        Self {
            credentials: Credentials::from_table(),
            ports: ServerPorts::default(),
            leds: LedPins::default(),
        }
    }

    /// Check the pin, port and credential invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate::validate(self)
    }
}

/// Copy a table string into fixed storage
///
/// The table asserts at compile time that its strings fit, so nothing is
/// ever dropped here.
fn fit<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_table_matches_constants() {
        let config = DeviceConfig::from_table();
        assert_eq!(config.credentials.ssid.as_str(), table::WIFI_SSID);
        assert_eq!(config.credentials.password.as_str(), table::WIFI_PASSWORD);
        assert_eq!(config.ports.http, 80);
        assert_eq!(config.ports.websocket, 81);
        assert_eq!(config.leds.as_array(), [25, 26, 27, 32, 33]);
        assert_eq!(config, DeviceConfig::default());
    }

    #[test]
    fn test_pin_lookup() {
        let leds = LedPins::default();
        assert_eq!(leds.pin(LedColor::White), 25);
        assert_eq!(leds.pin(LedColor::Blue), 33);
        assert_eq!(leds.color_of(32), Some(LedColor::Red));
        assert_eq!(leds.color_of(2), None);

        let pairs: heapless::Vec<(LedColor, u8), LED_COUNT> = leds.iter().collect();
        assert_eq!(pairs[2], (LedColor::Green, 27));
    }

    #[test]
    fn test_set_pin() {
        let mut leds = LedPins::default();
        leds.set(LedColor::Yellow, 4);
        assert_eq!(leds.yellow, 4);
        assert_eq!(leds.pin(LedColor::Yellow), 4);
    }

    #[test]
    fn test_debug_hides_password() {
        use core::fmt::Write;

        let creds = Credentials::from_table();
        let mut out: String<128> = String::new();
        write!(out, "{:?}", creds).unwrap();
        assert!(out.contains("<redacted>"));
        assert!(!out.contains(table::WIFI_PASSWORD));
    }

    #[test]
    fn test_fit_truncates_at_capacity() {
        let s: String<4> = fit("abcdef");
        assert_eq!(s.as_str(), "abcd");
    }
}
