//! Compile-time configuration table
//!
//! Ports and LED pins live in `table_values.rs` (shared with build.rs).
//! Credentials come from `SEGNA_WIFI_SSID` / `SEGNA_WIFI_PASSWORD` at build
//! time, or the placeholders below. Nothing here can change while the
//! firmware runs.

use super::types::{MAX_PASSWORD_LEN, MAX_SSID_LEN};
use super::validate::pins_distinct;

/// Take a value from the build environment, or fall back to a literal
macro_rules! env_or_default {
    ($env:literal, $default:literal) => {
        match option_env!($env) {
            Some(val) => val,
            None => $default,
        }
    };
}

// WiFi
pub const WIFI_SSID: &str = env_or_default!("SEGNA_WIFI_SSID", "YOUR_WIFI_SSID");
pub const WIFI_PASSWORD: &str = env_or_default!("SEGNA_WIFI_PASSWORD", "YOUR_WIFI_PASSWORD");

include!("table_values.rs");

/// LED pins in letter order (A..E)
pub const LED_PINS: [u8; 5] = [
    LED_WHITE_PIN,
    LED_YELLOW_PIN,
    LED_GREEN_PIN,
    LED_RED_PIN,
    LED_BLUE_PIN,
];

const _: () = assert!(pins_distinct(&LED_PINS), "LED pins must be distinct");
const _: () = assert!(HTTP_PORT != WEBSOCKET_PORT, "HTTP and WebSocket ports must differ");
const _: () = assert!(!WIFI_SSID.is_empty(), "WiFi SSID is empty");
const _: () = assert!(!WIFI_PASSWORD.is_empty(), "WiFi password is empty");
const _: () = assert!(WIFI_SSID.len() <= MAX_SSID_LEN, "WiFi SSID is longer than 32 bytes");
const _: () = assert!(
    WIFI_PASSWORD.len() <= MAX_PASSWORD_LEN,
    "WiFi password is longer than 64 bytes"
);
