//! Simple TOML parser for device.toml
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! the device configuration. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (double-quoted string, decimal integer)
//! - `[wifi]`, `[server]` and `[leds]` section headers
//! - Comments (# ...), including after a value
//!
//! NOT supported:
//! - Single-quoted strings and escape sequences
//! - `_` separators, signs and hex/octal/binary integers
//! - Multi-line strings
//! - Arrays and inline tables
//! - Dotted and quoted keys
//!
//! The line grammar lives in [`super::line`], shared with build.rs.

use heapless::String as HString;

use super::line::{lex_line, Line, LineError, Value};
use super::types::DeviceConfig;
use crate::led::LedColor;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    UnknownSection,
    /// Key not valid in its section
    UnknownKey,
    /// Line is not `key = value`
    InvalidLine,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Invalid pin (expected "gpioN" or a bare number)
    InvalidPin,
    /// String does not fit its field
    TooLong,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            ParseError::UnknownSection => "unknown section",
            ParseError::UnknownKey => "unknown key",
            ParseError::InvalidLine => "expected `key = value`",
            ParseError::InvalidValue => "invalid value",
            ParseError::InvalidPin => "invalid pin",
            ParseError::TooLong => "value too long",
        };
        f.write_str(msg)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Wifi,
    Server,
    Leds,
}

impl From<LineError> for ParseError {
    fn from(e: LineError) -> Self {
        match e {
            LineError::Header => ParseError::UnknownSection,
            LineError::NotKeyValue | LineError::Key => ParseError::InvalidLine,
            LineError::Value => ParseError::InvalidValue,
        }
    }
}

/// Apply device.toml overrides on top of `base`
///
/// Keys missing from `input` keep their `base` value. The result is not
/// validated; see [`DeviceConfig::validate`].
pub fn parse_overrides(input: &str, base: DeviceConfig) -> Result<DeviceConfig, ParseError> {
    let mut config = base;
    let mut section = Section::Root;

    for line in input.lines() {
        match lex_line(line)? {
            Line::Blank => {}
            Line::Section(name) => section = parse_section(name)?,
            Line::Entry(key, value) => apply_value(section, key, value, &mut config)?,
        }
    }

    Ok(config)
}

/// Map a header name like "wifi" to its section
fn parse_section(name: &str) -> Result<Section, ParseError> {
    match name {
        "wifi" => Ok(Section::Wifi),
        "server" => Ok(Section::Server),
        "leds" => Ok(Section::Leds),
        _ => Err(ParseError::UnknownSection),
    }
}

/// Apply one key to the config being built
fn apply_value(
    section: Section,
    key: &str,
    value: Value<'_>,
    config: &mut DeviceConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Wifi => match key {
            "ssid" => config.credentials.ssid = parse_bounded(value)?,
            "password" => config.credentials.password = parse_bounded(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Server => match key {
            "http_port" => config.ports.http = parse_int(value)?,
            "websocket_port" => config.ports.websocket = parse_int(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Leds => {
            let color = LedColor::from_name(key).ok_or(ParseError::UnknownKey)?;
            config.leds.set(color, parse_pin(value)?);
        }
        // Nothing lives at the top level
        Section::Root => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

/// Parse a quoted string into fixed-capacity storage
fn parse_bounded<const N: usize>(value: Value<'_>) -> Result<HString<N>, ParseError> {
    match value {
        Value::Str(s) => HString::try_from(s).map_err(|_| ParseError::TooLong),
        Value::Int(_) => Err(ParseError::InvalidValue),
    }
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: Value<'_>) -> Result<T, ParseError> {
    match value {
        Value::Int(digits) => digits.parse().map_err(|_| ParseError::InvalidValue),
        Value::Str(_) => Err(ParseError::InvalidValue),
    }
}

/// Parse a pin like "gpio25" or 25
fn parse_pin(value: Value<'_>) -> Result<u8, ParseError> {
    let digits = match value {
        Value::Int(digits) => digits,
        Value::Str(s) => s.strip_prefix("gpio").ok_or(ParseError::InvalidPin)?,
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidPin);
    }
    digits.parse().map_err(|_| ParseError::InvalidPin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::table;
    use proptest::prelude::*;

    fn parse(input: &str) -> Result<DeviceConfig, ParseError> {
        parse_overrides(input, DeviceConfig::from_table())
    }

    #[test]
    fn test_parse_pin() {
        assert_eq!(parse_pin(Value::Str("gpio25")), Ok(25));
        assert_eq!(parse_pin(Value::Int("33")), Ok(33));
        assert_eq!(parse_pin(Value::Str("25")), Err(ParseError::InvalidPin));
        assert_eq!(parse_pin(Value::Str("gpio")), Err(ParseError::InvalidPin));
        assert_eq!(parse_pin(Value::Str("gpio+5")), Err(ParseError::InvalidPin));
        assert_eq!(parse_pin(Value::Str("gpio300")), Err(ParseError::InvalidPin));
        assert_eq!(parse_pin(Value::Int("300")), Err(ParseError::InvalidPin));
    }

    #[test]
    fn test_parse_section() {
        assert_eq!(parse_section("wifi"), Ok(Section::Wifi));
        assert_eq!(parse_section("leds"), Ok(Section::Leds));
        assert_eq!(parse_section("mqtt"), Err(ParseError::UnknownSection));
        assert_eq!(parse("[ leds ]
red = 4"), parse("[leds]
red = 4"));
        assert_eq!(parse("[server"), Err(ParseError::UnknownSection));
    }

    #[test]
    fn test_empty_input_keeps_base() {
        assert_eq!(parse(""), Ok(DeviceConfig::from_table()));
        assert_eq!(parse("# only a comment\n\n"), Ok(DeviceConfig::from_table()));
    }

    #[test]
    fn test_parse_full_file() {
        let input = r#"
[wifi]
ssid = "workshop"
password = "hunter2#hunter2"  # not a comment inside quotes

[server]
http_port = 8080
websocket_port = 8081

[leds]
white = "gpio4"
yellow = 5
green = "gpio18"
red = "gpio19"
blue = "gpio21"
"#;
        let config = parse(input).unwrap();
        assert_eq!(config.credentials.ssid.as_str(), "workshop");
        assert_eq!(config.credentials.password.as_str(), "hunter2#hunter2");
        assert_eq!(config.ports.http, 8080);
        assert_eq!(config.ports.websocket, 8081);
        assert_eq!(config.leds.as_array(), [4, 5, 18, 19, 21]);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_partial_override() {
        let config = parse("[leds]\nred = \"gpio23\"\n").unwrap();
        assert_eq!(config.leds.red, 23);
        assert_eq!(config.leds.white, table::LED_WHITE_PIN);
        assert_eq!(config.ports.http, table::HTTP_PORT);
        assert_eq!(config.credentials.ssid.as_str(), table::WIFI_SSID);
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse("ssid = \"x\""), Err(ParseError::UnknownKey));
        assert_eq!(parse("[leds]\npurple = 4"), Err(ParseError::UnknownKey));
        assert_eq!(parse("[server]\nftp_port = 21"), Err(ParseError::UnknownKey));
        assert_eq!(parse("[server]\nhttp_port = 70000"), Err(ParseError::InvalidValue));
        assert_eq!(parse("[server]\nhttp_port = \"80\""), Err(ParseError::InvalidValue));
        assert_eq!(parse("[wifi]\nssid = home"), Err(ParseError::InvalidValue));
        assert_eq!(parse("[wifi]\nssid"), Err(ParseError::InvalidLine));
        assert_eq!(parse("[leds]\nred = gpio32"), Err(ParseError::InvalidValue));
        assert_eq!(parse("[leds]\nred = \"pin32\""), Err(ParseError::InvalidPin));
        assert_eq!(
            parse("[wifi]\nssid = \"this-ssid-is-much-longer-than-32-bytes\""),
            Err(ParseError::TooLong)
        );
    }

    #[test]
    fn test_rejects_toml_outside_subset() {
        assert_eq!(
            parse("[wifi]\nssid = 'home'"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse("[server]\nhttp_port = 8_080"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(parse("leds = { red = 4 }"), Err(ParseError::InvalidValue));
        assert_eq!(
            parse("[wifi]\n\"ssid\" = \"home\""),
            Err(ParseError::InvalidLine)
        );
    }

    #[test]
    fn test_parse_does_not_validate() {
        let config = parse("[leds]\nwhite = 26\n").unwrap();
        assert!(config.validate().is_err());
    }

    proptest! {
        #[test]
        fn prop_port_roundtrip(port in any::<u16>()) {
            let mut input: HString<64> = HString::new();
            core::fmt::Write::write_fmt(
                &mut input,
                format_args!("[server]\nwebsocket_port = {}\n", port),
            ).unwrap();
            let config = parse(&input).unwrap();
            prop_assert_eq!(config.ports.websocket, port);
        }

        #[test]
        fn prop_never_panics(input in "\\PC*") {
            let _ = parse(&input);
        }
    }
}
