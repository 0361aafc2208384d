//! Build script for segna-core
//!
//! - Validates device.toml at compile time, with the same line grammar and
//!   table values the firmware uses
//! - Rebuilds when the credential environment variables change

use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[path = "src/config/line.rs"]
#[allow(dead_code)]
mod line;

/// Ports and pins the firmware is built with
mod table {
    include!("src/config/table_values.rs");
}

/// ESP32 pads that exist and can drive an output
const OUTPUT_PINS: std::ops::RangeInclusive<i64> = 0..=33;
const NOT_OUTPUT: &[i64] = &[6, 7, 8, 9, 10, 11, 20, 24, 28, 29, 30, 31];

const LED_KEYS: &[&str] = &["white", "yellow", "green", "red", "blue"];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/config/line.rs");
    println!("cargo:rerun-if-changed=src/config/table_values.rs");
    println!("cargo:rerun-if-env-changed=SEGNA_WIFI_SSID");
    println!("cargo:rerun-if-env-changed=SEGNA_WIFI_PASSWORD");
    validate_device_file();
}

/// Validate device.toml configuration at compile time
fn validate_device_file() {
    // Re-run if device.toml changes
    println!("cargo:rerun-if-changed=device.toml");

    let config_path = Path::new("device.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: device.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds segna-core/device.toml. Create it, even     ║\n\
            ║  if empty, to build with the compiled-in table.                  ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read device.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    validate_lines(&config_content);

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in device.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_wifi(&config, &mut errors);
    validate_server(&config, &mut errors);
    validate_leds(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid device configuration in device.toml              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }
}

/// Reject TOML the firmware's line parser does not understand
///
/// Single-quoted strings, `_` in numbers, quoted keys, inline tables and the
/// like are valid TOML but would make the firmware drop device.toml.
fn validate_lines(content: &str) {
    let errors: Vec<String> = content
        .lines()
        .enumerate()
        .filter_map(|(i, l)| {
            line::lex_line(l)
                .err()
                .map(|e| format!("line {}: {}", i + 1, e.describe()))
        })
        .collect();

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Unsupported syntax in device.toml                        ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format_error_lines(&format!("• {}", e)))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Only [wifi], [server] and [leds] tables are understood
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };
    for (name, value) in root {
        match (name.as_str(), value) {
            ("wifi" | "server" | "leds", toml::Value::Table(_)) => {}
            ("wifi" | "server" | "leds", _) => errors.push(format!("[{}] must be a table", name)),
            _ => errors.push(format!("unknown section or key '{}'", name)),
        }
    }
}

/// Credentials must be non-empty strings that fit the firmware buffers
fn validate_wifi(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(wifi) = config.get("wifi").and_then(|w| w.as_table()) else {
        return;
    };

    for (key, value) in wifi {
        let limit = match key.as_str() {
            "ssid" => 32,
            "password" => 64,
            _ => {
                errors.push(format!("[wifi] unknown key '{}'", key));
                continue;
            }
        };
        match value.as_str() {
            Some("") => errors.push(format!("[wifi] {} cannot be empty", key)),
            Some(s) if s.len() > limit => {
                errors.push(format!("[wifi] {} longer than {} bytes", key, limit))
            }
            Some(s) if s.contains('"') || s.contains('\\') => {
                errors.push(format!("[wifi] {} cannot contain quotes or backslashes", key))
            }
            Some(_) => {}
            None => errors.push(format!("[wifi] {} must be a string", key)),
        }
    }
}

/// Ports must be 1-65535 and distinct
fn validate_server(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(server) = config.get("server").and_then(|s| s.as_table()) else {
        return;
    };

    let mut ports = HashMap::new();
    for (key, value) in server {
        if !matches!(key.as_str(), "http_port" | "websocket_port") {
            errors.push(format!("[server] unknown key '{}'", key));
            continue;
        }
        match value.as_integer() {
            Some(port) if (1..=65535).contains(&port) => {
                ports.insert(key.as_str(), port);
            }
            Some(_) => errors.push(format!("[server] {} must be 1-65535", key)),
            None => errors.push(format!("[server] {} must be an integer", key)),
        }
    }

    // Absent ports keep the table value
    let http = ports
        .get("http_port")
        .copied()
        .unwrap_or(i64::from(table::HTTP_PORT));
    let websocket = ports
        .get("websocket_port")
        .copied()
        .unwrap_or(i64::from(table::WEBSOCKET_PORT));
    if http == websocket {
        errors.push(format!("[server] http_port and websocket_port both {}", http));
    }
}

/// Pins must name usable output pads, one LED per pad
fn validate_leds(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(leds) = config.get("leds").and_then(|l| l.as_table()) else {
        return;
    };

    // Start from the table values so partial overrides are checked too
    let mut assigned: HashMap<&str, i64> = LED_KEYS
        .iter()
        .copied()
        .zip(
            [
                table::LED_WHITE_PIN,
                table::LED_YELLOW_PIN,
                table::LED_GREEN_PIN,
                table::LED_RED_PIN,
                table::LED_BLUE_PIN,
            ]
            .map(i64::from),
        )
        .collect();

    for (key, value) in leds {
        let Some(&color) = LED_KEYS.iter().find(|&&k| k == key.as_str()) else {
            errors.push(format!("[leds] unknown LED '{}'", key));
            continue;
        };
        let pin = match value {
            toml::Value::Integer(n) => Some(*n),
            toml::Value::String(s) => s
                .strip_prefix("gpio")
                .filter(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
                .and_then(|n| n.parse().ok()),
            _ => None,
        };
        match pin {
            Some(pin) if OUTPUT_PINS.contains(&pin) && !NOT_OUTPUT.contains(&pin) => {
                assigned.insert(color, pin);
            }
            Some(pin) => errors.push(format!("[leds] {}: gpio{} cannot drive an output", key, pin)),
            None => errors.push(format!("[leds] {} must be \"gpioN\" or an integer", key)),
        }
    }

    for (i, a) in LED_KEYS.iter().enumerate() {
        for b in &LED_KEYS[i + 1..] {
            if assigned[a] == assigned[b] {
                errors.push(format!("[leds] {} and {} share gpio{}", a, b, assigned[a]));
            }
        }
    }
}
