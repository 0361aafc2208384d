//! Line grammar of device.toml
//!
//! Splits one line into a section header or a `key = value` entry. Only
//! the subset the firmware understands gets through: bare keys, bare
//! decimal integers and double-quoted strings without escapes.
//!
//! This file depends on `core` only; build.rs includes it with `#[path]`
//! so the build-time check accepts exactly what the firmware parses.

/// One lexed line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// Empty or comment-only line
    Blank,
    /// `[name]`
    Section(&'a str),
    /// `key = value`
    Entry(&'a str, Value<'a>),
}

/// Entry value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value<'a> {
    /// Contents of a `"..."` string
    Str(&'a str),
    /// Decimal digits, not yet range-checked
    Int(&'a str),
}

/// Why a line is outside the subset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineError {
    /// Header is not `[bare_name]`
    Header,
    /// No `=`, or nothing on one side of it
    NotKeyValue,
    /// Quoted, dotted or otherwise non-bare key
    Key,
    /// Anything but a plain integer or double-quoted string
    Value,
}

impl LineError {
    /// Short description for diagnostics
    pub const fn describe(self) -> &'static str {
        match self {
            LineError::Header => "section header must be [wifi], [server] or [leds]",
            LineError::NotKeyValue => "expected `key = value`",
            LineError::Key => "keys must be bare (letters, digits, _ and -)",
            LineError::Value => "values must be a decimal integer or a \"string\"",
        }
    }
}

/// Lex one line of device.toml
pub fn lex_line(line: &str) -> Result<Line<'_>, LineError> {
    let line = strip_comment(line.trim());
    if line.is_empty() {
        return Ok(Line::Blank);
    }

    if let Some(rest) = line.strip_prefix('[') {
        let name = rest.strip_suffix(']').ok_or(LineError::Header)?.trim();
        if !is_bare_key(name) {
            return Err(LineError::Header);
        }
        return Ok(Line::Section(name));
    }

    let eq_pos = line.find('=').ok_or(LineError::NotKeyValue)?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();
    if key.is_empty() || value.is_empty() {
        return Err(LineError::NotKeyValue);
    }
    if !is_bare_key(key) {
        return Err(LineError::Key);
    }

    Ok(Line::Entry(key, lex_value(value)?))
}

fn lex_value(value: &str) -> Result<Value<'_>, LineError> {
    if let Some(rest) = value.strip_prefix('"') {
        let inner = rest.strip_suffix('"').ok_or(LineError::Value)?;
        if inner.contains('"') || inner.contains('\\') {
            return Err(LineError::Value);
        }
        return Ok(Value::Str(inner));
    }

    if value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(Value::Int(value))
    } else {
        Err(LineError::Value)
    }
}

fn is_bare_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Drop a trailing comment that is not inside a string
fn strip_comment(s: &str) -> &str {
    let mut in_string = false;
    for (i, c) in s.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return s[..i].trim_end(),
            _ => {}
        }
    }
    s
}
