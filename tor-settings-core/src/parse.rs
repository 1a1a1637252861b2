//! Free-text parsers for the network settings form.
//!
//! All functions are total: every input yields either a value or a
//! [`ParseError`], never a panic.

use std::collections::HashSet;

use crate::error::ParseError;

/// Highest number of significant digits a valid port can have
const MAX_PORT_DIGITS: usize = 5;

/// Parses a single TCP port.
///
/// Surrounding whitespace is ignored and leading zeros are accepted
/// (`"0080"` is port 80). Anything else that is not a decimal number in
/// `1..=65535` is rejected.
pub fn parse_port(text: &str) -> Result<u16, ParseError> {
    let trimmed = text.trim();
    let invalid = || ParseError::InvalidPort {
        input: trimmed.to_string(),
    };

    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    // Strip leading zeros first so long zero-padded input cannot overflow.
    let significant = trimmed.trim_start_matches('0');
    if significant.is_empty() || significant.len() > MAX_PORT_DIGITS {
        return Err(invalid());
    }

    significant
        .parse::<u32>()
        .ok()
        .and_then(|value| u16::try_from(value).ok())
        .ok_or_else(invalid)
}

/// Parses a comma and/or whitespace separated list of ports.
///
/// Empty tokens are skipped. Duplicates are dropped, keeping the first
/// occurrence so the result preserves input order. Fails on the first
/// invalid token.
pub fn parse_port_list(text: &str) -> Result<Vec<u16>, ParseError> {
    let mut seen = HashSet::new();
    let mut ports = Vec::new();

    let tokens = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|token| !token.is_empty());

    for (position, token) in tokens.enumerate() {
        let port = parse_port(token).map_err(|_| ParseError::InvalidPortList {
            token: token.to_string(),
            position,
        })?;
        if seen.insert(port) {
            ports.push(port);
        }
    }

    Ok(ports)
}

/// Splits bridge text into individual bridge lines.
///
/// Lines are trimmed and blank lines dropped. The syntax of each bridge line is
/// not checked here; the Tor daemon validates it when it loads the settings.
pub fn parse_bridge_strings(text: &str) -> Vec<String> {
    text.split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect()
}
