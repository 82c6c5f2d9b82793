//! Simple TOML parser for node configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! GasLog node files. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - [radio] and [telemetry] section headers
//! - Comments (# ...)
//!
//! NOT supported:
//! - Multi-line strings
//! - Arrays and inline tables
//! - Datetime values
//!
//! Values are range-checked as they are parsed, so a config that parses
//! cleanly is also a config that passed validation.

use crate::error::ConfigError;
use crate::node::NodeConfig;
use crate::radio::{FrequencyBand, NetworkGroup, NodeId, RadioConfig, SyncMode};
use crate::telemetry::TelemetryConfig;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid section header
    InvalidSection,
    /// Invalid value type
    InvalidValue,
    /// Required key missing from its section
    MissingKey(&'static str),
    /// Value parsed but failed a range or format check
    Config(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(err: ConfigError) -> Self {
        ParseError::Config(err)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy)]
enum Section {
    Root,
    Radio,
    Telemetry,
}

/// Parse TOML node configuration into a NodeConfig
pub fn parse_config(input: &str) -> Result<NodeConfig, ParseError> {
    let mut section = Section::Root;

    let mut node_id: Option<NodeId> = None;
    let mut group: Option<NetworkGroup> = None;
    let mut band: Option<FrequencyBand> = None;
    let mut sync_mode = SyncMode::Standby;
    let mut collect = false;

    let mut seen_telemetry = false;
    let mut host: Option<&str> = None;
    let mut api_key: Option<&str> = None;
    let mut feed: Option<&str> = None;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Check for section header
        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            if matches!(section, Section::Telemetry) {
                seen_telemetry = true;
            }
            continue;
        }

        // Parse key = value
        if let Some((key, value)) = parse_key_value(line) {
            match section {
                Section::Radio => match key {
                    "node_id" => node_id = Some(NodeId::new(parse_int(value)?)?),
                    "group" => group = Some(NetworkGroup::new(parse_int(value)?)?),
                    "band" => band = Some(FrequencyBand::from_label(parse_string(value)?)?),
                    "sync_mode" => sync_mode = SyncMode::from_mode(parse_int(value)?)?,
                    "collect" => collect = parse_bool(value)?,
                    _ => {} // Ignore unknown keys
                },
                Section::Telemetry => match key {
                    "host" => host = Some(parse_string(value)?),
                    "api_key" => api_key = Some(parse_string(value)?),
                    "feed" => feed = Some(parse_string(value)?),
                    _ => {}
                },
                Section::Root => {}
            }
        }
    }

    let node_id = node_id.ok_or(ParseError::MissingKey("node_id"))?;
    let group = group.ok_or(ParseError::MissingKey("group"))?;
    let band = band.ok_or(ParseError::MissingKey("band"))?;

    let mut radio = RadioConfig::new(node_id, group, band).with_sync_mode(sync_mode);
    if collect {
        radio = radio.with_collect();
    }
    let mut config = NodeConfig::new(radio);

    if seen_telemetry {
        let host = host.ok_or(ParseError::MissingKey("host"))?;
        let api_key = api_key.ok_or(ParseError::MissingKey("api_key"))?;
        let feed = feed.ok_or(ParseError::MissingKey("feed"))?;
        config = config.with_telemetry(TelemetryConfig::new(host, api_key, feed)?);
    }

    Ok(config)
}

/// Parse section header like "radio" or "telemetry"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "radio" => Ok(Section::Radio),
        "telemetry" => Ok(Section::Telemetry),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let mut value = line[eq_pos + 1..].trim();

    // Strip the first inline comment that starts outside a string
    let mut in_string = false;
    for (pos, c) in value.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => {
                value = value[..pos].trim_end();
                break;
            }
            _ => {}
        }
    }

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> Result<&str, ParseError> {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        Ok(&value[1..value.len() - 1])
    } else {
        // Allow unquoted strings for simple values
        Ok(value)
    }
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}
