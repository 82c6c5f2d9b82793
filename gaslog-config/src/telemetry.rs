//! Telemetry upload endpoint settings
//!
//! The gateway node posts meter readings to a Pachube feed. The firmware's
//! HTTP client needs exactly three values from configuration: the virtual
//! host, the API-key header, and the feed path. Each is validated here so a
//! malformed endpoint fails at startup instead of producing requests that
//! silently go nowhere.
//!
//! The API key is a credential. It is never shipped as a constant, and its
//! Debug/defmt output is redacted.

use core::fmt::Write;

use heapless::String;

use crate::error::ConfigError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum hostname length
pub const MAX_HOST_LEN: usize = 64;

/// Maximum API key length
pub const MAX_API_KEY_LEN: usize = 96;

/// Maximum feed path length
pub const MAX_FEED_PATH_LEN: usize = 64;

/// Request header carrying the API key
pub const API_KEY_HEADER: &str = "X-PachubeApiKey";

/// Maximum length of the assembled API-key header line
pub const MAX_API_HEADER_LEN: usize = API_KEY_HEADER.len() + 2 + MAX_API_KEY_LEN;

/// Virtual host of the Pachube v2 API
pub const PACHUBE_HOST: &str = "api.pachube.com";

/// Upload host, stored as a bare hostname
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Host(String<MAX_HOST_LEN>);

impl Host {
    /// Validate and store a hostname
    ///
    /// Rejects empty strings and anything that is not a plain DNS name:
    /// schemes, paths, ports, whitespace, empty labels, hyphens at label
    /// edges.
    pub fn new(host: &str) -> Result<Self, ConfigError> {
        if host.is_empty() || !host.bytes().all(is_hostname_byte) {
            return Err(ConfigError::InvalidHost);
        }
        for label in host.split('.') {
            if label.is_empty() || label.starts_with('-') || label.ends_with('-') {
                return Err(ConfigError::InvalidHost);
            }
        }
        let stored = String::try_from(host).map_err(|_| ConfigError::InvalidHost)?;
        Ok(Host(stored))
    }

    /// The hostname, for the HTTP Host header
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

fn is_hostname_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'.' || byte == b'-'
}

/// Telemetry API key
///
/// Secret credential sent with every upload request. `Debug` and defmt
/// output never include the key material; use [`ApiKey::expose`] where the
/// actual value is required.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ApiKey(String<MAX_API_KEY_LEN>);

impl ApiKey {
    /// Validate and store an API key
    ///
    /// Keys must be printable ASCII with no spaces, so the assembled header
    /// value cannot smuggle in a second header line.
    pub fn new(key: &str) -> Result<Self, ConfigError> {
        if key.is_empty() || !key.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(ConfigError::InvalidApiKey);
        }
        let stored = String::try_from(key).map_err(|_| ConfigError::InvalidApiKey)?;
        Ok(ApiKey(stored))
    }

    /// The key material, for building the request header
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl core::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ApiKey {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "ApiKey(<redacted>)")
    }
}

/// Destination feed, stored as an absolute URL path
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeedPath(String<MAX_FEED_PATH_LEN>);

impl FeedPath {
    /// Validate and store a feed path
    ///
    /// The path must start with `/` and contain only printable ASCII.
    pub fn new(path: &str) -> Result<Self, ConfigError> {
        if !path.starts_with('/') || !path.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(ConfigError::InvalidFeedPath);
        }
        let stored = String::try_from(path).map_err(|_| ConfigError::InvalidFeedPath)?;
        Ok(FeedPath(stored))
    }

    /// The path, for the HTTP request line
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Build the Pachube v2 CSV path for a numeric feed ID
pub fn pachube_feed_path(feed_id: u32) -> FeedPath {
    let mut path = String::new();
    // "/v2/feeds/" + at most 10 digits + ".csv" always fits
    let _ = write!(path, "/v2/feeds/{}.csv", feed_id);
    FeedPath(path)
}

/// Telemetry endpoint for a gateway node
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TelemetryConfig {
    /// Upload host (virtual host for the HTTP Host header)
    pub host: Host,
    /// API key sent with every request
    pub api_key: ApiKey,
    /// Destination feed path
    pub feed: FeedPath,
}

impl TelemetryConfig {
    /// Validate endpoint strings and assemble a telemetry config
    pub fn new(host: &str, api_key: &str, feed: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            host: Host::new(host)?,
            api_key: ApiKey::new(api_key)?,
            feed: FeedPath::new(feed)?,
        })
    }

    /// Pachube endpoint for a numeric feed ID (v2 CSV API)
    pub fn pachube(api_key: &str, feed_id: u32) -> Result<Self, ConfigError> {
        Ok(Self {
            host: Host::new(PACHUBE_HOST)?,
            api_key: ApiKey::new(api_key)?,
            feed: pachube_feed_path(feed_id),
        })
    }

    /// Complete value of the API-key request header
    pub fn api_key_header(&self) -> String<MAX_API_HEADER_LEN> {
        let mut header = String::new();
        // Capacity covers the longest storable key
        let _ = write!(header, "{}: {}", API_KEY_HEADER, self.api_key.expose());
        header
    }
}
