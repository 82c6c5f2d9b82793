//! Configuration validation errors
//!
//! Every failure here is fatal at startup: a node that proceeds with an
//! out-of-range ID or a malformed endpoint silently drops off the mesh or
//! uploads into the void, so callers are expected to abort initialization
//! on any `Err`.

/// Errors raised while validating node configuration values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Node ID outside 1..=30
    NodeIdOutOfRange(u8),
    /// Network group outside 1..=250
    GroupOutOfRange(u8),
    /// Band code or label is not one of the three supported bands
    UnknownBand,
    /// Sync mode outside 0..=3
    InvalidSyncMode(u8),
    /// Telemetry host is empty, too long, or not a bare hostname
    InvalidHost,
    /// Telemetry API key is empty, too long, or not header-safe
    InvalidApiKey,
    /// Telemetry feed path is not an absolute URL path
    InvalidFeedPath,
    /// Two cooperating nodes share the same node ID
    DuplicateNodeId(u8),
    /// Cooperating nodes disagree on network group or frequency band
    MeshMismatch,
}
