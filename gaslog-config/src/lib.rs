//! Typed configuration for GasLog radio nodes
//!
//! GasLog is a gas-meter logging setup built from RFM12B radio nodes: pulse
//! loggers on the meters and one gateway that uploads readings to a Pachube
//! feed. This crate holds the per-node configuration those roles share:
//!
//! - Radio mesh settings (node ID, network group, frequency band, sync mode,
//!   collect flag)
//! - Telemetry endpoint settings for the gateway (host, API key, feed path)
//! - Startup validation and mesh-consistency checks
//! - A minimal TOML loader and the shipped device profiles
//!
//! Every value is range-checked at construction, so a misconfigured node
//! fails at build or startup instead of silently dropping off the mesh.
//! Radio driving and HTTP upload live in the node firmware, not here.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod error;
pub mod node;
pub mod profiles;
pub mod radio;
pub mod telemetry;
pub mod toml;

pub use error::ConfigError;
pub use node::{check_mesh, NodeConfig};
pub use radio::{
    FrequencyBand, NetworkGroup, NodeId, RadioConfig, SyncMode, COLLECT_MODE, MAX_GROUP,
    MAX_NODE_ID, MIN_GROUP, MIN_NODE_ID,
};
pub use telemetry::{
    pachube_feed_path, ApiKey, FeedPath, Host, TelemetryConfig, API_KEY_HEADER, PACHUBE_HOST,
};
pub use toml::{parse_config, ParseError};
