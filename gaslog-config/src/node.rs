//! Per-node configuration assembly
//!
//! A [`NodeConfig`] is everything one GasLog node needs to join the mesh:
//! its radio settings plus, on the gateway, the telemetry endpoint. Logger
//! nodes carry no telemetry section.
//!
//! Configs built through the typed constructors are valid by construction.
//! Configs that arrive through serde skip those constructors, so every
//! deserialized config must pass [`NodeConfig::validate`] before use.

use crate::error::ConfigError;
use crate::radio::{NetworkGroup, NodeId, RadioConfig};
use crate::telemetry::{ApiKey, FeedPath, Host, TelemetryConfig};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Complete configuration for one node
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeConfig {
    /// RFM12B mesh settings
    pub radio: RadioConfig,
    /// Upload endpoint, present only on the gateway
    pub telemetry: Option<TelemetryConfig>,
}

impl NodeConfig {
    /// Logger-node config with no telemetry endpoint
    pub const fn new(radio: RadioConfig) -> Self {
        Self {
            radio,
            telemetry: None,
        }
    }

    /// Attach a telemetry endpoint, making this a gateway config
    pub fn with_telemetry(mut self, telemetry: TelemetryConfig) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Whether this node uploads readings upstream
    pub fn is_gateway(&self) -> bool {
        self.telemetry.is_some()
    }

    /// Re-check every range and format constraint
    ///
    /// Serde derives write fields directly, bypassing the checked
    /// constructors. Call this once at startup on any config that was
    /// deserialized rather than built in code.
    pub fn validate(&self) -> Result<(), ConfigError> {
        NodeId::new(self.radio.node_id.get())?;
        NetworkGroup::new(self.radio.group.get())?;
        if let Some(telemetry) = &self.telemetry {
            Host::new(telemetry.host.as_str())?;
            ApiKey::new(telemetry.api_key.expose())?;
            FeedPath::new(telemetry.feed.as_str())?;
        }
        Ok(())
    }
}

/// Check that a set of nodes forms one coherent mesh
///
/// Every node must share the first node's group and band, and no two nodes
/// may claim the same node ID. An empty slice passes.
pub fn check_mesh(nodes: &[NodeConfig]) -> Result<(), ConfigError> {
    if nodes.is_empty() {
        return Ok(());
    }
    let reference = &nodes[0].radio;
    for node in nodes {
        if !node.radio.shares_mesh(reference) {
            return Err(ConfigError::MeshMismatch);
        }
    }
    for (index, node) in nodes.iter().enumerate() {
        for other in &nodes[index + 1..] {
            if node.radio.node_id == other.radio.node_id {
                return Err(ConfigError::DuplicateNodeId(node.radio.node_id.get()));
            }
        }
    }
    Ok(())
}
