//! Shipped device profiles
//!
//! The two node roles deployed in the original GasLog installation: a
//! JeeNode pulse logger mounted on the gas meter, and a Nanode gateway that
//! uploads readings to Pachube. Profile radio values are const-constructed,
//! so editing one out of range fails the build rather than the mesh.
//!
//! The two recorded deployments used different network groups (210 and 5),
//! so these profiles do not share a mesh as-is. Nodes meant to talk to each
//! other must be given the same group and band.

use crate::error::ConfigError;
use crate::node::NodeConfig;
use crate::radio::{FrequencyBand, NetworkGroup, NodeId, RadioConfig};
use crate::telemetry::TelemetryConfig;

const fn node_id(raw: u8) -> NodeId {
    match NodeId::new(raw) {
        Ok(id) => id,
        Err(_) => panic!("profile node id out of range"),
    }
}

const fn network_group(raw: u8) -> NetworkGroup {
    match NetworkGroup::new(raw) {
        Ok(group) => group,
        Err(_) => panic!("profile network group out of range"),
    }
}

/// Pulse-logger node on the gas meter
///
/// Standby sync mode suits stock Arduino fuses. Collect mode is off; enable
/// it with [`RadioConfig::with_collect`] for a node that should never ack.
pub const JEENODE_LOGGER: NodeConfig = NodeConfig::new(RadioConfig::new(
    node_id(10),
    network_group(210),
    FrequencyBand::Mhz868,
));

/// Radio settings of the Nanode upload gateway
pub const NANODE_GATEWAY_RADIO: RadioConfig =
    RadioConfig::new(node_id(2), network_group(5), FrequencyBand::Mhz868);

/// Gateway node config with a caller-supplied Pachube credential
///
/// The API key is a secret and is never shipped in this crate. Pass the
/// deployment's key and numeric feed ID.
pub fn nanode_gateway(api_key: &str, feed_id: u32) -> Result<NodeConfig, ConfigError> {
    let telemetry = TelemetryConfig::pachube(api_key, feed_id)?;
    Ok(NodeConfig::new(NANODE_GATEWAY_RADIO).with_telemetry(telemetry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radio::SyncMode;
    use crate::telemetry::PACHUBE_HOST;

    #[test]
    fn test_logger_profile_matches_deployment() {
        assert_eq!(JEENODE_LOGGER.radio.node_id.get(), 10);
        assert_eq!(JEENODE_LOGGER.radio.group.get(), 210);
        assert_eq!(JEENODE_LOGGER.radio.band, FrequencyBand::Mhz868);
        assert_eq!(JEENODE_LOGGER.radio.sync_mode, SyncMode::Standby);
        assert_eq!(JEENODE_LOGGER.radio.sync_mode.mode(), 2);
        assert!(!JEENODE_LOGGER.radio.collect);
        assert!(!JEENODE_LOGGER.is_gateway());
        assert_eq!(JEENODE_LOGGER.validate(), Ok(()));
    }

    #[test]
    fn test_gateway_profile_matches_deployment() {
        let config = nanode_gateway("ABCDEF123", 999).unwrap();
        assert_eq!(config.radio.node_id.get(), 2);
        assert_eq!(config.radio.group.get(), 5);
        assert_eq!(config.radio.band, FrequencyBand::Mhz868);
        assert!(config.is_gateway());
        assert_eq!(config.validate(), Ok(()));

        let telemetry = config.telemetry.unwrap();
        assert_eq!(telemetry.host.as_str(), PACHUBE_HOST);
        assert_eq!(telemetry.feed.as_str(), "/v2/feeds/999.csv");
    }

    #[test]
    fn test_gateway_rejects_malformed_key() {
        assert_eq!(nanode_gateway("", 999), Err(ConfigError::InvalidApiKey));
        assert_eq!(nanode_gateway("has space", 999), Err(ConfigError::InvalidApiKey));
    }

    #[test]
    fn test_recorded_deployments_use_separate_groups() {
        // The original headers disagree on the group; kept as recorded.
        assert!(!JEENODE_LOGGER.radio.shares_mesh(&NANODE_GATEWAY_RADIO));
    }

    #[test]
    fn test_profiles_leave_base_station_id_free() {
        assert!(!JEENODE_LOGGER.radio.node_id.is_base_station());
        assert!(!NANODE_GATEWAY_RADIO.node_id.is_base_station());
    }
}
