//! RFM12B radio settings
//!
//! These types replace the per-board preprocessor constants the node
//! firmwares were originally configured with. Ranges are checked at
//! construction, so a settings value that exists is a settings value the
//! radio driver can accept.
//!
//! All constructors are `const fn`: a firmware that defines its radio
//! settings as a `const` item gets the range checks at build time.

use crate::error::ConfigError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lowest assignable node ID
pub const MIN_NODE_ID: u8 = 1;

/// Highest assignable node ID
pub const MAX_NODE_ID: u8 = 30;

/// Lowest network group
pub const MIN_GROUP: u8 = 1;

/// Highest network group
pub const MAX_GROUP: u8 = 250;

/// Collect-mode bit of the driver identifier byte
///
/// A node with this bit set passes incoming packets through without
/// sending acknowledgements.
pub const COLLECT_MODE: u8 = 0x20;

// RFM12B driver band codes
const BAND_433_CODE: u8 = 1;
const BAND_868_CODE: u8 = 2;
const BAND_915_CODE: u8 = 3;

/// Node identifier on the radio mesh
///
/// Valid IDs are 1..=30 and must be unique among the devices on one
/// network group. ID 30 is reserved for the base station by convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(u8);

impl NodeId {
    /// Node ID reserved for the base station
    pub const BASE_STATION: NodeId = NodeId(30);

    /// Create a node ID, checking the 1..=30 range
    pub const fn new(raw: u8) -> Result<Self, ConfigError> {
        if raw >= MIN_NODE_ID && raw <= MAX_NODE_ID {
            Ok(NodeId(raw))
        } else {
            Err(ConfigError::NodeIdOutOfRange(raw))
        }
    }

    /// Raw identifier value
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Whether this is the conventional base-station ID
    pub const fn is_base_station(self) -> bool {
        self.0 == Self::BASE_STATION.0
    }
}

/// Network group shared by all cooperating nodes
///
/// Valid groups are 1..=250. Nodes that are expected to exchange packets
/// must be configured with the same group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NetworkGroup(u8);

impl NetworkGroup {
    /// Create a network group, checking the 1..=250 range
    pub const fn new(raw: u8) -> Result<Self, ConfigError> {
        if raw >= MIN_GROUP && raw <= MAX_GROUP {
            Ok(NetworkGroup(raw))
        } else {
            Err(ConfigError::GroupOutOfRange(raw))
        }
    }

    /// Raw group value
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for NetworkGroup {
    /// The stock GasLog network group (210)
    fn default() -> Self {
        NetworkGroup(210)
    }
}

/// RFM12B frequency band
///
/// Must match the module that is physically installed; the driver will
/// happily tune a 868 MHz module to a 433 MHz channel and nothing will
/// ever be received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FrequencyBand {
    /// 433 MHz ISM band
    Mhz433,
    /// 868 MHz ISM band, fitted on the stock GasLog boards
    #[default]
    Mhz868,
    /// 915 MHz ISM band
    Mhz915,
}

impl FrequencyBand {
    /// Parse from an RFM12B driver band code
    pub const fn from_code(code: u8) -> Result<Self, ConfigError> {
        match code {
            BAND_433_CODE => Ok(FrequencyBand::Mhz433),
            BAND_868_CODE => Ok(FrequencyBand::Mhz868),
            BAND_915_CODE => Ok(FrequencyBand::Mhz915),
            _ => Err(ConfigError::UnknownBand),
        }
    }

    /// RFM12B driver band code
    pub const fn code(self) -> u8 {
        match self {
            FrequencyBand::Mhz433 => BAND_433_CODE,
            FrequencyBand::Mhz868 => BAND_868_CODE,
            FrequencyBand::Mhz915 => BAND_915_CODE,
        }
    }

    /// Human-readable label
    pub const fn label(self) -> &'static str {
        match self {
            FrequencyBand::Mhz433 => "433MHz",
            FrequencyBand::Mhz868 => "868MHz",
            FrequencyBand::Mhz915 => "915MHz",
        }
    }

    /// Parse from a label like "868MHz" (a bare "868" is also accepted)
    pub fn from_label(label: &str) -> Result<Self, ConfigError> {
        match label {
            "433" | "433MHz" | "433mhz" => Ok(FrequencyBand::Mhz433),
            "868" | "868MHz" | "868mhz" => Ok(FrequencyBand::Mhz868),
            "915" | "915MHz" | "915mhz" => Ok(FrequencyBand::Mhz915),
            _ => Err(ConfigError::UnknownBand),
        }
    }
}

/// Power-down behavior while the driver waits for a send to complete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SyncMode {
    /// Busy-wait without sleeping
    Polling,
    /// Sleep in idle mode
    Idle,
    /// Sleep in standby; safe with the stock Arduino fuse settings
    #[default]
    Standby,
    /// Full power-down; requires the 258 CK startup fuse configuration
    PowerDown,
}

impl SyncMode {
    /// Parse from the driver mode value (0..=3)
    pub const fn from_mode(mode: u8) -> Result<Self, ConfigError> {
        match mode {
            0 => Ok(SyncMode::Polling),
            1 => Ok(SyncMode::Idle),
            2 => Ok(SyncMode::Standby),
            3 => Ok(SyncMode::PowerDown),
            _ => Err(ConfigError::InvalidSyncMode(mode)),
        }
    }

    /// Driver mode value
    pub const fn mode(self) -> u8 {
        match self {
            SyncMode::Polling => 0,
            SyncMode::Idle => 1,
            SyncMode::Standby => 2,
            SyncMode::PowerDown => 3,
        }
    }
}

/// Radio settings for one node
///
/// Holds everything the radio driver needs at initialization. Fields are
/// already-validated types, so a `RadioConfig` cannot describe settings
/// the driver would reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RadioConfig {
    /// This device's identifier on the mesh
    pub node_id: NodeId,
    /// Network group shared by every cooperating node
    pub group: NetworkGroup,
    /// Frequency band of the installed module
    pub band: FrequencyBand,
    /// Sleep behavior while waiting for a send to complete
    pub sync_mode: SyncMode,
    /// Collect mode: receive without sending acknowledgements
    pub collect: bool,
}

impl RadioConfig {
    /// Create radio settings with the default sync mode and collect off
    pub const fn new(node_id: NodeId, group: NetworkGroup, band: FrequencyBand) -> Self {
        Self {
            node_id,
            group,
            band,
            sync_mode: SyncMode::Standby,
            collect: false,
        }
    }

    /// Override the sync mode
    pub const fn with_sync_mode(mut self, sync_mode: SyncMode) -> Self {
        self.sync_mode = sync_mode;
        self
    }

    /// Enable collect mode
    pub const fn with_collect(mut self) -> Self {
        self.collect = true;
        self
    }

    /// Identifier byte handed to the radio driver at initialization
    ///
    /// The node ID with the collect bit applied. The ID range tops out at
    /// 30, so the collect bit never collides with the identifier.
    pub const fn identifier_byte(&self) -> u8 {
        if self.collect {
            self.node_id.get() | COLLECT_MODE
        } else {
            self.node_id.get()
        }
    }

    /// Whether this node and `other` can exchange packets
    ///
    /// True when both are on the same network group and frequency band.
    pub const fn shares_mesh(&self, other: &RadioConfig) -> bool {
        self.group.get() == other.group.get() && self.band.code() == other.band.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_node_id_bounds() {
        assert_eq!(NodeId::new(1).unwrap().get(), 1);
        assert_eq!(NodeId::new(30).unwrap().get(), 30);
        assert_eq!(NodeId::new(0), Err(ConfigError::NodeIdOutOfRange(0)));
        assert_eq!(NodeId::new(31), Err(ConfigError::NodeIdOutOfRange(31)));
    }

    #[test]
    fn test_base_station_id() {
        assert!(NodeId::BASE_STATION.is_base_station());
        assert_eq!(NodeId::BASE_STATION.get(), 30);
        assert!(!NodeId::new(10).unwrap().is_base_station());
    }

    #[test]
    fn test_group_bounds() {
        assert_eq!(NetworkGroup::new(1).unwrap().get(), 1);
        assert_eq!(NetworkGroup::new(250).unwrap().get(), 250);
        assert_eq!(NetworkGroup::new(0), Err(ConfigError::GroupOutOfRange(0)));
        assert_eq!(NetworkGroup::new(251), Err(ConfigError::GroupOutOfRange(251)));
    }

    #[test]
    fn test_group_default_is_stock_network() {
        assert_eq!(NetworkGroup::default().get(), 210);
        assert!(NetworkGroup::new(NetworkGroup::default().get()).is_ok());
    }

    #[test]
    fn test_band_code_roundtrip() {
        let bands = [
            FrequencyBand::Mhz433,
            FrequencyBand::Mhz868,
            FrequencyBand::Mhz915,
        ];

        for band in bands {
            assert_eq!(FrequencyBand::from_code(band.code()).unwrap(), band);
        }
    }

    #[test]
    fn test_band_label_roundtrip() {
        let bands = [
            FrequencyBand::Mhz433,
            FrequencyBand::Mhz868,
            FrequencyBand::Mhz915,
        ];

        for band in bands {
            assert_eq!(FrequencyBand::from_label(band.label()).unwrap(), band);
        }
    }

    #[test]
    fn test_band_rejects_unknown() {
        assert_eq!(FrequencyBand::from_code(0), Err(ConfigError::UnknownBand));
        assert_eq!(FrequencyBand::from_code(4), Err(ConfigError::UnknownBand));
        assert_eq!(
            FrequencyBand::from_label("866MHz"),
            Err(ConfigError::UnknownBand)
        );
    }

    #[test]
    fn test_sync_mode_values() {
        assert_eq!(SyncMode::from_mode(2).unwrap(), SyncMode::Standby);
        assert_eq!(SyncMode::from_mode(3).unwrap(), SyncMode::PowerDown);
        assert_eq!(SyncMode::from_mode(4), Err(ConfigError::InvalidSyncMode(4)));
        assert_eq!(SyncMode::Standby.mode(), 2);
        assert_eq!(SyncMode::default(), SyncMode::Standby);
    }

    #[test]
    fn test_identifier_byte() {
        let config = RadioConfig::new(
            NodeId::new(10).unwrap(),
            NetworkGroup::new(210).unwrap(),
            FrequencyBand::Mhz868,
        );
        assert_eq!(config.identifier_byte(), 10);

        let collecting = config.with_collect();
        assert_eq!(collecting.identifier_byte(), 10 | COLLECT_MODE);
        assert_eq!(collecting.identifier_byte(), 0x2A);
    }

    #[test]
    fn test_shares_mesh() {
        let a = RadioConfig::new(
            NodeId::new(10).unwrap(),
            NetworkGroup::new(210).unwrap(),
            FrequencyBand::Mhz868,
        );
        let b = RadioConfig::new(
            NodeId::new(2).unwrap(),
            NetworkGroup::new(210).unwrap(),
            FrequencyBand::Mhz868,
        );
        assert!(a.shares_mesh(&b));

        let other_group = RadioConfig::new(
            NodeId::new(2).unwrap(),
            NetworkGroup::new(5).unwrap(),
            FrequencyBand::Mhz868,
        );
        assert!(!a.shares_mesh(&other_group));

        let other_band = RadioConfig::new(
            NodeId::new(2).unwrap(),
            NetworkGroup::new(210).unwrap(),
            FrequencyBand::Mhz433,
        );
        assert!(!a.shares_mesh(&other_band));
    }

    #[test]
    fn test_const_construction() {
        // Build-time assertion: this item fails to compile if the values
        // ever drift out of range.
        const RADIO: RadioConfig = RadioConfig::new(
            match NodeId::new(10) {
                Ok(id) => id,
                Err(_) => panic!("node id out of range"),
            },
            match NetworkGroup::new(210) {
                Ok(group) => group,
                Err(_) => panic!("group out of range"),
            },
            FrequencyBand::Mhz868,
        );
        assert_eq!(RADIO.node_id.get(), 10);
        assert_eq!(RADIO.group.get(), 210);
    }

    proptest! {
        #[test]
        fn test_node_id_accepts_valid_range(raw in MIN_NODE_ID..=MAX_NODE_ID) {
            prop_assert_eq!(NodeId::new(raw).unwrap().get(), raw);
        }

        #[test]
        fn test_node_id_rejects_out_of_range(
            raw in prop_oneof![Just(0u8), (MAX_NODE_ID + 1)..=u8::MAX]
        ) {
            prop_assert_eq!(NodeId::new(raw), Err(ConfigError::NodeIdOutOfRange(raw)));
        }

        #[test]
        fn test_group_accepts_valid_range(raw in MIN_GROUP..=MAX_GROUP) {
            prop_assert_eq!(NetworkGroup::new(raw).unwrap().get(), raw);
        }

        #[test]
        fn test_group_rejects_out_of_range(
            raw in prop_oneof![Just(0u8), (MAX_GROUP + 1)..=u8::MAX]
        ) {
            prop_assert_eq!(NetworkGroup::new(raw), Err(ConfigError::GroupOutOfRange(raw)));
        }

        #[test]
        fn test_collect_bit_never_corrupts_id(raw in MIN_NODE_ID..=MAX_NODE_ID) {
            let config = RadioConfig::new(
                NodeId::new(raw).unwrap(),
                NetworkGroup::new(210).unwrap(),
                FrequencyBand::Mhz868,
            )
            .with_collect();
            prop_assert_eq!(config.identifier_byte() & !COLLECT_MODE, raw);
            prop_assert_ne!(config.identifier_byte() & COLLECT_MODE, 0);
        }
    }
}
