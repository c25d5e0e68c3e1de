use std::fmt::Display;

use serde::{Serialize, Deserialize};

use crate::{regional_parameters::version::PHYVersion, utils::eui::EUI64};

/// The regional reference an end device record carries: the frequency plan it
/// is deployed under and the PHY version it implements.
///
/// The declared version can be edited at any time, but a joined device stays
/// bound to the version pinned when it joined until it joins again.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Device {
    dev_eui: EUI64,
    frequency_plan_id: String,
    lorawan_phy_version: PHYVersion,
    #[serde(default)]
    joined_phy_version: Option<PHYVersion>,
}

impl Device {
    pub fn new(dev_eui: EUI64, frequency_plan_id: impl Into<String>, lorawan_phy_version: PHYVersion) -> Self {
        Self {
            dev_eui,
            frequency_plan_id: frequency_plan_id.into(),
            lorawan_phy_version,
            joined_phy_version: None,
        }
    }

    /// Get the device's dev eui.
    pub fn dev_eui(&self) -> &EUI64 {
        &self.dev_eui
    }

    /// Get a reference to the device's frequency plan id.
    pub fn frequency_plan_id(&self) -> &str {
        &self.frequency_plan_id
    }

    /// Get a reference to the device's declared PHY version.
    pub fn lorawan_phy_version(&self) -> &PHYVersion {
        &self.lorawan_phy_version
    }

    /// PHY version pinned at the last join, if the device joined.
    pub fn joined_phy_version(&self) -> Option<&PHYVersion> {
        self.joined_phy_version.as_ref()
    }

    /// Version resolution must use: the pinned one once joined.
    pub fn effective_phy_version(&self) -> &PHYVersion {
        self.joined_phy_version.as_ref().unwrap_or(&self.lorawan_phy_version)
    }

    pub fn set_lorawan_phy_version(&mut self, version: PHYVersion) {
        self.lorawan_phy_version = version;
    }

    pub fn set_frequency_plan_id(&mut self, frequency_plan_id: impl Into<String>) {
        self.frequency_plan_id = frequency_plan_id.into();
    }

    /// Pins the declared version, called when a join accept is issued.
    pub fn join(&mut self) {
        self.joined_phy_version = Some(self.lorawan_phy_version);
    }

    pub fn is_joined(&self) -> bool {
        self.joined_phy_version.is_some()
    }

    pub fn reset_session(&mut self) {
        self.joined_phy_version = None;
    }
}

impl Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, PHY {})", self.dev_eui, self.frequency_plan_id, self.effective_phy_version())
    }
}
