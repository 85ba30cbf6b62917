//! Remote client triggers — asking a managed computer to run one of its
//! built-in maintenance actions now.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use sw_domain::error::{Error, Result};
use sw_store::{ExecRequest, ManagementStore, QueryRequest};

use crate::util::find_one;

/// Client-side actions an administrator can request remotely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientAction {
    MachinePolicyRefresh,
    HardwareInventory,
    SoftwareInventory,
    DiscoveryData,
    SoftwareUpdatesScan,
}

impl ClientAction {
    pub const ALL: [ClientAction; 5] = [
        Self::MachinePolicyRefresh,
        Self::HardwareInventory,
        Self::SoftwareInventory,
        Self::DiscoveryData,
        Self::SoftwareUpdatesScan,
    ];

    /// The name the provider's `TriggerAction` method expects.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::MachinePolicyRefresh => "MachinePolicyRefresh",
            Self::HardwareInventory => "HardwareInventory",
            Self::SoftwareInventory => "SoftwareInventory",
            Self::DiscoveryData => "DiscoveryData",
            Self::SoftwareUpdatesScan => "SoftwareUpdatesScan",
        }
    }

    /// The kebab-case name used on the command line.
    pub fn cli_name(self) -> &'static str {
        match self {
            Self::MachinePolicyRefresh => "machine-policy-refresh",
            Self::HardwareInventory => "hardware-inventory",
            Self::SoftwareInventory => "software-inventory",
            Self::DiscoveryData => "discovery-data",
            Self::SoftwareUpdatesScan => "software-updates-scan",
        }
    }
}

impl fmt::Display for ClientAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cli_name())
    }
}

impl FromStr for ClientAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.cli_name() == s || a.wire_name() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|a| a.cli_name()).collect();
                Error::Parse(format!(
                    "unknown client action '{s}' (valid: {})",
                    valid.join(", ")
                ))
            })
    }
}

/// Fire one client action on one computer. A single remote invocation;
/// the provider's return code is surfaced unchanged.
pub async fn trigger_client_action(
    store: &dyn ManagementStore,
    resource_id: u32,
    action: ClientAction,
) -> Result<i64> {
    let computer = find_one(
        store,
        QueryRequest::all("Computer").with("ResourceID", resource_id),
        format!("computer {resource_id}"),
    )
    .await?;

    let resp = store
        .exec_method(
            computer.require_path()?,
            "TriggerAction",
            ExecRequest::default().with("Action", action.wire_name()),
        )
        .await?;
    tracing::debug!(
        resource_id,
        action = action.wire_name(),
        return_value = resp.return_value,
        "client action triggered"
    );
    Ok(resp.return_value)
}
