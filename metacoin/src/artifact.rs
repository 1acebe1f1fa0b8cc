//! Truffle build artifacts (`build/contracts/<Name>.json`).
//!
//! Only the parts needed to locate a deployment are decoded; the ABI is
//! kept as raw JSON since calls go through the `sol!` binding in
//! [`crate::abi`].
use std::collections::HashMap;
use std::path::Path;

use alloy::primitives::Address;
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    #[serde(default)]
    pub abi: serde_json::Value,
    #[serde(default)]
    pub networks: HashMap<String, NetworkEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkEntry {
    pub address: Address,
}

impl Artifact {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read artifact {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Failed to parse artifact {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Address of the deployment recorded for `network_id` (the node's
    /// `net_version`, which is what Truffle keys `networks` by).
    pub fn deployed_address(&self, network_id: u64) -> Result<Address> {
        self.networks
            .get(&network_id.to_string())
            .map(|n| n.address)
            .ok_or_else(|| {
                anyhow!(
                    "{} has not been deployed to detected network ({network_id})",
                    self.contract_name
                )
            })
    }
}
