//! Network presentation objects

use crate::resource::Named;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Reference to another resource by ID
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ResourceRef {
    pub id: String,
}

impl ResourceRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FrontendIpConfiguration {
    pub name: String,
    pub id: Option<String>,
    pub etag: Option<String>,
    pub private_ip_address: Option<String>,
    /// `Static` or `Dynamic`
    pub private_ip_allocation_method: Option<String>,
    pub subnet: Option<ResourceRef>,
    pub public_ip_address: Option<ResourceRef>,
    pub provisioning_state: Option<String>,
}

impl Named for FrontendIpConfiguration {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Load balancer.
///
/// Only frontend IP configurations are modelled field by field; pools, rules,
/// probes and NAT rules travel in their wire form so a `set` does not drop them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LoadBalancer {
    pub name: String,
    pub resource_group_name: String,
    pub location: Option<String>,
    pub id: Option<String>,
    pub etag: Option<String>,
    pub tags: Option<BTreeMap<String, String>>,
    pub frontend_ip_configurations: Option<Vec<FrontendIpConfiguration>>,
    pub backend_address_pools: Option<Vec<Value>>,
    pub load_balancing_rules: Option<Vec<Value>>,
    pub probes: Option<Vec<Value>>,
    pub inbound_nat_rules: Option<Vec<Value>>,
    pub provisioning_state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SecurityRule {
    pub name: String,
    pub id: Option<String>,
    pub etag: Option<String>,
    pub description: Option<String>,
    pub protocol: Option<String>,
    pub source_port_range: Option<String>,
    pub destination_port_range: Option<String>,
    pub source_address_prefix: Option<String>,
    pub destination_address_prefix: Option<String>,
    pub access: Option<String>,
    pub priority: Option<u32>,
    pub direction: Option<String>,
    pub provisioning_state: Option<String>,
}

impl Named for SecurityRule {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NetworkSecurityGroup {
    pub name: String,
    pub resource_group_name: String,
    pub location: Option<String>,
    pub id: Option<String>,
    pub etag: Option<String>,
    pub tags: Option<BTreeMap<String, String>>,
    pub security_rules: Option<Vec<SecurityRule>>,
    pub default_security_rules: Option<Vec<SecurityRule>>,
    pub provisioning_state: Option<String>,
}
