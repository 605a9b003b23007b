//! Traffic Manager presentation objects

use crate::resource::Named;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Traffic Manager profile as shown to and accepted from the user
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TrafficManagerProfile {
    pub name: String,
    pub resource_group_name: String,
    pub relative_dns_name: Option<String>,
    pub ttl: Option<u32>,
    pub profile_status: Option<String>,
    pub traffic_routing_method: Option<String>,
    pub monitor_protocol: Option<String>,
    pub monitor_port: Option<u32>,
    pub monitor_path: Option<String>,
    pub endpoints: Option<Vec<TrafficManagerEndpoint>>,
    pub tags: Option<BTreeMap<String, String>>,
}

/// Traffic Manager endpoint as shown to and accepted from the user
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TrafficManagerEndpoint {
    pub name: String,
    pub resource_group_name: String,
    pub profile_name: String,
    /// `AzureEndpoints`, `ExternalEndpoints` or `NestedEndpoints`
    #[serde(rename = "Type")]
    pub endpoint_type: String,
    pub target_resource_id: Option<String>,
    pub target: Option<String>,
    pub endpoint_status: Option<String>,
    pub location: Option<String>,
    pub priority: Option<u32>,
    pub weight: Option<u32>,
    pub endpoint_monitor_status: Option<String>,
}

impl Named for TrafficManagerEndpoint {
    fn name(&self) -> &str {
        &self.name
    }
}
