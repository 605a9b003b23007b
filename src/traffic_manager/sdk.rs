//! Traffic Manager wire model (`Microsoft.Network/trafficManagerProfiles`)

use crate::resource::EnumMapping;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<ProfileProperties>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traffic_routing_method: Option<TrafficRoutingMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_config: Option<DnsConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor_config: Option<MonitorConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<Vec<Endpoint>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_name: Option<String>,
    /// Server-assigned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fqdn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_monitor_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<MonitorProtocol>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<EndpointProperties>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_resource_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_location: Option<String>,
    /// Server-assigned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_monitor_status: Option<String>,
}

/// Profile and endpoint status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Enabled,
    Disabled,
}

impl EnumMapping for Status {
    const KIND: &'static str = "status";
    const VARIANTS: &'static [Self] = &[Status::Enabled, Status::Disabled];

    fn as_str(self) -> &'static str {
        match self {
            Status::Enabled => "Enabled",
            Status::Disabled => "Disabled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrafficRoutingMethod {
    Performance,
    Weighted,
    Priority,
    Geographic,
    MultiValue,
    Subnet,
}

impl EnumMapping for TrafficRoutingMethod {
    const KIND: &'static str = "traffic routing method";
    const VARIANTS: &'static [Self] = &[
        TrafficRoutingMethod::Performance,
        TrafficRoutingMethod::Weighted,
        TrafficRoutingMethod::Priority,
        TrafficRoutingMethod::Geographic,
        TrafficRoutingMethod::MultiValue,
        TrafficRoutingMethod::Subnet,
    ];

    fn as_str(self) -> &'static str {
        match self {
            TrafficRoutingMethod::Performance => "Performance",
            TrafficRoutingMethod::Weighted => "Weighted",
            TrafficRoutingMethod::Priority => "Priority",
            TrafficRoutingMethod::Geographic => "Geographic",
            TrafficRoutingMethod::MultiValue => "MultiValue",
            TrafficRoutingMethod::Subnet => "Subnet",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonitorProtocol {
    #[serde(rename = "HTTP")]
    Http,
    #[serde(rename = "HTTPS")]
    Https,
    #[serde(rename = "TCP")]
    Tcp,
}

impl EnumMapping for MonitorProtocol {
    const KIND: &'static str = "monitor protocol";
    const VARIANTS: &'static [Self] = &[MonitorProtocol::Http, MonitorProtocol::Https, MonitorProtocol::Tcp];

    fn as_str(self) -> &'static str {
        match self {
            MonitorProtocol::Http => "HTTP",
            MonitorProtocol::Https => "HTTPS",
            MonitorProtocol::Tcp => "TCP",
        }
    }
}

/// Endpoint kinds; the presentation uses the short name, the wire the full type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointType {
    Azure,
    External,
    Nested,
}

impl EnumMapping for EndpointType {
    const KIND: &'static str = "endpoint type";
    const VARIANTS: &'static [Self] = &[EndpointType::Azure, EndpointType::External, EndpointType::Nested];

    fn as_str(self) -> &'static str {
        match self {
            EndpointType::Azure => "AzureEndpoints",
            EndpointType::External => "ExternalEndpoints",
            EndpointType::Nested => "NestedEndpoints",
        }
    }
}

const ENDPOINT_TYPE_PREFIX: &str = "Microsoft.Network/trafficManagerProfiles/";

impl EndpointType {
    /// Segment used in endpoint URLs, e.g. `azureEndpoints`
    pub fn url_segment(self) -> &'static str {
        match self {
            EndpointType::Azure => "azureEndpoints",
            EndpointType::External => "externalEndpoints",
            EndpointType::Nested => "nestedEndpoints",
        }
    }

    /// Full ARM resource type
    pub fn sdk_type(self) -> String {
        format!("{}{}", ENDPOINT_TYPE_PREFIX, self.url_segment())
    }

    /// Accepts either the full ARM type or the presentation name
    pub fn from_sdk_type(value: &str) -> crate::Result<Self> {
        let short = value
            .rsplit_once('/')
            .map(|(_, last)| last)
            .unwrap_or(value);
        Self::parse(short)
    }
}
