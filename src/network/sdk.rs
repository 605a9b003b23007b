//! Network wire model (`Microsoft.Network`)

use crate::resource::EnumMapping;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubResource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadBalancer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<LoadBalancerProperties>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadBalancerProperties {
    #[serde(
        rename = "frontendIPConfigurations",
        skip_serializing_if = "Option::is_none"
    )]
    pub frontend_ip_configurations: Option<Vec<FrontendIpConfiguration>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_address_pools: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_balancing_rules: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probes: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inbound_nat_rules: Option<Vec<Value>>,
    /// Server-assigned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrontendIpConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<FrontendIpConfigurationProperties>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrontendIpConfigurationProperties {
    #[serde(rename = "privateIPAddress", skip_serializing_if = "Option::is_none")]
    pub private_ip_address: Option<String>,
    #[serde(
        rename = "privateIPAllocationMethod",
        skip_serializing_if = "Option::is_none"
    )]
    pub private_ip_allocation_method: Option<IpAllocationMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet: Option<SubResource>,
    #[serde(rename = "publicIPAddress", skip_serializing_if = "Option::is_none")]
    pub public_ip_address: Option<SubResource>,
    #[serde(rename = "provisioningState", skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSecurityGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<NetworkSecurityGroupProperties>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSecurityGroupProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_rules: Option<Vec<SecurityRule>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_security_rules: Option<Vec<SecurityRule>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SecurityRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<SecurityRuleProperties>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityRuleProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<SecurityRuleProtocol>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_port_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_port_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_address_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_address_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<Access>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IpAllocationMethod {
    Static,
    Dynamic,
}

impl EnumMapping for IpAllocationMethod {
    const KIND: &'static str = "IP allocation method";
    const VARIANTS: &'static [Self] = &[IpAllocationMethod::Static, IpAllocationMethod::Dynamic];

    fn as_str(self) -> &'static str {
        match self {
            IpAllocationMethod::Static => "Static",
            IpAllocationMethod::Dynamic => "Dynamic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecurityRuleProtocol {
    Tcp,
    Udp,
    Icmp,
    #[serde(rename = "*")]
    Any,
}

impl EnumMapping for SecurityRuleProtocol {
    const KIND: &'static str = "security rule protocol";
    const VARIANTS: &'static [Self] = &[
        SecurityRuleProtocol::Tcp,
        SecurityRuleProtocol::Udp,
        SecurityRuleProtocol::Icmp,
        SecurityRuleProtocol::Any,
    ];

    fn as_str(self) -> &'static str {
        match self {
            SecurityRuleProtocol::Tcp => "Tcp",
            SecurityRuleProtocol::Udp => "Udp",
            SecurityRuleProtocol::Icmp => "Icmp",
            SecurityRuleProtocol::Any => "*",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Access {
    Allow,
    Deny,
}

impl EnumMapping for Access {
    const KIND: &'static str = "security rule access";
    const VARIANTS: &'static [Self] = &[Access::Allow, Access::Deny];

    fn as_str(self) -> &'static str {
        match self {
            Access::Allow => "Allow",
            Access::Deny => "Deny",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Inbound,
    Outbound,
}

impl EnumMapping for Direction {
    const KIND: &'static str = "security rule direction";
    const VARIANTS: &'static [Self] = &[Direction::Inbound, Direction::Outbound];

    fn as_str(self) -> &'static str {
        match self {
            Direction::Inbound => "Inbound",
            Direction::Outbound => "Outbound",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_frontend_wire_names() {
        let fe = FrontendIpConfiguration {
            name: Some("fe1".to_string()),
            properties: Some(FrontendIpConfigurationProperties {
                private_ip_address: Some("10.0.0.4".to_string()),
                private_ip_allocation_method: Some(IpAllocationMethod::Static),
                subnet: Some(SubResource {
                    id: Some("/subnet".to_string()),
                }),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&fe).unwrap(),
            json!({
                "name": "fe1",
                "properties": {
                    "privateIPAddress": "10.0.0.4",
                    "privateIPAllocationMethod": "Static",
                    "subnet": {"id": "/subnet"}
                }
            })
        );
    }

    #[test]
    fn test_any_protocol_is_star() {
        let rule: SecurityRuleProperties =
            serde_json::from_value(json!({"protocol": "*", "access": "Deny"})).unwrap();
        assert_eq!(rule.protocol, Some(SecurityRuleProtocol::Any));
        assert_eq!(SecurityRuleProtocol::parse("*").unwrap(), SecurityRuleProtocol::Any);
        assert!(Direction::parse("sideways").is_err());
    }
}
