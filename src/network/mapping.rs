//! Presentation <-> wire mapping for load balancers and security groups

use super::models::{
    FrontendIpConfiguration, LoadBalancer, NetworkSecurityGroup, ResourceRef, SecurityRule,
};
use super::sdk;
use super::sdk::{Access, Direction, IpAllocationMethod, SecurityRuleProtocol, SubResource};
use crate::error::Result;
use crate::resource::sync::try_synced_list;
use crate::resource::EnumMapping;

fn ref_to_sdk(r: &ResourceRef) -> SubResource {
    SubResource {
        id: Some(r.id.clone()),
    }
}

fn ref_from_sdk(r: &SubResource) -> Option<ResourceRef> {
    r.id.as_ref().map(ResourceRef::new)
}

pub fn frontend_to_sdk(fe: &FrontendIpConfiguration) -> Result<sdk::FrontendIpConfiguration> {
    Ok(sdk::FrontendIpConfiguration {
        id: fe.id.clone(),
        name: Some(fe.name.clone()),
        etag: fe.etag.clone(),
        properties: Some(sdk::FrontendIpConfigurationProperties {
            private_ip_address: fe.private_ip_address.clone(),
            private_ip_allocation_method: IpAllocationMethod::parse_opt(
                fe.private_ip_allocation_method.as_deref(),
            )?,
            subnet: fe.subnet.as_ref().map(ref_to_sdk),
            public_ip_address: fe.public_ip_address.as_ref().map(ref_to_sdk),
            provisioning_state: fe.provisioning_state.clone(),
        }),
    })
}

pub fn frontend_from_sdk(fe: &sdk::FrontendIpConfiguration) -> FrontendIpConfiguration {
    let props = fe.properties.clone().unwrap_or_default();
    FrontendIpConfiguration {
        name: fe.name.clone().unwrap_or_default(),
        id: fe.id.clone(),
        etag: fe.etag.clone(),
        private_ip_address: props.private_ip_address,
        private_ip_allocation_method: props
            .private_ip_allocation_method
            .map(|m| m.as_str().to_string()),
        subnet: props.subnet.as_ref().and_then(ref_from_sdk),
        public_ip_address: props.public_ip_address.as_ref().and_then(ref_from_sdk),
        provisioning_state: props.provisioning_state,
    }
}

pub fn load_balancer_to_sdk(lb: &LoadBalancer) -> Result<sdk::LoadBalancer> {
    Ok(sdk::LoadBalancer {
        id: lb.id.clone(),
        name: Some(lb.name.clone()),
        location: lb.location.clone(),
        etag: lb.etag.clone(),
        tags: lb.tags.clone(),
        properties: Some(sdk::LoadBalancerProperties {
            frontend_ip_configurations: try_synced_list(
                lb.frontend_ip_configurations.as_deref(),
                frontend_to_sdk,
            )?,
            backend_address_pools: lb.backend_address_pools.clone(),
            load_balancing_rules: lb.load_balancing_rules.clone(),
            probes: lb.probes.clone(),
            inbound_nat_rules: lb.inbound_nat_rules.clone(),
            provisioning_state: lb.provisioning_state.clone(),
        }),
    })
}

pub fn load_balancer_from_sdk(resource_group: &str, lb: &sdk::LoadBalancer) -> LoadBalancer {
    let props = lb.properties.clone().unwrap_or_default();
    LoadBalancer {
        name: lb.name.clone().unwrap_or_default(),
        resource_group_name: resource_group.to_string(),
        location: lb.location.clone(),
        id: lb.id.clone(),
        etag: lb.etag.clone(),
        tags: lb.tags.clone(),
        frontend_ip_configurations: props
            .frontend_ip_configurations
            .map(|fes| fes.iter().map(frontend_from_sdk).collect()),
        backend_address_pools: props.backend_address_pools,
        load_balancing_rules: props.load_balancing_rules,
        probes: props.probes,
        inbound_nat_rules: props.inbound_nat_rules,
        provisioning_state: props.provisioning_state,
    }
}

pub fn security_rule_to_sdk(rule: &SecurityRule) -> Result<sdk::SecurityRule> {
    Ok(sdk::SecurityRule {
        id: rule.id.clone(),
        name: Some(rule.name.clone()),
        etag: rule.etag.clone(),
        properties: Some(sdk::SecurityRuleProperties {
            description: rule.description.clone(),
            protocol: SecurityRuleProtocol::parse_opt(rule.protocol.as_deref())?,
            source_port_range: rule.source_port_range.clone(),
            destination_port_range: rule.destination_port_range.clone(),
            source_address_prefix: rule.source_address_prefix.clone(),
            destination_address_prefix: rule.destination_address_prefix.clone(),
            access: Access::parse_opt(rule.access.as_deref())?,
            priority: rule.priority,
            direction: Direction::parse_opt(rule.direction.as_deref())?,
            provisioning_state: rule.provisioning_state.clone(),
        }),
    })
}

pub fn security_rule_from_sdk(rule: &sdk::SecurityRule) -> SecurityRule {
    let props = rule.properties.clone().unwrap_or_default();
    SecurityRule {
        name: rule.name.clone().unwrap_or_default(),
        id: rule.id.clone(),
        etag: rule.etag.clone(),
        description: props.description,
        protocol: props.protocol.map(|p| p.as_str().to_string()),
        source_port_range: props.source_port_range,
        destination_port_range: props.destination_port_range,
        source_address_prefix: props.source_address_prefix,
        destination_address_prefix: props.destination_address_prefix,
        access: props.access.map(|a| a.as_str().to_string()),
        priority: props.priority,
        direction: props.direction.map(|d| d.as_str().to_string()),
        provisioning_state: props.provisioning_state,
    }
}

pub fn security_group_to_sdk(nsg: &NetworkSecurityGroup) -> Result<sdk::NetworkSecurityGroup> {
    Ok(sdk::NetworkSecurityGroup {
        id: nsg.id.clone(),
        name: Some(nsg.name.clone()),
        location: nsg.location.clone(),
        etag: nsg.etag.clone(),
        tags: nsg.tags.clone(),
        properties: Some(sdk::NetworkSecurityGroupProperties {
            security_rules: try_synced_list(nsg.security_rules.as_deref(), security_rule_to_sdk)?,
            default_security_rules: try_synced_list(
                nsg.default_security_rules.as_deref(),
                security_rule_to_sdk,
            )?,
            provisioning_state: nsg.provisioning_state.clone(),
        }),
    })
}

pub fn security_group_from_sdk(
    resource_group: &str,
    nsg: &sdk::NetworkSecurityGroup,
) -> NetworkSecurityGroup {
    let props = nsg.properties.clone().unwrap_or_default();
    let rules = |rules: Option<Vec<sdk::SecurityRule>>| {
        rules.map(|rs| rs.iter().map(security_rule_from_sdk).collect())
    };

    NetworkSecurityGroup {
        name: nsg.name.clone().unwrap_or_default(),
        resource_group_name: resource_group.to_string(),
        location: nsg.location.clone(),
        id: nsg.id.clone(),
        etag: nsg.etag.clone(),
        tags: nsg.tags.clone(),
        security_rules: rules(props.security_rules),
        default_security_rules: rules(props.default_security_rules),
        provisioning_state: props.provisioning_state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn frontend() -> FrontendIpConfiguration {
        FrontendIpConfiguration {
            name: "fe1".to_string(),
            id: Some("/subscriptions/s/resourceGroups/rg/providers/Microsoft.Network/loadBalancers/lb1/frontendIPConfigurations/fe1".to_string()),
            private_ip_address: Some("10.0.0.4".to_string()),
            private_ip_allocation_method: Some("Static".to_string()),
            subnet: Some(ResourceRef::new("/subnet")),
            ..Default::default()
        }
    }

    #[test]
    fn test_load_balancer_round_trip() {
        let lb = LoadBalancer {
            name: "lb1".to_string(),
            resource_group_name: "rg".to_string(),
            location: Some("westus".to_string()),
            frontend_ip_configurations: Some(vec![frontend()]),
            probes: Some(vec![serde_json::json!({"name": "p"})]),
            ..Default::default()
        };
        let sdk = load_balancer_to_sdk(&lb).unwrap();
        assert_eq!(load_balancer_from_sdk("rg", &sdk), lb);
    }

    #[test]
    fn test_unknown_allocation_method() {
        let mut fe = frontend();
        fe.private_ip_allocation_method = Some("Sticky".to_string());
        assert!(matches!(
            frontend_to_sdk(&fe),
            Err(Error::InvalidEnumValue { .. })
        ));
    }

    #[test]
    fn test_security_group_round_trip_keeps_null_rules() {
        let nsg = NetworkSecurityGroup {
            name: "nsg1".to_string(),
            resource_group_name: "rg".to_string(),
            security_rules: Some(vec![SecurityRule {
                name: "allow-ssh".to_string(),
                protocol: Some("Tcp".to_string()),
                destination_port_range: Some("22".to_string()),
                access: Some("Allow".to_string()),
                direction: Some("Inbound".to_string()),
                priority: Some(100),
                ..Default::default()
            }]),
            default_security_rules: None,
            ..Default::default()
        };
        let sdk = security_group_to_sdk(&nsg).unwrap();
        assert_eq!(
            sdk.properties.as_ref().unwrap().default_security_rules,
            None
        );
        assert_eq!(security_group_from_sdk("rg", &sdk), nsg);
    }
}
