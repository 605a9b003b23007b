//! Presentation <-> wire mapping for Traffic Manager

use super::models::{TrafficManagerEndpoint, TrafficManagerProfile};
use super::sdk::{
    DnsConfig, Endpoint, EndpointProperties, EndpointType, MonitorConfig, MonitorProtocol, Profile,
    ProfileProperties, Status, TrafficRoutingMethod,
};
use crate::error::Result;
use crate::resource::sync::{synced_list, try_synced_list};
use crate::resource::EnumMapping;

/// Profiles are global resources
pub const PROFILE_LOCATION: &str = "global";

pub const PROFILE_TYPE: &str = "Microsoft.Network/trafficManagerProfiles";

pub fn profile_to_sdk(profile: &TrafficManagerProfile) -> Result<Profile> {
    let endpoints = try_synced_list(profile.endpoints.as_deref(), endpoint_to_sdk)?;

    Ok(Profile {
        id: None,
        name: Some(profile.name.clone()),
        resource_type: Some(PROFILE_TYPE.to_string()),
        location: Some(PROFILE_LOCATION.to_string()),
        tags: profile.tags.clone(),
        properties: Some(ProfileProperties {
            profile_status: Status::parse_opt(profile.profile_status.as_deref())?,
            traffic_routing_method: TrafficRoutingMethod::parse_opt(
                profile.traffic_routing_method.as_deref(),
            )?,
            dns_config: Some(DnsConfig {
                relative_name: profile.relative_dns_name.clone(),
                fqdn: None,
                ttl: profile.ttl,
            }),
            monitor_config: Some(MonitorConfig {
                profile_monitor_status: None,
                protocol: MonitorProtocol::parse_opt(profile.monitor_protocol.as_deref())?,
                port: profile.monitor_port,
                path: profile.monitor_path.clone(),
            }),
            endpoints,
        }),
    })
}

pub fn profile_from_sdk(resource_group: &str, profile: &Profile) -> Result<TrafficManagerProfile> {
    let name = profile.name.clone().unwrap_or_default();
    let props = profile.properties.clone().unwrap_or_default();
    let dns = props.dns_config.unwrap_or_default();
    let monitor = props.monitor_config.unwrap_or_default();

    let endpoints = try_synced_list(props.endpoints.as_deref(), |e| {
        endpoint_from_sdk(resource_group, &name, e)
    })?;

    Ok(TrafficManagerProfile {
        name: name.clone(),
        resource_group_name: resource_group.to_string(),
        relative_dns_name: dns.relative_name,
        ttl: dns.ttl,
        profile_status: props.profile_status.map(|s| s.as_str().to_string()),
        traffic_routing_method: props
            .traffic_routing_method
            .map(|m| m.as_str().to_string()),
        monitor_protocol: monitor.protocol.map(|p| p.as_str().to_string()),
        monitor_port: monitor.port,
        monitor_path: monitor.path,
        endpoints,
        tags: profile.tags.clone(),
    })
}

pub fn endpoint_to_sdk(endpoint: &TrafficManagerEndpoint) -> Result<Endpoint> {
    let endpoint_type = EndpointType::parse(&endpoint.endpoint_type)?;

    Ok(Endpoint {
        id: None,
        name: Some(endpoint.name.clone()),
        resource_type: Some(endpoint_type.sdk_type()),
        properties: Some(EndpointProperties {
            target_resource_id: endpoint.target_resource_id.clone(),
            target: endpoint.target.clone(),
            endpoint_status: Status::parse_opt(endpoint.endpoint_status.as_deref())?,
            weight: endpoint.weight,
            priority: endpoint.priority,
            endpoint_location: endpoint.location.clone(),
            endpoint_monitor_status: endpoint.endpoint_monitor_status.clone(),
        }),
    })
}

pub fn endpoint_from_sdk(
    resource_group: &str,
    profile_name: &str,
    endpoint: &Endpoint,
) -> Result<TrafficManagerEndpoint> {
    let endpoint_type = match endpoint.resource_type.as_deref() {
        Some(ty) => EndpointType::from_sdk_type(ty)?.as_str().to_string(),
        None => String::new(),
    };
    let props = endpoint.properties.clone().unwrap_or_default();

    Ok(TrafficManagerEndpoint {
        name: endpoint.name.clone().unwrap_or_default(),
        resource_group_name: resource_group.to_string(),
        profile_name: profile_name.to_string(),
        endpoint_type,
        target_resource_id: props.target_resource_id,
        target: props.target,
        endpoint_status: props.endpoint_status.map(|s| s.as_str().to_string()),
        location: props.endpoint_location,
        priority: props.priority,
        weight: props.weight,
        endpoint_monitor_status: props.endpoint_monitor_status,
    })
}

/// Wire body for enabling/disabling a profile: only the status is sent
pub fn profile_status_update(profile: &TrafficManagerProfile, enable: bool) -> Result<Profile> {
    let mut profile = profile.clone();
    profile.profile_status = Some(status_name(enable).to_string());

    let mut sdk = profile_to_sdk(&profile)?;
    if let Some(props) = sdk.properties.as_mut() {
        props.dns_config = None;
        props.endpoints = None;
        props.traffic_routing_method = None;
        props.monitor_config = None;
    }
    Ok(sdk)
}

/// Wire body for enabling/disabling an endpoint: routing and target fields are cleared
pub fn endpoint_status_update(endpoint: &TrafficManagerEndpoint, enable: bool) -> Result<Endpoint> {
    let mut endpoint = endpoint.clone();
    endpoint.endpoint_status = Some(status_name(enable).to_string());

    let mut sdk = endpoint_to_sdk(&endpoint)?;
    if let Some(props) = sdk.properties.as_mut() {
        props.endpoint_location = None;
        props.endpoint_monitor_status = None;
        props.priority = None;
        props.weight = None;
        props.target = None;
        props.target_resource_id = None;
    }
    Ok(sdk)
}

fn status_name(enable: bool) -> &'static str {
    if enable {
        Status::Enabled.as_str()
    } else {
        Status::Disabled.as_str()
    }
}

/// Endpoints embedded in a profile, with their parent identifiers filled in
pub fn embedded_endpoints(profile: &TrafficManagerProfile) -> Option<Vec<TrafficManagerEndpoint>> {
    synced_list(profile.endpoints.as_deref(), |e| TrafficManagerEndpoint {
        resource_group_name: profile.resource_group_name.clone(),
        profile_name: profile.name.clone(),
        ..e.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn endpoint() -> TrafficManagerEndpoint {
        TrafficManagerEndpoint {
            name: "ep1".to_string(),
            resource_group_name: "rg".to_string(),
            profile_name: "p1".to_string(),
            endpoint_type: "ExternalEndpoints".to_string(),
            target_resource_id: None,
            target: Some("www.contoso.com".to_string()),
            endpoint_status: Some("Enabled".to_string()),
            location: Some("North Europe".to_string()),
            priority: Some(1),
            weight: Some(10),
            endpoint_monitor_status: None,
        }
    }

    fn profile() -> TrafficManagerProfile {
        TrafficManagerProfile {
            name: "p1".to_string(),
            resource_group_name: "rg".to_string(),
            relative_dns_name: Some("contoso".to_string()),
            ttl: Some(30),
            profile_status: Some("Enabled".to_string()),
            traffic_routing_method: Some("Priority".to_string()),
            monitor_protocol: Some("HTTP".to_string()),
            monitor_port: Some(80),
            monitor_path: Some("/health".to_string()),
            endpoints: Some(vec![endpoint()]),
            tags: None,
        }
    }

    #[test]
    fn test_profile_round_trip() {
        let p = profile();
        let sdk = profile_to_sdk(&p).unwrap();
        assert_eq!(sdk.location.as_deref(), Some(PROFILE_LOCATION));
        assert_eq!(profile_from_sdk("rg", &sdk).unwrap(), p);
    }

    #[test]
    fn test_profile_without_endpoints_stays_without() {
        let mut p = profile();
        p.endpoints = None;
        let sdk = profile_to_sdk(&p).unwrap();
        assert_eq!(sdk.properties.as_ref().unwrap().endpoints, None);
        assert_eq!(profile_from_sdk("rg", &sdk).unwrap().endpoints, None);

        p.endpoints = Some(vec![]);
        let sdk = profile_to_sdk(&p).unwrap();
        assert_eq!(sdk.properties.as_ref().unwrap().endpoints, Some(vec![]));
        assert_eq!(profile_from_sdk("rg", &sdk).unwrap().endpoints, Some(vec![]));
    }

    #[test]
    fn test_invalid_routing_method() {
        let mut p = profile();
        p.traffic_routing_method = Some("RoundRobin".to_string());
        assert!(matches!(
            profile_to_sdk(&p),
            Err(Error::InvalidEnumValue { .. })
        ));
    }

    #[test]
    fn test_endpoint_status_update_sends_only_status() {
        let sdk = endpoint_status_update(&endpoint(), false).unwrap();
        let props = sdk.properties.unwrap();
        assert_eq!(props.endpoint_status, Some(Status::Disabled));
        assert_eq!(props.endpoint_location, None);
        assert_eq!(props.priority, None);
        assert_eq!(props.weight, None);
        assert_eq!(props.target, None);
        assert_eq!(props.target_resource_id, None);
        assert_eq!(props.endpoint_monitor_status, None);
        assert_eq!(sdk.name.as_deref(), Some("ep1"));
    }

    #[test]
    fn test_profile_status_update_sends_only_status() {
        let sdk = profile_status_update(&profile(), true).unwrap();
        let props = sdk.properties.unwrap();
        assert_eq!(props.profile_status, Some(Status::Enabled));
        assert_eq!(props.dns_config, None);
        assert_eq!(props.monitor_config, None);
        assert_eq!(props.traffic_routing_method, None);
        assert_eq!(props.endpoints, None);
    }

    #[test]
    fn test_embedded_endpoints_carry_parent() {
        let mut p = profile();
        p.endpoints = Some(vec![TrafficManagerEndpoint {
            name: "x".to_string(),
            endpoint_type: "AzureEndpoints".to_string(),
            ..Default::default()
        }]);
        let eps = embedded_endpoints(&p).unwrap();
        assert_eq!(eps[0].profile_name, "p1");
        assert_eq!(eps[0].resource_group_name, "rg");
    }
}
