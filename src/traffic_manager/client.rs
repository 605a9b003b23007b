//! Traffic Manager operations against `Microsoft.Network/trafficManagerProfiles`

use super::mapping::{
    endpoint_from_sdk, endpoint_status_update, endpoint_to_sdk, profile_from_sdk,
    profile_status_update, profile_to_sdk,
};
use super::models::{TrafficManagerEndpoint, TrafficManagerProfile};
use super::sdk::{Endpoint, EndpointType, Profile};
use crate::arm::resource_id::resource_group_of;
use crate::arm::ArmClient;
use crate::error::Result;
use crate::resource::{fetch_all, EnumMapping};

const API_VERSION: &str = "2022-04-01";
const PROVIDER: &str = "Microsoft.Network";
const PROFILES: &str = "trafficManagerProfiles";

pub struct TrafficManagerClient<'a> {
    client: &'a ArmClient,
}

impl<'a> TrafficManagerClient<'a> {
    pub fn new(client: &'a ArmClient) -> Self {
        Self { client }
    }

    fn profile_url(&self, resource_group: &str, name: &str) -> String {
        let path = format!(
            "{}/{}",
            self.client
                .resource_group_provider_path(resource_group, PROVIDER, PROFILES),
            urlencoding::encode(name)
        );
        self.client.arm_url(&path, API_VERSION)
    }

    fn endpoint_url(
        &self,
        resource_group: &str,
        profile_name: &str,
        endpoint_type: EndpointType,
        name: &str,
    ) -> String {
        let path = format!(
            "{}/{}/{}/{}",
            self.client
                .resource_group_provider_path(resource_group, PROVIDER, PROFILES),
            urlencoding::encode(profile_name),
            endpoint_type.url_segment(),
            urlencoding::encode(name)
        );
        self.client.arm_url(&path, API_VERSION)
    }

    // =========================================================================
    // Profiles
    // =========================================================================

    pub async fn create_profile(
        &self,
        profile: &TrafficManagerProfile,
    ) -> Result<TrafficManagerProfile> {
        let body = serde_json::to_value(profile_to_sdk(profile)?)?;
        let url = self.profile_url(&profile.resource_group_name, &profile.name);
        let response = self.client.put(&url, &body).await?;
        let created: Profile = serde_json::from_value(response.body)?;
        profile_from_sdk(&profile.resource_group_name, &created)
    }

    pub async fn get_profile(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<TrafficManagerProfile> {
        let body = self.client.get(&self.profile_url(resource_group, name)).await?;
        let profile: Profile = serde_json::from_value(body)?;
        profile_from_sdk(resource_group, &profile)
    }

    /// Profiles in one resource group, or in the whole subscription when `None`
    pub async fn list_profiles(
        &self,
        resource_group: Option<&str>,
    ) -> Result<Vec<TrafficManagerProfile>> {
        let path = match resource_group {
            Some(rg) => self
                .client
                .resource_group_provider_path(rg, PROVIDER, PROFILES),
            None => self.client.subscription_provider_path(PROVIDER, PROFILES),
        };
        let url = self.client.arm_url(&path, API_VERSION);
        let profiles: Vec<Profile> = fetch_all(self.client, &url).await?;

        profiles
            .iter()
            .map(|p| {
                let rg = match resource_group {
                    Some(rg) => rg.to_string(),
                    None => resource_group_of(p.id.as_deref().unwrap_or_default())?,
                };
                profile_from_sdk(&rg, p)
            })
            .collect()
    }

    /// Full replace of the profile with the given presentation object
    pub async fn set_profile(
        &self,
        profile: &TrafficManagerProfile,
    ) -> Result<TrafficManagerProfile> {
        self.create_profile(profile).await
    }

    pub async fn delete_profile(&self, resource_group: &str, name: &str) -> Result<bool> {
        let response = self
            .client
            .delete(&self.profile_url(resource_group, name))
            .await?;
        Ok(response.is_delete_accepted())
    }

    pub async fn enable_disable_profile(
        &self,
        profile: &TrafficManagerProfile,
        enable: bool,
    ) -> Result<bool> {
        let body = serde_json::to_value(profile_status_update(profile, enable)?)?;
        let url = self.profile_url(&profile.resource_group_name, &profile.name);
        let response = self.client.patch(&url, &body).await?;
        Ok(response.is_ok())
    }

    // =========================================================================
    // Endpoints
    // =========================================================================

    async fn put_endpoint(&self, endpoint: &TrafficManagerEndpoint) -> Result<TrafficManagerEndpoint> {
        let endpoint_type = EndpointType::parse(&endpoint.endpoint_type)?;
        let body = serde_json::to_value(endpoint_to_sdk(endpoint)?)?;
        let url = self.endpoint_url(
            &endpoint.resource_group_name,
            &endpoint.profile_name,
            endpoint_type,
            &endpoint.name,
        );
        let response = self.client.put(&url, &body).await?;
        let saved: Endpoint = serde_json::from_value(response.body)?;
        endpoint_from_sdk(&endpoint.resource_group_name, &endpoint.profile_name, &saved)
    }

    pub async fn create_endpoint(
        &self,
        endpoint: &TrafficManagerEndpoint,
    ) -> Result<TrafficManagerEndpoint> {
        self.put_endpoint(endpoint).await
    }

    pub async fn get_endpoint(
        &self,
        resource_group: &str,
        profile_name: &str,
        endpoint_type: EndpointType,
        name: &str,
    ) -> Result<TrafficManagerEndpoint> {
        let url = self.endpoint_url(resource_group, profile_name, endpoint_type, name);
        let endpoint: Endpoint = serde_json::from_value(self.client.get(&url).await?)?;
        endpoint_from_sdk(resource_group, profile_name, &endpoint)
    }

    pub async fn set_endpoint(
        &self,
        endpoint: &TrafficManagerEndpoint,
    ) -> Result<TrafficManagerEndpoint> {
        self.put_endpoint(endpoint).await
    }

    pub async fn delete_endpoint(
        &self,
        resource_group: &str,
        profile_name: &str,
        endpoint_type: EndpointType,
        name: &str,
    ) -> Result<bool> {
        let url = self.endpoint_url(resource_group, profile_name, endpoint_type, name);
        Ok(self.client.delete(&url).await?.is_delete_accepted())
    }

    /// PATCH carrying only the endpoint status; 200 and 201 both count as success
    pub async fn enable_disable_endpoint(
        &self,
        endpoint: &TrafficManagerEndpoint,
        enable: bool,
    ) -> Result<bool> {
        let endpoint_type = EndpointType::parse(&endpoint.endpoint_type)?;
        let body = serde_json::to_value(endpoint_status_update(endpoint, enable)?)?;
        let url = self.endpoint_url(
            &endpoint.resource_group_name,
            &endpoint.profile_name,
            endpoint_type,
            &endpoint.name,
        );
        let response = self.client.patch(&url, &body).await?;
        Ok(matches!(response.status, 200 | 201))
    }
}
