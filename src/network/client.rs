//! Load balancer and network security group operations

use super::mapping::{
    load_balancer_from_sdk, load_balancer_to_sdk, security_group_from_sdk,
};
use super::models::{LoadBalancer, NetworkSecurityGroup};
use super::sdk;
use crate::arm::resource_id::resource_group_of;
use crate::arm::ArmClient;
use crate::error::Result;
use crate::resource::fetch_all;

const API_VERSION: &str = "2023-09-01";
pub const PROVIDER: &str = "Microsoft.Network";
pub const LOAD_BALANCERS: &str = "loadBalancers";
pub const NETWORK_SECURITY_GROUPS: &str = "networkSecurityGroups";
pub const FRONTEND_IP_CONFIGURATIONS: &str = "frontendIPConfigurations";

pub struct NetworkClient<'a> {
    client: &'a ArmClient,
}

impl<'a> NetworkClient<'a> {
    pub fn new(client: &'a ArmClient) -> Self {
        Self { client }
    }

    pub fn subscription_id(&self) -> &str {
        &self.client.subscription_id
    }

    fn resource_url(&self, resource_group: &str, resource_type: &str, name: &str) -> String {
        let path = format!(
            "{}/{}",
            self.client
                .resource_group_provider_path(resource_group, PROVIDER, resource_type),
            urlencoding::encode(name)
        );
        self.client.arm_url(&path, API_VERSION)
    }

    fn collection_url(&self, resource_group: Option<&str>, resource_type: &str) -> String {
        let path = match resource_group {
            Some(rg) => self
                .client
                .resource_group_provider_path(rg, PROVIDER, resource_type),
            None => self
                .client
                .subscription_provider_path(PROVIDER, resource_type),
        };
        self.client.arm_url(&path, API_VERSION)
    }

    pub async fn get_load_balancer(&self, resource_group: &str, name: &str) -> Result<LoadBalancer> {
        let body = self
            .client
            .get(&self.resource_url(resource_group, LOAD_BALANCERS, name))
            .await?;
        let lb: sdk::LoadBalancer = serde_json::from_value(body)?;
        Ok(load_balancer_from_sdk(resource_group, &lb))
    }

    pub async fn list_load_balancers(&self, resource_group: Option<&str>) -> Result<Vec<LoadBalancer>> {
        let url = self.collection_url(resource_group, LOAD_BALANCERS);
        let items: Vec<sdk::LoadBalancer> = fetch_all(self.client, &url).await?;
        items
            .iter()
            .map(|lb| {
                let rg = group_for(resource_group, lb.id.as_deref())?;
                Ok(load_balancer_from_sdk(&rg, lb))
            })
            .collect()
    }

    /// Create or replace a load balancer
    pub async fn put_load_balancer(&self, lb: &LoadBalancer) -> Result<LoadBalancer> {
        let body = serde_json::to_value(load_balancer_to_sdk(lb)?)?;
        let url = self.resource_url(&lb.resource_group_name, LOAD_BALANCERS, &lb.name);
        let response = self.client.put(&url, &body).await?;
        let saved: sdk::LoadBalancer = serde_json::from_value(response.body)?;
        Ok(load_balancer_from_sdk(&lb.resource_group_name, &saved))
    }

    pub async fn get_security_group(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<NetworkSecurityGroup> {
        let body = self
            .client
            .get(&self.resource_url(resource_group, NETWORK_SECURITY_GROUPS, name))
            .await?;
        let nsg: sdk::NetworkSecurityGroup = serde_json::from_value(body)?;
        Ok(security_group_from_sdk(resource_group, &nsg))
    }

    pub async fn list_security_groups(
        &self,
        resource_group: Option<&str>,
    ) -> Result<Vec<NetworkSecurityGroup>> {
        let url = self.collection_url(resource_group, NETWORK_SECURITY_GROUPS);
        let items: Vec<sdk::NetworkSecurityGroup> = fetch_all(self.client, &url).await?;
        items
            .iter()
            .map(|nsg| {
                let rg = group_for(resource_group, nsg.id.as_deref())?;
                Ok(security_group_from_sdk(&rg, nsg))
            })
            .collect()
    }

    pub async fn delete_security_group(&self, resource_group: &str, name: &str) -> Result<bool> {
        let response = self
            .client
            .delete(&self.resource_url(resource_group, NETWORK_SECURITY_GROUPS, name))
            .await?;
        Ok(response.is_delete_accepted())
    }
}

/// The listing's resource group, or the one in the item's ID for subscription-wide listings
fn group_for(resource_group: Option<&str>, id: Option<&str>) -> Result<String> {
    match resource_group {
        Some(rg) => Ok(rg.to_string()),
        None => resource_group_of(id.unwrap_or_default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_for_prefers_listing_scope() {
        assert_eq!(group_for(Some("rg"), None).unwrap(), "rg");
        assert_eq!(
            group_for(
                None,
                Some("/subscriptions/s/resourceGroups/other/providers/Microsoft.Network/networkSecurityGroups/n")
            )
            .unwrap(),
            "other"
        );
        assert!(group_for(None, None).is_err());
    }
}
