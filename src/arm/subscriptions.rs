//! Azure Subscriptions
//!
//! Functions for listing the subscriptions visible to the caller.

use super::client::ArmClient;
use crate::cmdlet::Invocation;
use crate::error::Result;
use crate::output::Output;
use crate::resource::fetch_all;
use clap::Subcommand;
use serde::{Deserialize, Serialize};

const API_VERSION: &str = "2022-12-01";

/// Subscription information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Subscription {
    pub id: String,
    pub name: String,
    pub state: String,
    pub tenant_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubscriptionSdk {
    subscription_id: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    tenant_id: Option<String>,
}

impl From<SubscriptionSdk> for Subscription {
    fn from(sdk: SubscriptionSdk) -> Self {
        Self {
            id: sdk.subscription_id,
            name: sdk.display_name.unwrap_or_else(|| "-".to_string()),
            state: sdk.state.unwrap_or_else(|| "Unknown".to_string()),
            tenant_id: sdk.tenant_id,
        }
    }
}

/// List all enabled subscriptions
pub async fn list_subscriptions(client: &ArmClient) -> Result<Vec<Subscription>> {
    let url = client.arm_url("/subscriptions", API_VERSION);
    let items: Vec<SubscriptionSdk> = fetch_all(client, &url).await?;

    Ok(items
        .into_iter()
        .map(Subscription::from)
        .filter(|s| s.state == "Enabled")
        .collect())
}

#[derive(Subcommand, Debug)]
pub enum SubscriptionCommand {
    /// List enabled subscriptions visible to the caller
    List,
}

impl SubscriptionCommand {
    pub fn name(&self) -> &'static str {
        match self {
            SubscriptionCommand::List => "list-subscriptions",
        }
    }
}

pub async fn run(cmd: SubscriptionCommand, client: &ArmClient, inv: &mut Invocation) -> Result<Output> {
    match cmd {
        SubscriptionCommand::List => {
            inv.bound();
            inv.resolved("Default");
            inv.request_built();
            let subscriptions = list_subscriptions(client).await?;
            inv.invoked();
            Output::sequence(&subscriptions)
        }
    }
}
