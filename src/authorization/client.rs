//! Role assignment lookups against `Microsoft.Authorization` and Microsoft Graph

use super::mapping::{
    administrator_matches, classic_administrator_from_sdk, id_leaf, role_assignment_from_sdk,
    same_role_definition,
};
use super::models::RoleAssignment;
use super::query::{PrincipalFilter, RoleAssignmentQuery};
use super::sdk;
use crate::arm::client::GRAPH_AUDIENCE;
use crate::arm::ArmClient;
use crate::error::{Error, Result};
use crate::resource::sync::exactly_one;
use crate::resource::{fetch_all, fetch_all_from};
use reqwest::Method;
use serde_json::{json, Value};
use std::collections::HashMap;

const API_VERSION: &str = "2022-04-01";
const CLASSIC_ADMINISTRATORS_API_VERSION: &str = "2015-06-01";
const PROVIDER: &str = "Microsoft.Authorization";
/// Largest id batch `directoryObjects/getByIds` accepts
const GET_BY_IDS_BATCH: usize = 1000;

/// Quote a value for an OData `$filter` string literal
fn odata_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

pub struct AuthorizationClient<'a> {
    client: &'a ArmClient,
}

impl<'a> AuthorizationClient<'a> {
    pub fn new(client: &'a ArmClient) -> Self {
        Self { client }
    }

    fn scoped_url(&self, scope: &str, collection: &str, filter: Option<&str>, api_version: &str) -> String {
        let mut path = format!("{}/providers/{}/{}", scope, PROVIDER, collection);
        if let Some(filter) = filter {
            path.push_str("?$filter=");
            path.push_str(&urlencoding::encode(filter));
        }
        self.client.arm_url(&path, api_version)
    }

    /// Look the principal up in the directory; `Any` needs no lookup
    pub async fn find_principal(&self, filter: &PrincipalFilter) -> Result<Option<sdk::DirectoryObject>> {
        let (path, name, default_type) = match filter {
            PrincipalFilter::Any => return Ok(None),
            PrincipalFilter::ObjectId(id) => return self.principal_by_id(&id.to_string()).await.map(Some),
            PrincipalFilter::Mail(mail) => (
                format!("/users?$filter={}", urlencoding::encode(&format!("mail eq {}", odata_literal(mail)))),
                mail,
                "#microsoft.graph.user",
            ),
            PrincipalFilter::UserPrincipalName(upn) => (
                format!(
                    "/users?$filter={}",
                    urlencoding::encode(&format!("userPrincipalName eq {}", odata_literal(upn)))
                ),
                upn,
                "#microsoft.graph.user",
            ),
            PrincipalFilter::ServicePrincipalName(spn) => (
                format!(
                    "/servicePrincipals?$filter={}",
                    urlencoding::encode(&format!("servicePrincipalNames/any(n:n eq {})", odata_literal(spn)))
                ),
                spn,
                "#microsoft.graph.servicePrincipal",
            ),
        };

        let found: Vec<sdk::DirectoryObject> =
            fetch_all_from(self.client, GRAPH_AUDIENCE, &self.client.graph_url(&path)).await?;
        let mut principal = exactly_one(found, "principal", name)?;
        principal.odata_type.get_or_insert_with(|| default_type.to_string());
        tracing::debug!("Resolved principal '{}' to object {}", name, principal.id);
        Ok(Some(principal))
    }

    async fn principal_by_id(&self, id: &str) -> Result<sdk::DirectoryObject> {
        let url = self.client.graph_url(&format!("/directoryObjects/{id}"));
        match self
            .client
            .send_with_audience(GRAPH_AUDIENCE, Method::GET, &url, None)
            .await
        {
            Ok(response) => Ok(serde_json::from_value(response.body)?),
            Err(e) if e.is_remote_not_found() => Err(Error::NotFound {
                kind: "principal",
                name: id.to_string(),
            }),
            Err(e) => Err(e),
        }
    }

    /// Directory objects for `ids`; ids the directory no longer knows are simply absent
    pub async fn directory_objects(&self, ids: &[String]) -> Result<Vec<sdk::DirectoryObject>> {
        let url = self.client.graph_url("/directoryObjects/getByIds");
        let mut objects = Vec::new();
        for batch in ids.chunks(GET_BY_IDS_BATCH) {
            let body = json!({ "ids": batch });
            let response = self
                .client
                .send_with_audience(GRAPH_AUDIENCE, Method::POST, &url, Some(&body))
                .await?;
            if let Some(Value::Array(items)) = response.body.get("value") {
                for item in items {
                    objects.push(serde_json::from_value(item.clone())?);
                }
            }
        }
        Ok(objects)
    }

    /// The role definition called `name` that is assignable at `scope`
    pub async fn role_definition_by_name(&self, scope: &str, name: &str) -> Result<sdk::RoleDefinition> {
        let filter = format!("roleName eq {}", odata_literal(name));
        let url = self.scoped_url(scope, "roleDefinitions", Some(&filter), API_VERSION);
        let found: Vec<sdk::RoleDefinition> = fetch_all(self.client, &url).await?;
        exactly_one(found, "role definition", name)
    }

    pub async fn list_role_definitions(&self, scope: &str) -> Result<Vec<sdk::RoleDefinition>> {
        let url = self.scoped_url(scope, "roleDefinitions", None, API_VERSION);
        fetch_all(self.client, &url).await
    }

    pub async fn list_role_assignments(
        &self,
        scope: &str,
        filter: Option<&str>,
    ) -> Result<Vec<sdk::RoleAssignment>> {
        let url = self.scoped_url(scope, "roleAssignments", filter, API_VERSION);
        fetch_all(self.client, &url).await
    }

    pub async fn list_classic_administrators(&self) -> Result<Vec<sdk::ClassicAdministrator>> {
        let url = self.scoped_url(
            &self.client.subscription_path(),
            "classicAdministrators",
            None,
            CLASSIC_ADMINISTRATORS_API_VERSION,
        );
        fetch_all(self.client, &url).await
    }

    /// Run a resolved query: principal lookup, role lookup, listing, then reshaping
    pub async fn filter_role_assignments(&self, query: &RoleAssignmentQuery) -> Result<Vec<RoleAssignment>> {
        let scope = query.scope.path()?;
        let principal = self.find_principal(&query.principal).await?;

        let role = match &query.role {
            Some(name) => Some(self.role_definition_by_name(&scope, name).await?),
            None => None,
        };

        let filter = principal.as_ref().map(|p| {
            if query.flags.expand_principal_groups {
                format!("assignedTo({})", odata_literal(&p.id))
            } else {
                format!("principalId eq {}", odata_literal(&p.id))
            }
        });

        let mut assignments = self.list_role_assignments(&scope, filter.as_deref()).await?;
        if let Some(role_id) = role.as_ref().and_then(|r| r.id.as_deref()) {
            assignments.retain(|a| {
                a.properties
                    .role_definition_id
                    .as_deref()
                    .is_some_and(|id| same_role_definition(id, role_id))
            });
        }
        let definitions = match role {
            Some(role) => vec![role],
            None if !assignments.is_empty() => self.list_role_definitions(&scope).await?,
            None => Vec::new(),
        };
        let role_names: HashMap<String, String> = definitions
            .iter()
            .filter_map(|d| {
                let id = d.id.as_deref()?;
                let name = d.properties.role_name.clone()?;
                Some((id_leaf(id).to_lowercase(), name))
            })
            .collect();

        let mut principal_ids: Vec<String> = assignments
            .iter()
            .filter_map(|a| a.properties.principal_id.clone())
            .collect();
        principal_ids.sort();
        principal_ids.dedup();
        let principals: HashMap<String, sdk::DirectoryObject> = self
            .directory_objects(&principal_ids)
            .await?
            .into_iter()
            .map(|o| (o.id.clone(), o))
            .collect();

        // Principals the directory no longer returns were deleted
        let mut result: Vec<RoleAssignment> = assignments
            .iter()
            .filter_map(|a| {
                let principal = principals.get(a.properties.principal_id.as_deref()?)?;
                let role_name = a
                    .properties
                    .role_definition_id
                    .as_deref()
                    .and_then(|id| role_names.get(&id_leaf(id).to_lowercase()))
                    .map(String::as_str);
                Some(role_assignment_from_sdk(a, role_name, principal))
            })
            .collect();
        if result.len() < assignments.len() {
            tracing::debug!(
                "Skipped {} assignments of deleted principals",
                assignments.len() - result.len()
            );
        }

        if query.flags.include_classic_administrators {
            let subscription = self.client.subscription_id.clone();
            let admins = self.list_classic_administrators().await?;
            result.extend(
                admins
                    .iter()
                    .filter(|admin| principal.as_ref().map_or(true, |p| administrator_matches(admin, p)))
                    .map(|admin| classic_administrator_from_sdk(&subscription, admin)),
            );
        }

        tracing::info!("Found {} role assignments at {}", result.len(), scope);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arm::auth::StaticTokenProvider;
    use crate::arm::ClientOptions;
    use std::sync::Arc;

    #[test]
    fn test_odata_literal_escapes_quotes() {
        assert_eq!(odata_literal("o'brien@contoso.com"), "'o''brien@contoso.com'");
    }

    #[test]
    fn test_scoped_url_encodes_filter() {
        let arm = ArmClient::new(
            "s",
            Arc::new(StaticTokenProvider::new("t")),
            ClientOptions::default(),
        )
        .unwrap();
        let auth = AuthorizationClient::new(&arm);
        assert_eq!(
            auth.scoped_url("/subscriptions/s", "roleDefinitions", Some("roleName eq 'Reader'"), API_VERSION),
            "https://management.azure.com/subscriptions/s/providers/Microsoft.Authorization/roleDefinitions?$filter=roleName%20eq%20%27Reader%27&api-version=2022-04-01"
        );
    }
}
