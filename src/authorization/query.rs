//! Role assignment filter resolution
//!
//! `role-assignment get` accepts one principal selector (or none) combined
//! with one scope selector (or none). The twenty legal combinations are
//! declared as parameter sets; the chosen set is turned into a
//! [`RoleAssignmentQuery`] by an exhaustive match over its shape.

use crate::cmdlet::{required, Invocation};
use crate::error::{Error, Result};
use crate::resource::{BoundParameters, ParameterSet};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PrincipalKind {
    Any,
    ObjectId,
    Mail,
    Upn,
    Spn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScopeKind {
    Subscription,
    ResourceGroup,
    Resource,
    Explicit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueryShape {
    principal: PrincipalKind,
    scope: ScopeKind,
}

macro_rules! query_set {
    ($name:literal, $principal:ident, $scope:ident, [$($req:literal),*], [$($opt:literal),*]) => {
        ParameterSet {
            kind: QueryShape {
                principal: PrincipalKind::$principal,
                scope: ScopeKind::$scope,
            },
            name: $name,
            required: &[$($req),*],
            optional: &["RoleDefinitionName", "IncludeClassicAdministrators" $(, $opt)*],
        }
    };
}

const QUERY_SETS: &[ParameterSet<QueryShape>] = &[
    query_set!("Empty", Any, Subscription, [], []),
    query_set!("ObjectId", ObjectId, Subscription, ["ObjectId"], ["ExpandPrincipalGroups"]),
    query_set!("Mail", Mail, Subscription, ["Mail"], ["ExpandPrincipalGroups"]),
    query_set!("UPN", Upn, Subscription, ["UserPrincipalName"], ["ExpandPrincipalGroups"]),
    query_set!("SPN", Spn, Subscription, ["ServicePrincipalName"], []),
    query_set!("ResourceGroup", Any, ResourceGroup, ["ResourceGroupName"], []),
    query_set!("ResourceGroupWithObjectId", ObjectId, ResourceGroup, ["ObjectId", "ResourceGroupName"], []),
    query_set!("ResourceGroupWithMail", Mail, ResourceGroup, ["Mail", "ResourceGroupName"], []),
    query_set!("ResourceGroupWithUPN", Upn, ResourceGroup, ["UserPrincipalName", "ResourceGroupName"], []),
    query_set!("ResourceGroupWithSPN", Spn, ResourceGroup, ["ServicePrincipalName", "ResourceGroupName"], []),
    query_set!("Resource", Any, Resource, ["ResourceGroupName", "ResourceName", "ResourceType"], ["ParentResource"]),
    query_set!("ResourceWithObjectId", ObjectId, Resource, ["ObjectId", "ResourceGroupName", "ResourceName", "ResourceType"], ["ParentResource"]),
    query_set!("ResourceWithMail", Mail, Resource, ["Mail", "ResourceGroupName", "ResourceName", "ResourceType"], ["ParentResource"]),
    query_set!("ResourceWithUPN", Upn, Resource, ["UserPrincipalName", "ResourceGroupName", "ResourceName", "ResourceType"], ["ParentResource"]),
    query_set!("ResourceWithSPN", Spn, Resource, ["ServicePrincipalName", "ResourceGroupName", "ResourceName", "ResourceType"], ["ParentResource"]),
    query_set!("Scope", Any, Explicit, ["Scope"], []),
    query_set!("ScopeWithObjectId", ObjectId, Explicit, ["ObjectId", "Scope"], []),
    query_set!("ScopeWithMail", Mail, Explicit, ["Mail", "Scope"], []),
    query_set!("ScopeWithUPN", Upn, Explicit, ["UserPrincipalName", "Scope"], []),
    query_set!("ScopeWithSPN", Spn, Explicit, ["ServicePrincipalName", "Scope"], []),
];

/// Whose assignments to return
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrincipalFilter {
    Any,
    ObjectId(Uuid),
    Mail(String),
    UserPrincipalName(String),
    ServicePrincipalName(String),
}

/// Where to look for assignments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeFilter {
    Subscription(String),
    ResourceGroup {
        subscription: String,
        name: String,
    },
    Resource {
        subscription: String,
        resource_group: String,
        /// Namespace-qualified, e.g. `Microsoft.Web/sites`
        resource_type: String,
        resource_name: String,
        /// e.g. `servers/db1` for a nested resource
        parent: Option<String>,
    },
    Explicit(String),
}

impl ScopeFilter {
    /// Relative scope URI, e.g. `/subscriptions/{id}/resourceGroups/{name}`
    pub fn path(&self) -> Result<String> {
        Ok(match self {
            ScopeFilter::Subscription(subscription) => format!("/subscriptions/{subscription}"),
            ScopeFilter::ResourceGroup { subscription, name } => {
                format!("/subscriptions/{subscription}/resourceGroups/{name}")
            }
            ScopeFilter::Resource {
                subscription,
                resource_group,
                resource_type,
                resource_name,
                parent,
            } => {
                let (namespace, type_name) = resource_type.split_once('/').ok_or_else(|| {
                    Error::InvalidInput(format!(
                        "resource type '{resource_type}' must be of the form Namespace/type"
                    ))
                })?;
                // A parent path already names the outer types; only the leaf type follows it
                let type_path = match parent.as_deref().map(|p| p.trim_matches('/')) {
                    Some(parent) if !parent.is_empty() => {
                        let leaf = type_name.rsplit('/').next().unwrap_or(type_name);
                        format!("{parent}/{leaf}")
                    }
                    _ => type_name.to_string(),
                };
                format!(
                    "/subscriptions/{subscription}/resourceGroups/{resource_group}/providers/{namespace}/{type_path}/{resource_name}"
                )
            }
            ScopeFilter::Explicit(scope) => scope.clone(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryFlags {
    /// Include assignments inherited through group membership
    pub expand_principal_groups: bool,
    pub include_classic_administrators: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignmentQuery {
    pub principal: PrincipalFilter,
    pub scope: ScopeFilter,
    pub role: Option<String>,
    pub flags: QueryFlags,
}

/// Filter options of `role-assignment get`
#[derive(clap::Args, Debug, Default, Clone)]
pub struct RoleAssignmentFilterArgs {
    /// User, group or service principal object id
    #[arg(long, visible_alias = "principal-id")]
    pub object_id: Option<Uuid>,
    #[arg(long)]
    pub mail: Option<String>,
    #[arg(long, visible_alias = "upn")]
    pub user_principal_name: Option<String>,
    #[arg(long, visible_alias = "spn")]
    pub service_principal_name: Option<String>,
    #[arg(long)]
    pub resource_group_name: Option<String>,
    #[arg(long)]
    pub resource_name: Option<String>,
    /// Namespace-qualified resource type, e.g. `Microsoft.Web/sites`
    #[arg(long)]
    pub resource_type: Option<String>,
    #[arg(long)]
    pub parent_resource: Option<String>,
    /// Relative scope URI starting with `/`
    #[arg(long)]
    pub scope: Option<String>,
    #[arg(long)]
    pub role_definition_name: Option<String>,
    #[arg(long)]
    pub expand_principal_groups: bool,
    #[arg(long)]
    pub include_classic_administrators: bool,
}

impl RoleAssignmentFilterArgs {
    fn bound(&self) -> BoundParameters {
        BoundParameters::new()
            .bind_opt("ObjectId", &self.object_id)
            .bind_opt("Mail", &self.mail)
            .bind_opt("UserPrincipalName", &self.user_principal_name)
            .bind_opt("ServicePrincipalName", &self.service_principal_name)
            .bind_opt("ResourceGroupName", &self.resource_group_name)
            .bind_opt("ResourceName", &self.resource_name)
            .bind_opt("ResourceType", &self.resource_type)
            .bind_opt("ParentResource", &self.parent_resource)
            .bind_opt("Scope", &self.scope)
            .bind_opt("RoleDefinitionName", &self.role_definition_name)
            .bind_if("ExpandPrincipalGroups", self.expand_principal_groups)
            .bind_if("IncludeClassicAdministrators", self.include_classic_administrators)
    }

    /// Resolve the bound options into a query; `subscription` is the context subscription
    pub fn resolve(&self, subscription: &str, inv: &mut Invocation) -> Result<RoleAssignmentQuery> {
        let shape = inv.resolve(QUERY_SETS, &self.bound())?;

        let principal = match shape.principal {
            PrincipalKind::Any => PrincipalFilter::Any,
            PrincipalKind::ObjectId => PrincipalFilter::ObjectId(*required(&self.object_id, "ObjectId")?),
            PrincipalKind::Mail => PrincipalFilter::Mail(not_empty(&self.mail, "Mail")?),
            PrincipalKind::Upn => PrincipalFilter::UserPrincipalName(not_empty(
                &self.user_principal_name,
                "UserPrincipalName",
            )?),
            PrincipalKind::Spn => PrincipalFilter::ServicePrincipalName(not_empty(
                &self.service_principal_name,
                "ServicePrincipalName",
            )?),
        };

        let scope = match shape.scope {
            ScopeKind::Subscription => ScopeFilter::Subscription(subscription.to_string()),
            ScopeKind::ResourceGroup => ScopeFilter::ResourceGroup {
                subscription: subscription.to_string(),
                name: not_empty(&self.resource_group_name, "ResourceGroupName")?,
            },
            ScopeKind::Resource => ScopeFilter::Resource {
                subscription: subscription.to_string(),
                resource_group: not_empty(&self.resource_group_name, "ResourceGroupName")?,
                resource_type: not_empty(&self.resource_type, "ResourceType")?,
                resource_name: not_empty(&self.resource_name, "ResourceName")?,
                parent: self.parent_resource.clone().filter(|p| !p.is_empty()),
            },
            ScopeKind::Explicit => {
                let scope = not_empty(&self.scope, "Scope")?;
                if !scope.starts_with('/') {
                    return Err(Error::InvalidInput(format!(
                        "scope '{scope}' must be a relative URI starting with '/'"
                    )));
                }
                ScopeFilter::Explicit(scope.trim_end_matches('/').to_string())
            }
        };

        Ok(RoleAssignmentQuery {
            principal,
            scope,
            role: self.role_definition_name.clone().filter(|r| !r.is_empty()),
            flags: QueryFlags {
                expand_principal_groups: self.expand_principal_groups,
                include_classic_administrators: self.include_classic_administrators,
            },
        })
    }
}

fn not_empty(value: &Option<String>, name: &'static str) -> Result<String> {
    let value = required(value, name)?;
    if value.trim().is_empty() {
        return Err(Error::InvalidInput(format!("{name} cannot be empty")));
    }
    Ok(value.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUB: &str = "00000000-0000-0000-0000-000000000000";

    fn resolve(args: &RoleAssignmentFilterArgs) -> (Result<RoleAssignmentQuery>, Option<&'static str>) {
        let mut inv = Invocation::new("get");
        let query = args.resolve(SUB, &mut inv);
        (query, inv.parameter_set())
    }

    #[test]
    fn test_no_filters_resolve_to_subscription() {
        let (query, set) = resolve(&RoleAssignmentFilterArgs::default());
        let query = query.unwrap();
        assert_eq!(set, Some("Empty"));
        assert_eq!(query.principal, PrincipalFilter::Any);
        assert_eq!(query.scope, ScopeFilter::Subscription(SUB.to_string()));
    }

    #[test]
    fn test_resource_group_only_carries_context_subscription() {
        let args = RoleAssignmentFilterArgs {
            resource_group_name: Some("myRG".to_string()),
            ..Default::default()
        };
        let (query, set) = resolve(&args);
        let query = query.unwrap();
        assert_eq!(set, Some("ResourceGroup"));
        assert_eq!(query.principal, PrincipalFilter::Any);
        assert_eq!(
            query.scope,
            ScopeFilter::ResourceGroup {
                subscription: SUB.to_string(),
                name: "myRG".to_string()
            }
        );
        assert_eq!(
            query.scope.path().unwrap(),
            format!("/subscriptions/{SUB}/resourceGroups/myRG")
        );
    }

    #[test]
    fn test_principal_with_resource_scope() {
        let args = RoleAssignmentFilterArgs {
            mail: Some("alice@contoso.com".to_string()),
            resource_group_name: Some("rg".to_string()),
            resource_name: Some("db1".to_string()),
            resource_type: Some("Microsoft.Sql/servers/databases".to_string()),
            parent_resource: Some("servers/sql1".to_string()),
            role_definition_name: Some("Reader".to_string()),
            ..Default::default()
        };
        let (query, set) = resolve(&args);
        let query = query.unwrap();
        assert_eq!(set, Some("ResourceWithMail"));
        assert_eq!(query.principal, PrincipalFilter::Mail("alice@contoso.com".to_string()));
        assert_eq!(query.role.as_deref(), Some("Reader"));
        assert_eq!(
            query.scope.path().unwrap(),
            format!(
                "/subscriptions/{SUB}/resourceGroups/rg/providers/Microsoft.Sql/servers/sql1/databases/db1"
            )
        );
    }

    #[test]
    fn test_resource_scope_without_parent_keeps_full_type() {
        let scope = ScopeFilter::Resource {
            subscription: "s".to_string(),
            resource_group: "rg".to_string(),
            resource_type: "Microsoft.Web/sites".to_string(),
            resource_name: "app1".to_string(),
            parent: None,
        };
        assert_eq!(
            scope.path().unwrap(),
            "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Web/sites/app1"
        );

        let nested = ScopeFilter::Resource {
            subscription: "s".to_string(),
            resource_group: "rg".to_string(),
            resource_type: "Microsoft.Sql/servers/databases".to_string(),
            resource_name: "db1".to_string(),
            parent: Some("/servers/sql1/".to_string()),
        };
        assert_eq!(
            nested.path().unwrap(),
            "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Sql/servers/sql1/databases/db1"
        );
    }

    #[test]
    fn test_expand_groups_not_accepted_for_service_principals() {
        let args = RoleAssignmentFilterArgs {
            service_principal_name: Some("http://app".to_string()),
            expand_principal_groups: true,
            ..Default::default()
        };
        assert!(matches!(
            resolve(&args).0,
            Err(Error::AmbiguousOrMissingParameters(_))
        ));

        let args = RoleAssignmentFilterArgs {
            user_principal_name: Some("bob@contoso.com".to_string()),
            expand_principal_groups: true,
            ..Default::default()
        };
        assert!(resolve(&args).0.unwrap().flags.expand_principal_groups);
    }

    #[test]
    fn test_expand_groups_needs_subscription_scope() {
        let args = RoleAssignmentFilterArgs {
            object_id: Some(Uuid::nil()),
            resource_group_name: Some("rg".to_string()),
            expand_principal_groups: true,
            ..Default::default()
        };
        assert!(resolve(&args).0.is_err());
    }

    #[test]
    fn test_scope_and_resource_group_conflict() {
        let args = RoleAssignmentFilterArgs {
            resource_group_name: Some("rg".to_string()),
            scope: Some("/subscriptions/x".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            resolve(&args).0,
            Err(Error::AmbiguousOrMissingParameters(_))
        ));
    }

    #[test]
    fn test_partial_resource_selector_fails() {
        let args = RoleAssignmentFilterArgs {
            resource_group_name: Some("rg".to_string()),
            resource_name: Some("site".to_string()),
            ..Default::default()
        };
        assert!(resolve(&args).0.is_err());
    }

    #[test]
    fn test_explicit_scope_must_be_relative_uri() {
        let args = RoleAssignmentFilterArgs {
            scope: Some("subscriptions/x".to_string()),
            ..Default::default()
        };
        assert!(matches!(resolve(&args).0, Err(Error::InvalidInput(_))));

        let args = RoleAssignmentFilterArgs {
            scope: Some("/subscriptions/x/".to_string()),
            ..Default::default()
        };
        let (query, set) = resolve(&args);
        assert_eq!(set, Some("Scope"));
        assert_eq!(query.unwrap().scope.path().unwrap(), "/subscriptions/x");
    }

    #[test]
    fn test_resource_type_needs_namespace() {
        let scope = ScopeFilter::Resource {
            subscription: SUB.to_string(),
            resource_group: "rg".to_string(),
            resource_type: "sites".to_string(),
            resource_name: "s".to_string(),
            parent: None,
        };
        assert!(matches!(scope.path(), Err(Error::InvalidInput(_))));
    }
}
