//! Azure resource identifiers
//!
//! Resource IDs are hierarchical paths made of key/value segment pairs:
//!
//! ```text
//! /subscriptions/{sub}/resourceGroups/{rg}/providers/{namespace}/{type}/{name}[/{childType}/{childName}]...
//! ```
//!
//! They are parsed pair by pair instead of by fixed position, so IDs at
//! subscription or resource-group scope parse as well as nested child resources.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Parsed Azure resource identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceId {
    subscription_id: String,
    resource_group: Option<String>,
    provider: Option<String>,
    /// `(type, name)` pairs below the provider, outermost first
    resources: Vec<(String, String)>,
}

impl ResourceId {
    /// Build the ID of a top-level resource in a resource group
    pub fn new(
        subscription_id: &str,
        resource_group: &str,
        provider: &str,
        resource_type: &str,
        name: &str,
    ) -> Self {
        Self {
            subscription_id: subscription_id.to_string(),
            resource_group: Some(resource_group.to_string()),
            provider: Some(provider.to_string()),
            resources: vec![(resource_type.to_string(), name.to_string())],
        }
    }

    /// Build the ID of a child resource under this one
    pub fn child(&self, child_type: &str, child_name: &str) -> Self {
        let mut id = self.clone();
        id.resources
            .push((child_type.to_string(), child_name.to_string()));
        id
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    pub fn resource_group(&self) -> Option<&str> {
        self.resource_group.as_deref()
    }

    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    /// Name of the innermost resource
    pub fn name(&self) -> Option<&str> {
        self.resources.last().map(|(_, name)| name.as_str())
    }

    /// Full resource type, e.g. `Microsoft.Network/loadBalancers/frontendIPConfigurations`
    pub fn resource_type(&self) -> Option<String> {
        let provider = self.provider.as_ref()?;
        let mut ty = provider.clone();
        for (segment, _) in &self.resources {
            ty.push('/');
            ty.push_str(segment);
        }
        Some(ty)
    }

    /// Name of the resource of the given type along the path (case-insensitive type match)
    pub fn name_of(&self, resource_type: &str) -> Option<&str> {
        self.resources
            .iter()
            .find(|(ty, _)| ty.eq_ignore_ascii_case(resource_type))
            .map(|(_, name)| name.as_str())
    }
}

/// Extract the resource group name from a resource ID string
pub fn resource_group_of(id: &str) -> Result<String> {
    let parsed: ResourceId = id.parse()?;
    parsed
        .resource_group()
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidResourceId {
            id: id.to_string(),
            reason: "no resourceGroups segment",
        })
}

impl FromStr for ResourceId {
    type Err = Error;

    fn from_str(id: &str) -> Result<Self> {
        let invalid = |reason| Error::InvalidResourceId {
            id: id.to_string(),
            reason,
        };

        let trimmed = id
            .strip_prefix('/')
            .ok_or_else(|| invalid("must start with '/'"))?;
        let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
        let segments: Vec<&str> = trimmed.split('/').collect();

        if segments.iter().any(|s| s.is_empty()) {
            return Err(invalid("empty path segment"));
        }

        let mut iter = segments.into_iter();

        match (iter.next(), iter.next()) {
            (Some(key), Some(sub)) if key.eq_ignore_ascii_case("subscriptions") => {
                let mut parsed = ResourceId {
                    subscription_id: sub.to_string(),
                    resource_group: None,
                    provider: None,
                    resources: Vec::new(),
                };

                while let Some(key) = iter.next() {
                    let value = iter.next().ok_or_else(|| invalid("segment without a value"))?;

                    if parsed.provider.is_some() {
                        parsed.resources.push((key.to_string(), value.to_string()));
                    } else if key.eq_ignore_ascii_case("resourceGroups") {
                        if parsed.resource_group.is_some() {
                            return Err(invalid("duplicate resourceGroups segment"));
                        }
                        parsed.resource_group = Some(value.to_string());
                    } else if key.eq_ignore_ascii_case("providers") {
                        parsed.provider = Some(value.to_string());
                    } else {
                        return Err(invalid("unexpected segment before providers"));
                    }
                }

                if parsed.provider.is_some() && parsed.resources.is_empty() {
                    return Err(invalid("provider without a resource type"));
                }

                Ok(parsed)
            }
            _ => Err(invalid("must start with /subscriptions/{id}")),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/subscriptions/{}", self.subscription_id)?;
        if let Some(rg) = &self.resource_group {
            write!(f, "/resourceGroups/{}", rg)?;
        }
        if let Some(provider) = &self.provider {
            write!(f, "/providers/{}", provider)?;
        }
        for (ty, name) in &self.resources {
            write!(f, "/{}/{}", ty, name)?;
        }
        Ok(())
    }
}
