//! Authorization and directory wire models
//!
//! `Microsoft.Authorization` role assignments, role definitions and classic
//! administrators, plus the handful of Microsoft Graph directory object
//! fields used to describe a principal.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAssignment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub properties: RoleAssignmentProperties,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAssignmentProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_definition_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal_id: Option<String>,
    /// Absent when the principal has been deleted from the directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub properties: RoleDefinitionProperties,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDefinitionProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub role_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassicAdministrator {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub properties: ClassicAdministratorProperties,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassicAdministratorProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    /// Semicolon separated, e.g. `ServiceAdministrator;AccountAdministrator`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Microsoft Graph user, group or service principal
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryObject {
    pub id: String,
    #[serde(rename = "@odata.type", skip_serializing_if = "Option::is_none")]
    pub odata_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_principal_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_principal_names: Option<Vec<String>>,
}

impl DirectoryObject {
    /// `User`, `Group`, `ServicePrincipal`, or `Unknown` for other object types
    pub fn object_type(&self) -> &'static str {
        match self
            .odata_type
            .as_deref()
            .map(|t| t.trim_start_matches("#microsoft.graph."))
        {
            Some("user") => "User",
            Some("group") => "Group",
            Some("servicePrincipal") => "ServicePrincipal",
            _ => "Unknown",
        }
    }

    /// Name the principal signs in with; only users have one
    pub fn sign_in_name(&self) -> Option<&str> {
        if self.object_type() == "User" {
            self.user_principal_name.as_deref()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deleted_principal_has_no_type() {
        let raw = json!({
            "id": "/subscriptions/s/providers/Microsoft.Authorization/roleAssignments/a1",
            "name": "a1",
            "properties": {
                "scope": "/subscriptions/s",
                "roleDefinitionId": "/subscriptions/s/providers/Microsoft.Authorization/roleDefinitions/r1",
                "principalId": "p1"
            }
        });
        let assignment: RoleAssignment = serde_json::from_value(raw).unwrap();
        assert_eq!(assignment.properties.principal_id.as_deref(), Some("p1"));
        assert_eq!(assignment.properties.principal_type, None);
    }

    #[test]
    fn test_directory_object_type() {
        let user: DirectoryObject = serde_json::from_value(json!({
            "@odata.type": "#microsoft.graph.user",
            "id": "u1",
            "userPrincipalName": "alice@contoso.com"
        }))
        .unwrap();
        assert_eq!(user.object_type(), "User");
        assert_eq!(user.sign_in_name(), Some("alice@contoso.com"));

        let app: DirectoryObject = serde_json::from_value(json!({
            "@odata.type": "#microsoft.graph.servicePrincipal",
            "id": "sp1"
        }))
        .unwrap();
        assert_eq!(app.object_type(), "ServicePrincipal");
        assert_eq!(app.sign_in_name(), None);
    }
}
