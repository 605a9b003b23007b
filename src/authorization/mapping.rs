//! Wire -> presentation mapping for role assignments

use super::models::RoleAssignment;
use super::sdk;

/// Last path segment of a resource id (the GUID of a role definition)
pub fn id_leaf(id: &str) -> &str {
    id.trim_end_matches('/').rsplit('/').next().unwrap_or(id)
}

/// True if both ids name the same role definition, regardless of the scope prefix
pub fn same_role_definition(a: &str, b: &str) -> bool {
    id_leaf(a).eq_ignore_ascii_case(id_leaf(b))
}

/// Assignment joined with the directory object of its principal
pub fn role_assignment_from_sdk(
    assignment: &sdk::RoleAssignment,
    role_name: Option<&str>,
    principal: &sdk::DirectoryObject,
) -> RoleAssignment {
    let props = &assignment.properties;
    let object_type = props
        .principal_type
        .clone()
        .unwrap_or_else(|| principal.object_type().to_string());

    RoleAssignment {
        role_assignment_id: assignment.id.clone().unwrap_or_default(),
        scope: props.scope.clone().unwrap_or_default(),
        display_name: principal.display_name.clone(),
        sign_in_name: principal.sign_in_name().map(str::to_string),
        role_definition_name: role_name.map(str::to_string),
        role_definition_id: props.role_definition_id.clone(),
        object_id: props.principal_id.clone().unwrap_or_else(|| principal.id.clone()),
        object_type,
    }
}

/// A classic administrator shown as a subscription-scoped assignment
pub fn classic_administrator_from_sdk(
    subscription: &str,
    admin: &sdk::ClassicAdministrator,
) -> RoleAssignment {
    let email = admin.properties.email_address.clone();
    RoleAssignment {
        role_assignment_id: admin.id.clone().unwrap_or_default(),
        scope: format!("/subscriptions/{subscription}"),
        display_name: email.clone(),
        sign_in_name: email,
        role_definition_name: admin.properties.role.clone(),
        role_definition_id: None,
        object_id: admin.name.clone().unwrap_or_default(),
        object_type: "User".to_string(),
    }
}

/// Keep the classic administrators whose email matches one of the principal's names
pub fn administrator_matches(admin: &sdk::ClassicAdministrator, principal: &sdk::DirectoryObject) -> bool {
    let Some(email) = admin.properties.email_address.as_deref() else {
        return false;
    };
    [principal.mail.as_deref(), principal.user_principal_name.as_deref()]
        .into_iter()
        .flatten()
        .any(|name| name.eq_ignore_ascii_case(email))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(principal_type: Option<&str>) -> sdk::RoleAssignment {
        sdk::RoleAssignment {
            id: Some("/subscriptions/s/providers/Microsoft.Authorization/roleAssignments/a1".to_string()),
            name: Some("a1".to_string()),
            properties: sdk::RoleAssignmentProperties {
                scope: Some("/subscriptions/s".to_string()),
                role_definition_id: Some(
                    "/subscriptions/s/providers/Microsoft.Authorization/roleDefinitions/acdd72a7".to_string(),
                ),
                principal_id: Some("p1".to_string()),
                principal_type: principal_type.map(str::to_string),
            },
        }
    }

    fn alice() -> sdk::DirectoryObject {
        sdk::DirectoryObject {
            id: "p1".to_string(),
            odata_type: Some("#microsoft.graph.user".to_string()),
            display_name: Some("Alice".to_string()),
            user_principal_name: Some("alice@contoso.com".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_object_type_falls_back_to_directory_object() {
        let shown = role_assignment_from_sdk(&assignment(None), Some("Reader"), &alice());
        assert_eq!(shown.object_type, "User");
    }

    #[test]
    fn test_assignment_uses_principal_details() {
        let principal = alice();
        let shown = role_assignment_from_sdk(&assignment(Some("User")), Some("Reader"), &principal);
        assert_eq!(shown.display_name.as_deref(), Some("Alice"));
        assert_eq!(shown.sign_in_name.as_deref(), Some("alice@contoso.com"));
        assert_eq!(shown.role_definition_name.as_deref(), Some("Reader"));
        assert_eq!(shown.object_type, "User");
        assert_eq!(shown.object_id, "p1");
    }

    #[test]
    fn test_role_definition_ids_compare_by_leaf() {
        assert!(same_role_definition(
            "/subscriptions/s/providers/Microsoft.Authorization/roleDefinitions/ACDD72A7",
            "/providers/Microsoft.Authorization/roleDefinitions/acdd72a7"
        ));
        assert!(!same_role_definition("/x/roleDefinitions/a", "/x/roleDefinitions/b"));
    }

    #[test]
    fn test_classic_administrator() {
        let admin = sdk::ClassicAdministrator {
            id: Some("/subscriptions/s/providers/Microsoft.Authorization/classicAdministrators/c1".to_string()),
            name: Some("c1".to_string()),
            properties: sdk::ClassicAdministratorProperties {
                email_address: Some("Admin@contoso.com".to_string()),
                role: Some("ServiceAdministrator;AccountAdministrator".to_string()),
            },
        };
        let shown = classic_administrator_from_sdk("s", &admin);
        assert_eq!(shown.scope, "/subscriptions/s");
        assert_eq!(
            shown.role_definition_name.as_deref(),
            Some("ServiceAdministrator;AccountAdministrator")
        );

        let principal = sdk::DirectoryObject {
            id: "u".to_string(),
            user_principal_name: Some("admin@contoso.com".to_string()),
            ..Default::default()
        };
        assert!(administrator_matches(&admin, &principal));
    }
}
