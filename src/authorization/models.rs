//! Role assignment presentation objects

use serde::{Deserialize, Serialize};

/// One role assignment, or a classic administrator shown as one
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RoleAssignment {
    pub role_assignment_id: String,
    pub scope: String,
    pub display_name: Option<String>,
    pub sign_in_name: Option<String>,
    pub role_definition_name: Option<String>,
    pub role_definition_id: Option<String>,
    pub object_id: String,
    /// `User`, `Group` or `ServicePrincipal`
    pub object_type: String,
}
