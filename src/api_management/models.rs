//! API Management presentation objects

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HostnameCertificate {
    pub thumbprint: String,
    pub subject: Option<String>,
    pub expiry: Option<String>,
}

/// Custom hostname bound to an API Management service
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HostnameConfiguration {
    pub hostname: String,
    pub hostname_certificate: Option<HostnameCertificate>,
    /// `Proxy`, `Portal`, `Management` or `Scm`
    pub hostname_type: Option<String>,
}
