//! API Management wire model (`Microsoft.ApiManagement/service` hostname configurations)

use crate::resource::EnumMapping;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostnameType {
    Proxy,
    Portal,
    Management,
    Scm,
}

impl EnumMapping for HostnameType {
    const KIND: &'static str = "hostname type";
    const VARIANTS: &'static [Self] = &[
        HostnameType::Proxy,
        HostnameType::Portal,
        HostnameType::Management,
        HostnameType::Scm,
    ];

    fn as_str(self) -> &'static str {
        match self {
            HostnameType::Proxy => "Proxy",
            HostnameType::Portal => "Portal",
            HostnameType::Management => "Management",
            HostnameType::Scm => "Scm",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateInformation {
    pub thumbprint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostnameConfiguration {
    #[serde(rename = "type")]
    pub hostname_type: HostnameType,
    pub host_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<CertificateInformation>,
}
