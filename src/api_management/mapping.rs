//! Presentation <-> wire mapping for hostname configurations

use super::models::{HostnameCertificate, HostnameConfiguration};
use super::sdk::{self, HostnameType};
use crate::error::Result;
use crate::resource::EnumMapping;

pub const DEFAULT_HOSTNAME_TYPE: HostnameType = HostnameType::Proxy;

pub fn hostname_configuration_to_sdk(config: &HostnameConfiguration) -> Result<sdk::HostnameConfiguration> {
    let hostname_type = HostnameType::parse_opt(config.hostname_type.as_deref())?
        .unwrap_or(DEFAULT_HOSTNAME_TYPE);
    Ok(sdk::HostnameConfiguration {
        hostname_type,
        host_name: config.hostname.clone(),
        certificate: config
            .hostname_certificate
            .as_ref()
            .map(|c| sdk::CertificateInformation {
                thumbprint: c.thumbprint.clone(),
                subject: c.subject.clone(),
                expiry: c.expiry.clone(),
            }),
    })
}

pub fn hostname_configuration_from_sdk(config: &sdk::HostnameConfiguration) -> HostnameConfiguration {
    HostnameConfiguration {
        hostname: config.host_name.clone(),
        hostname_certificate: config.certificate.as_ref().map(|c| HostnameCertificate {
            thumbprint: c.thumbprint.clone(),
            subject: c.subject.clone(),
            expiry: c.expiry.clone(),
        }),
        hostname_type: Some(config.hostname_type.as_str().to_string()),
    }
}
