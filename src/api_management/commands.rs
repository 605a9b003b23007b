//! `azrm api-management ...` command handlers

use super::mapping::DEFAULT_HOSTNAME_TYPE;
use super::models::{HostnameCertificate, HostnameConfiguration};
use super::sdk::HostnameType;
use crate::cmdlet::Invocation;
use crate::error::{Error, Result};
use crate::output::Output;
use crate::resource::EnumMapping;
use clap::{Args, Subcommand};

#[derive(Subcommand, Debug)]
pub enum ApiManagementCommand {
    /// Build a hostname configuration object for use with other commands
    NewHostnameConfiguration(NewHostnameConfigurationArgs),
}

impl ApiManagementCommand {
    pub fn name(&self) -> &'static str {
        match self {
            ApiManagementCommand::NewHostnameConfiguration(_) => "new-hostname-configuration",
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct NewHostnameConfigurationArgs {
    /// Custom hostname
    #[arg(long)]
    pub hostname: String,
    /// Thumbprint of a certificate already imported into the service
    #[arg(long)]
    pub certificate_thumbprint: String,
    /// Proxy (default), Portal, Management or Scm
    #[arg(long)]
    pub hostname_type: Option<String>,
}

pub fn new_hostname_configuration(args: &NewHostnameConfigurationArgs) -> Result<HostnameConfiguration> {
    for (name, value) in [
        ("Hostname", &args.hostname),
        ("CertificateThumbprint", &args.certificate_thumbprint),
    ] {
        if value.trim().is_empty() {
            return Err(Error::InvalidInput(format!("{name} cannot be empty")));
        }
    }
    let hostname_type = HostnameType::parse_opt(args.hostname_type.as_deref())?
        .unwrap_or(DEFAULT_HOSTNAME_TYPE);

    Ok(HostnameConfiguration {
        hostname: args.hostname.clone(),
        hostname_certificate: Some(HostnameCertificate {
            thumbprint: args.certificate_thumbprint.clone(),
            ..Default::default()
        }),
        hostname_type: Some(hostname_type.as_str().to_string()),
    })
}

/// Local-only: nothing here calls the service
pub fn run(cmd: ApiManagementCommand, inv: &mut Invocation) -> Result<Output> {
    match cmd {
        ApiManagementCommand::NewHostnameConfiguration(args) => {
            inv.bound();
            inv.resolved("Default");
            let config = new_hostname_configuration(&args)?;
            inv.request_built();
            Output::single(&config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmdlet::Stage;

    #[test]
    fn test_new_hostname_configuration_defaults_to_proxy() {
        let args = NewHostnameConfigurationArgs {
            hostname: "api.contoso.com".to_string(),
            certificate_thumbprint: "ABC".to_string(),
            hostname_type: None,
        };
        let mut inv = Invocation::new("new-hostname-configuration");
        let output = run(ApiManagementCommand::NewHostnameConfiguration(args), &mut inv).unwrap();
        assert_eq!(inv.stage(), Stage::RequestBuilt);
        let Output::Single(value) = output else {
            panic!("expected a single object");
        };
        assert_eq!(value["HostnameType"], "Proxy");
        assert_eq!(value["HostnameCertificate"]["Thumbprint"], "ABC");
    }

    #[test]
    fn test_empty_thumbprint_rejected() {
        let args = NewHostnameConfigurationArgs {
            hostname: "api.contoso.com".to_string(),
            certificate_thumbprint: " ".to_string(),
            hostname_type: None,
        };
        assert!(matches!(
            new_hostname_configuration(&args),
            Err(Error::InvalidInput(_))
        ));
    }
}
