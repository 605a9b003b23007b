//! `azrm network ...` command handlers

use super::client::{NetworkClient, FRONTEND_IP_CONFIGURATIONS, LOAD_BALANCERS, PROVIDER};
use super::models::{FrontendIpConfiguration, LoadBalancer, ResourceRef};
use super::sdk::IpAllocationMethod;
use crate::arm::{ArmClient, ResourceId};
use crate::cmdlet::{required, Invocation, Scope, ScopeArgs};
use crate::error::{Error, Result};
use crate::output::{read_input, Output};
use crate::resource::sync::{ensure_name_available, find_by_name, position_by_name};
use crate::resource::{resolve, BoundParameters, EnumMapping, ParameterSet};
use clap::{Args, Subcommand};
use std::path::PathBuf;

const FRONTEND_KIND: &str = "FrontendIpConfiguration";

#[derive(Subcommand, Debug)]
pub enum NetworkCommand {
    /// Get one load balancer, those of a resource group, or all of them
    GetLoadBalancer(ScopeArgs),
    /// Create or replace the load balancer given via --input
    SetLoadBalancer(LoadBalancerInputArgs),
    /// Add a frontend IP configuration to a load balancer object
    AddFrontendIpConfig(FrontendIpConfigArgs),
    GetFrontendIpConfig(FrontendIpConfigSelectArgs),
    /// Replace a frontend IP configuration of a load balancer object
    SetFrontendIpConfig(FrontendIpConfigArgs),
    RemoveFrontendIpConfig(FrontendIpConfigSelectArgs),
    /// Get one network security group, those of a resource group, or all of them
    GetSecurityGroup(ScopeArgs),
    RemoveSecurityGroup(RemoveSecurityGroupArgs),
}

impl NetworkCommand {
    pub fn name(&self) -> &'static str {
        match self {
            NetworkCommand::GetLoadBalancer(_) => "get-load-balancer",
            NetworkCommand::SetLoadBalancer(_) => "set-load-balancer",
            NetworkCommand::AddFrontendIpConfig(_) => "add-frontend-ip-config",
            NetworkCommand::GetFrontendIpConfig(_) => "get-frontend-ip-config",
            NetworkCommand::SetFrontendIpConfig(_) => "set-frontend-ip-config",
            NetworkCommand::RemoveFrontendIpConfig(_) => "remove-frontend-ip-config",
            NetworkCommand::GetSecurityGroup(_) => "get-security-group",
            NetworkCommand::RemoveSecurityGroup(_) => "remove-security-group",
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct LoadBalancerInputArgs {
    /// Load balancer object as JSON or YAML; `-` reads stdin
    #[arg(long)]
    pub input: PathBuf,
}

/// The load balancer to work on: piped in, or fetched by name
#[derive(Args, Debug, Default, Clone)]
pub struct LoadBalancerSource {
    /// Load balancer object as JSON or YAML; `-` reads stdin
    #[arg(long)]
    pub input: Option<PathBuf>,
    #[arg(long)]
    pub load_balancer_name: Option<String>,
    #[arg(long)]
    pub resource_group_name: Option<String>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct FrontendIpConfigArgs {
    #[command(flatten)]
    pub source: LoadBalancerSource,
    /// Name of the frontend IP configuration
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub private_ip_address: Option<String>,
    #[arg(long)]
    pub subnet_id: Option<String>,
    #[arg(long)]
    pub public_ip_address_id: Option<String>,
    /// Subnet object carrying an `Id`
    #[arg(long)]
    pub subnet: Option<PathBuf>,
    /// Public IP address object carrying an `Id`
    #[arg(long)]
    pub public_ip_address: Option<PathBuf>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct FrontendIpConfigSelectArgs {
    #[command(flatten)]
    pub source: LoadBalancerSource,
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct RemoveSecurityGroupArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub resource_group_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceSet {
    ByObject,
    ByName,
}

const SOURCE_SETS: &[ParameterSet<SourceSet>] = &[
    ParameterSet {
        kind: SourceSet::ByObject,
        name: "ByObject",
        required: &["LoadBalancer"],
        optional: &[],
    },
    ParameterSet {
        kind: SourceSet::ByName,
        name: "ByName",
        required: &["LoadBalancerName", "ResourceGroupName"],
        optional: &[],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrontendSet {
    SetByResourceId,
    SetByResource,
}

const FRONTEND_SETS: &[ParameterSet<FrontendSet>] = &[
    ParameterSet {
        kind: FrontendSet::SetByResourceId,
        name: "SetByResourceId",
        required: &["Name"],
        optional: &["PrivateIpAddress", "SubnetId", "PublicIpAddressId"],
    },
    ParameterSet {
        kind: FrontendSet::SetByResource,
        name: "SetByResource",
        required: &["Name", "Subnet"],
        optional: &["PrivateIpAddress", "PublicIpAddress"],
    },
];

/// Frontend settings after the subnet and public IP references are reduced to IDs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontendSettings {
    pub private_ip_address: Option<String>,
    pub subnet_id: Option<String>,
    pub public_ip_address_id: Option<String>,
}

impl LoadBalancerSource {
    fn bound(&self) -> BoundParameters {
        BoundParameters::new()
            .bind_opt("LoadBalancer", &self.input)
            .bind_opt("LoadBalancerName", &self.load_balancer_name)
            .bind_opt("ResourceGroupName", &self.resource_group_name)
    }

    /// Read or fetch the load balancer; true when the service was called
    async fn load(&self, net: &NetworkClient<'_>) -> Result<(LoadBalancer, bool)> {
        match resolve(SOURCE_SETS, &self.bound())?.kind {
            SourceSet::ByObject => Ok((read_input(required(&self.input, "LoadBalancer")?)?, false)),
            SourceSet::ByName => {
                let lb = net
                    .get_load_balancer(
                        required(&self.resource_group_name, "ResourceGroupName")?,
                        required(&self.load_balancer_name, "LoadBalancerName")?,
                    )
                    .await?;
                Ok((lb, true))
            }
        }
    }
}

impl FrontendIpConfigArgs {
    fn bound(&self) -> BoundParameters {
        BoundParameters::new()
            .bind("Name")
            .bind_opt("PrivateIpAddress", &self.private_ip_address)
            .bind_opt("SubnetId", &self.subnet_id)
            .bind_opt("PublicIpAddressId", &self.public_ip_address_id)
            .bind_opt("Subnet", &self.subnet)
            .bind_opt("PublicIpAddress", &self.public_ip_address)
    }

    /// Resolve the parameter set; object references contribute their `Id`
    fn settings(&self, inv: &mut Invocation) -> Result<FrontendSettings> {
        match inv.resolve(FRONTEND_SETS, &self.bound())? {
            FrontendSet::SetByResourceId => Ok(FrontendSettings {
                private_ip_address: self.private_ip_address.clone(),
                subnet_id: self.subnet_id.clone(),
                public_ip_address_id: self.public_ip_address_id.clone(),
            }),
            FrontendSet::SetByResource => {
                let subnet: ResourceRef = read_input(required(&self.subnet, "Subnet")?)?;
                let public_ip = self
                    .public_ip_address
                    .as_deref()
                    .map(read_input::<ResourceRef>)
                    .transpose()?;
                Ok(FrontendSettings {
                    private_ip_address: self.private_ip_address.clone(),
                    subnet_id: Some(subnet.id),
                    public_ip_address_id: public_ip.map(|p| p.id),
                })
            }
        }
    }
}

/// ID of a frontend IP configuration inside `lb`
pub fn frontend_id(subscription_id: &str, lb: &LoadBalancer, name: &str) -> String {
    ResourceId::new(
        subscription_id,
        &lb.resource_group_name,
        PROVIDER,
        LOAD_BALANCERS,
        &lb.name,
    )
    .child(FRONTEND_IP_CONFIGURATIONS, name)
    .to_string()
}

/// Build a frontend IP configuration.
///
/// A private address and an allocation method only apply with a subnet; the
/// method is `Static` when an address is given and `Dynamic` otherwise.
pub fn build_frontend(name: &str, id: String, settings: &FrontendSettings) -> FrontendIpConfiguration {
    let mut fe = FrontendIpConfiguration {
        name: name.to_string(),
        id: Some(id),
        ..Default::default()
    };

    if let Some(subnet_id) = settings.subnet_id.as_deref().filter(|s| !s.is_empty()) {
        fe.subnet = Some(ResourceRef::new(subnet_id));
        let method = match settings.private_ip_address.as_deref().filter(|s| !s.is_empty()) {
            Some(address) => {
                fe.private_ip_address = Some(address.to_string());
                IpAllocationMethod::Static
            }
            None => IpAllocationMethod::Dynamic,
        };
        fe.private_ip_allocation_method = Some(method.as_str().to_string());
    }

    if let Some(public_ip) = settings.public_ip_address_id.as_deref().filter(|s| !s.is_empty()) {
        fe.public_ip_address = Some(ResourceRef::new(public_ip));
    }

    fe
}

/// Append a new frontend IP configuration; fails before touching `lb` if the name is taken
pub fn add_frontend(
    lb: &mut LoadBalancer,
    subscription_id: &str,
    name: &str,
    settings: &FrontendSettings,
) -> Result<()> {
    let existing = lb.frontend_ip_configurations.as_deref().unwrap_or_default();
    ensure_name_available(existing, FRONTEND_KIND, name)?;

    let fe = build_frontend(name, frontend_id(subscription_id, lb, name), settings);
    lb.frontend_ip_configurations
        .get_or_insert_with(Vec::new)
        .push(fe);
    Ok(())
}

/// Replace the named frontend IP configuration, keeping its ID
pub fn set_frontend(
    lb: &mut LoadBalancer,
    subscription_id: &str,
    name: &str,
    settings: &FrontendSettings,
) -> Result<()> {
    let default_id = frontend_id(subscription_id, lb, name);
    let configs = lb.frontend_ip_configurations.get_or_insert_with(Vec::new);
    let index = position_by_name(configs, FRONTEND_KIND, name)?;

    let id = configs[index].id.clone().unwrap_or(default_id);
    let mut fe = build_frontend(&configs[index].name, id, settings);
    fe.etag = configs[index].etag.take();
    configs[index] = fe;
    Ok(())
}

/// Remove the named frontend IP configuration; a missing name leaves `lb` unchanged
pub fn remove_frontend(lb: &mut LoadBalancer, name: &str) -> Result<()> {
    let Some(configs) = lb.frontend_ip_configurations.as_mut() else {
        return Ok(());
    };
    match position_by_name(configs, FRONTEND_KIND, name) {
        Ok(index) => {
            configs.remove(index);
            Ok(())
        }
        Err(Error::NotFound { .. }) => Ok(()),
        Err(e) => Err(e),
    }
}

pub async fn run(cmd: NetworkCommand, client: &ArmClient, inv: &mut Invocation) -> Result<Output> {
    let net = NetworkClient::new(client);

    match cmd {
        NetworkCommand::GetLoadBalancer(args) => {
            let scope = args.resolve(inv)?;
            inv.request_built();
            let output = match scope {
                Scope::ByName {
                    resource_group,
                    name,
                } => Output::single(&net.get_load_balancer(resource_group, name).await?),
                Scope::ByResourceGroup(rg) => {
                    Output::sequence(&net.list_load_balancers(Some(rg)).await?)
                }
                Scope::All => Output::sequence(&net.list_load_balancers(None).await?),
            };
            inv.invoked();
            output
        }
        NetworkCommand::SetLoadBalancer(args) => {
            inv.bound();
            inv.resolved("LoadBalancer");
            let lb: LoadBalancer = read_input(&args.input)?;
            inv.request_built();
            let saved = net.put_load_balancer(&lb).await?;
            inv.invoked();
            Output::single(&saved)
        }
        NetworkCommand::AddFrontendIpConfig(args) => {
            let settings = args.settings(inv)?;
            let (mut lb, fetched) = args.source.load(&net).await?;
            add_frontend(&mut lb, net.subscription_id(), &args.name, &settings)?;
            finish_local(inv, fetched);
            Output::single(&lb)
        }
        NetworkCommand::SetFrontendIpConfig(args) => {
            let settings = args.settings(inv)?;
            let (mut lb, fetched) = args.source.load(&net).await?;
            set_frontend(&mut lb, net.subscription_id(), &args.name, &settings)?;
            finish_local(inv, fetched);
            Output::single(&lb)
        }
        NetworkCommand::GetFrontendIpConfig(args) => {
            inv.bound();
            inv.resolved(if args.name.is_some() { "ByName" } else { "List" });
            let (lb, fetched) = args.source.load(&net).await?;
            finish_local(inv, fetched);
            let configs = lb.frontend_ip_configurations.unwrap_or_default();
            match &args.name {
                Some(name) => Output::single(find_by_name(&configs, FRONTEND_KIND, name)?),
                None => Output::sequence(&configs),
            }
        }
        NetworkCommand::RemoveFrontendIpConfig(args) => {
            inv.bound();
            let name = required(&args.name, "Name")?;
            inv.resolved("ByName");
            let (mut lb, fetched) = args.source.load(&net).await?;
            remove_frontend(&mut lb, name)?;
            finish_local(inv, fetched);
            Output::single(&lb)
        }
        NetworkCommand::GetSecurityGroup(args) => {
            let scope = args.resolve(inv)?;
            inv.request_built();
            let output = match scope {
                Scope::ByName {
                    resource_group,
                    name,
                } => Output::single(&net.get_security_group(resource_group, name).await?),
                Scope::ByResourceGroup(rg) => {
                    Output::sequence(&net.list_security_groups(Some(rg)).await?)
                }
                Scope::All => Output::sequence(&net.list_security_groups(None).await?),
            };
            inv.invoked();
            output
        }
        NetworkCommand::RemoveSecurityGroup(args) => {
            inv.bound();
            inv.resolved("ByName");
            inv.request_built();
            let deleted = net
                .delete_security_group(&args.resource_group_name, &args.name)
                .await?;
            inv.invoked();
            Ok(Output::confirmation(deleted))
        }
    }
}

/// Stage bookkeeping for handlers that only change a load balancer locally
fn finish_local(inv: &mut Invocation, fetched: bool) {
    inv.request_built();
    if fetched {
        inv.invoked();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUB: &str = "00000000-0000-0000-0000-000000000000";

    fn lb() -> LoadBalancer {
        LoadBalancer {
            name: "lb1".to_string(),
            resource_group_name: "myRG".to_string(),
            frontend_ip_configurations: Some(vec![FrontendIpConfiguration {
                name: "FE1".to_string(),
                ..Default::default()
            }]),
            ..Default::default()
        }
    }

    fn by_id(subnet: Option<&str>, private_ip: Option<&str>) -> FrontendSettings {
        FrontendSettings {
            private_ip_address: private_ip.map(str::to_string),
            subnet_id: subnet.map(str::to_string),
            public_ip_address_id: None,
        }
    }

    #[test]
    fn test_add_rejects_case_differing_duplicate() {
        let mut balancer = lb();
        let before = balancer.clone();
        let err = add_frontend(&mut balancer, SUB, "fe1", &by_id(Some("/subnet"), None)).unwrap_err();
        assert!(matches!(err, Error::DuplicateName { .. }));
        assert_eq!(balancer, before);
    }

    #[test]
    fn test_add_builds_child_id_and_allocation() {
        let mut balancer = lb();
        add_frontend(&mut balancer, SUB, "fe2", &by_id(Some("/subnet"), Some("10.0.0.5"))).unwrap();
        add_frontend(&mut balancer, SUB, "fe3", &by_id(Some("/subnet"), None)).unwrap();

        let configs = balancer.frontend_ip_configurations.unwrap();
        assert_eq!(
            configs[1].id.as_deref(),
            Some("/subscriptions/00000000-0000-0000-0000-000000000000/resourceGroups/myRG/providers/Microsoft.Network/loadBalancers/lb1/frontendIPConfigurations/fe2")
        );
        assert_eq!(configs[1].private_ip_allocation_method.as_deref(), Some("Static"));
        assert_eq!(configs[1].private_ip_address.as_deref(), Some("10.0.0.5"));
        assert_eq!(configs[2].private_ip_allocation_method.as_deref(), Some("Dynamic"));
    }

    #[test]
    fn test_private_ip_without_subnet_is_ignored() {
        let fe = build_frontend("fe", "id".to_string(), &by_id(None, Some("10.0.0.5")));
        assert_eq!(fe.private_ip_address, None);
        assert_eq!(fe.private_ip_allocation_method, None);
        assert_eq!(fe.subnet, None);
    }

    #[test]
    fn test_set_replaces_and_keeps_id() {
        let mut balancer = lb();
        set_frontend(&mut balancer, SUB, "fe1", &by_id(Some("/subnet"), None)).unwrap();
        let fe = &balancer.frontend_ip_configurations.as_ref().unwrap()[0];
        assert_eq!(fe.name, "FE1");
        assert!(fe.id.as_deref().unwrap().ends_with("/frontendIPConfigurations/fe1"));
        assert_eq!(fe.subnet, Some(ResourceRef::new("/subnet")));

        assert!(matches!(
            set_frontend(&mut balancer, SUB, "missing", &FrontendSettings::default()),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn test_remove_is_lenient_about_missing_names() {
        let mut balancer = lb();
        remove_frontend(&mut balancer, "nope").unwrap();
        assert_eq!(balancer.frontend_ip_configurations.as_ref().unwrap().len(), 1);
        remove_frontend(&mut balancer, "fe1").unwrap();
        assert_eq!(balancer.frontend_ip_configurations, Some(vec![]));
    }

    #[test]
    fn test_frontend_parameter_sets() {
        let args = FrontendIpConfigArgs {
            name: "fe".to_string(),
            subnet_id: Some("/subnet".to_string()),
            ..Default::default()
        };
        let mut inv = Invocation::new("add-frontend-ip-config");
        let settings = args.settings(&mut inv).unwrap();
        assert_eq!(inv.parameter_set(), Some("SetByResourceId"));
        assert_eq!(settings.subnet_id.as_deref(), Some("/subnet"));

        let mixed = FrontendIpConfigArgs {
            subnet: Some(PathBuf::from("subnet.json")),
            ..args
        };
        assert!(matches!(
            mixed.settings(&mut Invocation::new("add-frontend-ip-config")),
            Err(Error::AmbiguousOrMissingParameters(_))
        ));
    }

    #[test]
    fn test_source_needs_object_or_name_pair() {
        let source = LoadBalancerSource {
            load_balancer_name: Some("lb1".to_string()),
            ..Default::default()
        };
        assert!(resolve(SOURCE_SETS, &source.bound()).is_err());
    }
}
