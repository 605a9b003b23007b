//! `azrm traffic-manager ...` command handlers

use super::client::TrafficManagerClient;
use super::models::{TrafficManagerEndpoint, TrafficManagerProfile};
use super::sdk::{EndpointType, MonitorProtocol, Status, TrafficRoutingMethod};
use crate::arm::tags::parse_tags;
use crate::arm::ArmClient;
use crate::cmdlet::{required, Invocation, Scope, ScopeArgs};
use crate::error::Result;
use crate::output::{read_input, Output};
use crate::resource::sync::ensure_name_available;
use crate::resource::{BoundParameters, EnumMapping, ParameterSet};
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum TrafficManagerCommand {
    /// Create a profile
    NewProfile(NewProfileArgs),
    /// Get one profile, the profiles of a resource group, or all profiles
    GetProfile(ScopeArgs),
    /// Replace a profile with the object given via --input
    SetProfile(InputArgs),
    RemoveProfile(ProfileTargetArgs),
    EnableProfile(ProfileTargetArgs),
    DisableProfile(ProfileTargetArgs),
    /// Create an endpoint in an existing profile
    NewEndpoint(NewEndpointArgs),
    GetEndpoint(EndpointFieldArgs),
    /// Replace an endpoint with the object given via --input
    SetEndpoint(InputArgs),
    RemoveEndpoint(EndpointTargetArgs),
    EnableEndpoint(EndpointTargetArgs),
    DisableEndpoint(EndpointTargetArgs),
    /// Append an endpoint to a profile object locally; nothing is sent
    AddEndpointConfig(AddEndpointConfigArgs),
}

impl TrafficManagerCommand {
    pub fn name(&self) -> &'static str {
        match self {
            TrafficManagerCommand::NewProfile(_) => "new-profile",
            TrafficManagerCommand::GetProfile(_) => "get-profile",
            TrafficManagerCommand::SetProfile(_) => "set-profile",
            TrafficManagerCommand::RemoveProfile(_) => "remove-profile",
            TrafficManagerCommand::EnableProfile(_) => "enable-profile",
            TrafficManagerCommand::DisableProfile(_) => "disable-profile",
            TrafficManagerCommand::NewEndpoint(_) => "new-endpoint",
            TrafficManagerCommand::GetEndpoint(_) => "get-endpoint",
            TrafficManagerCommand::SetEndpoint(_) => "set-endpoint",
            TrafficManagerCommand::RemoveEndpoint(_) => "remove-endpoint",
            TrafficManagerCommand::EnableEndpoint(_) => "enable-endpoint",
            TrafficManagerCommand::DisableEndpoint(_) => "disable-endpoint",
            TrafficManagerCommand::AddEndpointConfig(_) => "add-endpoint-config",
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct NewProfileArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub resource_group_name: String,
    #[arg(long)]
    pub relative_dns_name: String,
    #[arg(long)]
    pub ttl: u32,
    #[arg(long)]
    pub traffic_routing_method: String,
    #[arg(long)]
    pub monitor_protocol: String,
    #[arg(long)]
    pub monitor_port: u32,
    #[arg(long)]
    pub monitor_path: Option<String>,
    #[arg(long)]
    pub profile_status: Option<String>,
    /// `key=value`, repeatable
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub struct InputArgs {
    /// Presentation object as JSON or YAML; `-` reads stdin
    #[arg(long)]
    pub input: PathBuf,
}

/// A profile identified by name or piped in as an object
#[derive(Args, Debug, Default)]
pub struct ProfileTargetArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub resource_group_name: Option<String>,
    #[arg(long)]
    pub input: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct EndpointFieldArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long = "type")]
    pub endpoint_type: String,
    #[arg(long)]
    pub profile_name: String,
    #[arg(long)]
    pub resource_group_name: String,
}

/// An endpoint identified by its fields or piped in as an object
#[derive(Args, Debug, Default)]
pub struct EndpointTargetArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long = "type")]
    pub endpoint_type: Option<String>,
    #[arg(long)]
    pub profile_name: Option<String>,
    #[arg(long)]
    pub resource_group_name: Option<String>,
    #[arg(long)]
    pub input: Option<PathBuf>,
}

/// Endpoint settings shared by new-endpoint and add-endpoint-config
#[derive(Args, Debug, Default, Clone)]
pub struct EndpointSettings {
    #[arg(long = "type")]
    pub endpoint_type: String,
    #[arg(long)]
    pub target_resource_id: Option<String>,
    #[arg(long)]
    pub target: Option<String>,
    #[arg(long)]
    pub endpoint_status: Option<String>,
    #[arg(long)]
    pub weight: Option<u32>,
    #[arg(long)]
    pub priority: Option<u32>,
    #[arg(long)]
    pub endpoint_location: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct NewEndpointArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub profile_name: String,
    #[arg(long)]
    pub resource_group_name: String,
    #[command(flatten)]
    pub settings: EndpointSettings,
}

#[derive(Args, Debug, Default)]
pub struct AddEndpointConfigArgs {
    /// Profile object to extend
    #[arg(long)]
    pub input: PathBuf,
    #[arg(long)]
    pub endpoint_name: String,
    #[command(flatten)]
    pub settings: EndpointSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TargetSet {
    Fields,
    Object,
}

const PROFILE_TARGET_SETS: &[ParameterSet<TargetSet>] = &[
    ParameterSet {
        kind: TargetSet::Fields,
        name: "Fields",
        required: &["Name", "ResourceGroupName"],
        optional: &[],
    },
    ParameterSet {
        kind: TargetSet::Object,
        name: "Object",
        required: &["InputObject"],
        optional: &[],
    },
];

const ENDPOINT_TARGET_SETS: &[ParameterSet<TargetSet>] = &[
    ParameterSet {
        kind: TargetSet::Fields,
        name: "Fields",
        required: &["Name", "Type", "ProfileName", "ResourceGroupName"],
        optional: &[],
    },
    ParameterSet {
        kind: TargetSet::Object,
        name: "Object",
        required: &["InputObject"],
        optional: &[],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EndpointTargetKind {
    ByTargetResourceId,
    ByTarget,
}

const ENDPOINT_SETTING_SETS: &[ParameterSet<EndpointTargetKind>] = &[
    ParameterSet {
        kind: EndpointTargetKind::ByTargetResourceId,
        name: "ByTargetResourceId",
        required: &["TargetResourceId"],
        optional: &["EndpointStatus", "Weight", "Priority", "EndpointLocation"],
    },
    ParameterSet {
        kind: EndpointTargetKind::ByTarget,
        name: "ByTarget",
        required: &["Target"],
        optional: &["EndpointStatus", "Weight", "Priority", "EndpointLocation"],
    },
];

impl EndpointSettings {
    fn bound(&self) -> BoundParameters {
        BoundParameters::new()
            .bind_opt("TargetResourceId", &self.target_resource_id)
            .bind_opt("Target", &self.target)
            .bind_opt("EndpointStatus", &self.endpoint_status)
            .bind_opt("Weight", &self.weight)
            .bind_opt("Priority", &self.priority)
            .bind_opt("EndpointLocation", &self.endpoint_location)
    }

    /// Build the endpoint; type and status are validated against their tables
    fn to_endpoint(
        &self,
        name: &str,
        profile_name: &str,
        resource_group: &str,
    ) -> Result<TrafficManagerEndpoint> {
        let endpoint_type = EndpointType::parse(&self.endpoint_type)?;
        let endpoint_status = Status::parse_opt(self.endpoint_status.as_deref())?;

        Ok(TrafficManagerEndpoint {
            name: name.to_string(),
            resource_group_name: resource_group.to_string(),
            profile_name: profile_name.to_string(),
            endpoint_type: endpoint_type.as_str().to_string(),
            target_resource_id: self.target_resource_id.clone(),
            target: self.target.clone(),
            endpoint_status: endpoint_status.map(|s| s.as_str().to_string()),
            location: self.endpoint_location.clone(),
            priority: self.priority,
            weight: self.weight,
            endpoint_monitor_status: None,
        })
    }
}

impl ProfileTargetArgs {
    fn resolve(&self, inv: &mut Invocation) -> Result<TrafficManagerProfile> {
        let bound = BoundParameters::new()
            .bind_opt("Name", &self.name)
            .bind_opt("ResourceGroupName", &self.resource_group_name)
            .bind_opt("InputObject", &self.input);

        match inv.resolve(PROFILE_TARGET_SETS, &bound)? {
            TargetSet::Fields => Ok(TrafficManagerProfile {
                name: required(&self.name, "Name")?.clone(),
                resource_group_name: required(&self.resource_group_name, "ResourceGroupName")?
                    .clone(),
                ..Default::default()
            }),
            TargetSet::Object => read_input(required(&self.input, "InputObject")?),
        }
    }
}

impl EndpointTargetArgs {
    fn resolve(&self, inv: &mut Invocation) -> Result<TrafficManagerEndpoint> {
        let bound = BoundParameters::new()
            .bind_opt("Name", &self.name)
            .bind_opt("Type", &self.endpoint_type)
            .bind_opt("ProfileName", &self.profile_name)
            .bind_opt("ResourceGroupName", &self.resource_group_name)
            .bind_opt("InputObject", &self.input);

        match inv.resolve(ENDPOINT_TARGET_SETS, &bound)? {
            TargetSet::Fields => {
                let endpoint_type = EndpointType::parse(required(&self.endpoint_type, "Type")?)?;
                Ok(TrafficManagerEndpoint {
                    name: required(&self.name, "Name")?.clone(),
                    endpoint_type: endpoint_type.as_str().to_string(),
                    profile_name: required(&self.profile_name, "ProfileName")?.clone(),
                    resource_group_name: required(&self.resource_group_name, "ResourceGroupName")?
                        .clone(),
                    ..Default::default()
                })
            }
            TargetSet::Object => read_input(required(&self.input, "InputObject")?),
        }
    }
}

pub async fn run(
    cmd: TrafficManagerCommand,
    client: &ArmClient,
    inv: &mut Invocation,
) -> Result<Output> {
    let tm = TrafficManagerClient::new(client);

    match cmd {
        TrafficManagerCommand::NewProfile(args) => {
            inv.bound();
            inv.resolved("Default");
            let profile = new_profile(&args)?;
            inv.request_built();
            let created = tm.create_profile(&profile).await?;
            inv.invoked();
            Output::single(&created)
        }
        TrafficManagerCommand::GetProfile(args) => {
            let scope = args.resolve(inv)?;
            inv.request_built();
            let output = match scope {
                Scope::ByName {
                    resource_group,
                    name,
                } => Output::single(&tm.get_profile(resource_group, name).await?),
                Scope::ByResourceGroup(rg) => Output::sequence(&tm.list_profiles(Some(rg)).await?),
                Scope::All => Output::sequence(&tm.list_profiles(None).await?),
            };
            inv.invoked();
            output
        }
        TrafficManagerCommand::SetProfile(args) => {
            inv.bound();
            inv.resolved("InputObject");
            let profile: TrafficManagerProfile = read_input(&args.input)?;
            inv.request_built();
            let updated = tm.set_profile(&profile).await?;
            inv.invoked();
            Output::single(&updated)
        }
        TrafficManagerCommand::RemoveProfile(args) => {
            let profile = args.resolve(inv)?;
            inv.request_built();
            let deleted = tm
                .delete_profile(&profile.resource_group_name, &profile.name)
                .await?;
            inv.invoked();
            Ok(Output::confirmation(deleted))
        }
        TrafficManagerCommand::EnableProfile(args) => set_profile_status(&tm, &args, true, inv).await,
        TrafficManagerCommand::DisableProfile(args) => set_profile_status(&tm, &args, false, inv).await,
        TrafficManagerCommand::NewEndpoint(args) => {
            inv.resolve(ENDPOINT_SETTING_SETS, &args.settings.bound())?;
            let endpoint = args.settings.to_endpoint(
                &args.name,
                &args.profile_name,
                &args.resource_group_name,
            )?;
            inv.request_built();
            let created = tm.create_endpoint(&endpoint).await?;
            inv.invoked();
            Output::single(&created)
        }
        TrafficManagerCommand::GetEndpoint(args) => {
            inv.bound();
            inv.resolved("Fields");
            let endpoint_type = EndpointType::parse(&args.endpoint_type)?;
            inv.request_built();
            let endpoint = tm
                .get_endpoint(
                    &args.resource_group_name,
                    &args.profile_name,
                    endpoint_type,
                    &args.name,
                )
                .await?;
            inv.invoked();
            Output::single(&endpoint)
        }
        TrafficManagerCommand::SetEndpoint(args) => {
            inv.bound();
            inv.resolved("InputObject");
            let endpoint: TrafficManagerEndpoint = read_input(&args.input)?;
            inv.request_built();
            let updated = tm.set_endpoint(&endpoint).await?;
            inv.invoked();
            Output::single(&updated)
        }
        TrafficManagerCommand::RemoveEndpoint(args) => {
            let endpoint = args.resolve(inv)?;
            let endpoint_type = EndpointType::parse(&endpoint.endpoint_type)?;
            inv.request_built();
            let deleted = tm
                .delete_endpoint(
                    &endpoint.resource_group_name,
                    &endpoint.profile_name,
                    endpoint_type,
                    &endpoint.name,
                )
                .await?;
            inv.invoked();
            Ok(Output::confirmation(deleted))
        }
        TrafficManagerCommand::EnableEndpoint(args) => set_endpoint_status(&tm, &args, true, inv).await,
        TrafficManagerCommand::DisableEndpoint(args) => {
            set_endpoint_status(&tm, &args, false, inv).await
        }
        TrafficManagerCommand::AddEndpointConfig(args) => {
            inv.resolve(ENDPOINT_SETTING_SETS, &args.settings.bound())?;
            let mut profile: TrafficManagerProfile = read_input(&args.input)?;
            add_endpoint_config(&mut profile, &args.endpoint_name, &args.settings)?;
            inv.request_built();
            Output::single(&profile)
        }
    }
}

async fn set_profile_status(
    tm: &TrafficManagerClient<'_>,
    args: &ProfileTargetArgs,
    enable: bool,
    inv: &mut Invocation,
) -> Result<Output> {
    let profile = args.resolve(inv)?;
    inv.request_built();
    let changed = tm.enable_disable_profile(&profile, enable).await?;
    inv.invoked();
    Ok(Output::confirmation(changed))
}

async fn set_endpoint_status(
    tm: &TrafficManagerClient<'_>,
    args: &EndpointTargetArgs,
    enable: bool,
    inv: &mut Invocation,
) -> Result<Output> {
    let endpoint = args.resolve(inv)?;
    inv.request_built();
    let changed = tm.enable_disable_endpoint(&endpoint, enable).await?;
    inv.invoked();
    Ok(Output::confirmation(changed))
}

fn new_profile(args: &NewProfileArgs) -> Result<TrafficManagerProfile> {
    let routing = TrafficRoutingMethod::parse(&args.traffic_routing_method)?;
    let protocol = MonitorProtocol::parse(&args.monitor_protocol)?;
    let status = Status::parse_opt(args.profile_status.as_deref())?.unwrap_or(Status::Enabled);

    Ok(TrafficManagerProfile {
        name: args.name.clone(),
        resource_group_name: args.resource_group_name.clone(),
        relative_dns_name: Some(args.relative_dns_name.clone()),
        ttl: Some(args.ttl),
        profile_status: Some(status.as_str().to_string()),
        traffic_routing_method: Some(routing.as_str().to_string()),
        monitor_protocol: Some(protocol.as_str().to_string()),
        monitor_port: Some(args.monitor_port),
        monitor_path: args.monitor_path.clone(),
        endpoints: None,
        tags: parse_tags(&args.tags)?,
    })
}

/// Append a new endpoint to `profile`; fails before touching it if the name is taken
pub fn add_endpoint_config(
    profile: &mut TrafficManagerProfile,
    endpoint_name: &str,
    settings: &EndpointSettings,
) -> Result<()> {
    let existing = profile.endpoints.as_deref().unwrap_or_default();
    ensure_name_available(existing, "Endpoint", endpoint_name)?;

    let endpoint = settings.to_endpoint(
        endpoint_name,
        &profile.name,
        &profile.resource_group_name,
    )?;
    profile.endpoints.get_or_insert_with(Vec::new).push(endpoint);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn external(target: &str) -> EndpointSettings {
        EndpointSettings {
            endpoint_type: "ExternalEndpoints".to_string(),
            target: Some(target.to_string()),
            endpoint_status: Some("enabled".to_string()),
            ..Default::default()
        }
    }

    fn profile() -> TrafficManagerProfile {
        TrafficManagerProfile {
            name: "p1".to_string(),
            resource_group_name: "rg".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_endpoint_config_appends() {
        let mut p = profile();
        add_endpoint_config(&mut p, "ep1", &external("a.contoso.com")).unwrap();
        add_endpoint_config(&mut p, "ep2", &external("b.contoso.com")).unwrap();

        let eps = p.endpoints.unwrap();
        assert_eq!(eps.len(), 2);
        assert_eq!(eps[1].name, "ep2");
        assert_eq!(eps[1].profile_name, "p1");
        assert_eq!(eps[1].endpoint_status.as_deref(), Some("Enabled"));
    }

    #[test]
    fn test_add_endpoint_config_rejects_duplicate_before_mutation() {
        let mut p = profile();
        add_endpoint_config(&mut p, "EP1", &external("a.contoso.com")).unwrap();
        let before = p.clone();

        let err = add_endpoint_config(&mut p, "ep1", &external("b.contoso.com")).unwrap_err();
        assert!(matches!(err, Error::DuplicateName { .. }));
        assert_eq!(p, before);
    }

    #[test]
    fn test_add_endpoint_config_rejects_unknown_type() {
        let mut p = profile();
        let mut settings = external("a.contoso.com");
        settings.endpoint_type = "LocalEndpoints".to_string();
        assert!(matches!(
            add_endpoint_config(&mut p, "ep1", &settings),
            Err(Error::InvalidEnumValue { .. })
        ));
        assert_eq!(p.endpoints, None);
    }

    #[test]
    fn test_endpoint_settings_need_exactly_one_target() {
        let mut inv = Invocation::new("new-endpoint");
        let mut settings = external("a.contoso.com");
        settings.target_resource_id = Some("/subscriptions/s/resourceGroups/rg".to_string());
        assert!(matches!(
            inv.resolve(ENDPOINT_SETTING_SETS, &settings.bound()),
            Err(Error::AmbiguousOrMissingParameters(_))
        ));

        let mut inv = Invocation::new("new-endpoint");
        assert_eq!(
            inv.resolve(ENDPOINT_SETTING_SETS, &external("x").bound()).unwrap(),
            EndpointTargetKind::ByTarget
        );
    }

    #[test]
    fn test_new_profile_validates_tags_and_enums() {
        let args = NewProfileArgs {
            name: "p1".to_string(),
            resource_group_name: "rg".to_string(),
            relative_dns_name: "contoso".to_string(),
            ttl: 30,
            traffic_routing_method: "priority".to_string(),
            monitor_protocol: "http".to_string(),
            monitor_port: 80,
            tags: vec!["env=prod".to_string()],
            ..Default::default()
        };
        let p = new_profile(&args).unwrap();
        assert_eq!(p.traffic_routing_method.as_deref(), Some("Priority"));
        assert_eq!(p.monitor_protocol.as_deref(), Some("HTTP"));
        assert_eq!(p.profile_status.as_deref(), Some("Enabled"));
        assert_eq!(p.tags.unwrap()["env"], "prod");

        let bad = NewProfileArgs {
            tags: vec!["env=a".to_string(), "ENV=b".to_string()],
            ..args
        };
        assert!(matches!(new_profile(&bad), Err(Error::InvalidInput(_))));
    }
}
