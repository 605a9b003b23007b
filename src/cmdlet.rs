//! Per-invocation command lifecycle
//!
//! Every command runs once through
//! `Idle -> ParametersBound -> Resolved -> RequestBuilt -> Invoked -> OutputEmitted`.
//! Handlers that never call the service skip `Invoked`.

use crate::error::{Error, Result};
use crate::resource::parameter_set::{resolve, BoundParameters, ParameterSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Idle,
    ParametersBound,
    Resolved,
    RequestBuilt,
    Invoked,
    OutputEmitted,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::ParametersBound => "parameters-bound",
            Stage::Resolved => "resolved",
            Stage::RequestBuilt => "request-built",
            Stage::Invoked => "invoked",
            Stage::OutputEmitted => "output-emitted",
        };
        f.write_str(name)
    }
}

/// Tracks one command execution
#[derive(Debug)]
pub struct Invocation {
    command: &'static str,
    stage: Stage,
    parameter_set: Option<&'static str>,
}

impl Invocation {
    pub fn new(command: &'static str) -> Self {
        tracing::debug!("{}: {}", command, Stage::Idle);
        Self {
            command,
            stage: Stage::Idle,
            parameter_set: None,
        }
    }

    pub fn command(&self) -> &'static str {
        self.command
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn parameter_set(&self) -> Option<&'static str> {
        self.parameter_set
    }

    fn advance(&mut self, next: Stage) {
        if next <= self.stage {
            tracing::warn!(
                "{}: ignoring stage change {} -> {}",
                self.command,
                self.stage,
                next
            );
            return;
        }
        tracing::info!("{}: {} -> {}", self.command, self.stage, next);
        self.stage = next;
    }

    pub fn bound(&mut self) {
        self.advance(Stage::ParametersBound);
    }

    /// Bind and resolve against declared parameter sets in one step
    pub fn resolve<K: Copy>(
        &mut self,
        sets: &[ParameterSet<K>],
        bound: &BoundParameters,
    ) -> Result<K> {
        self.bound();
        let set = resolve(sets, bound)?;
        self.resolved(set.name);
        Ok(set.kind)
    }

    pub fn resolved(&mut self, parameter_set: &'static str) {
        self.parameter_set = Some(parameter_set);
        self.advance(Stage::Resolved);
    }

    pub fn request_built(&mut self) {
        self.advance(Stage::RequestBuilt);
    }

    pub fn invoked(&mut self) {
        self.advance(Stage::Invoked);
    }

    pub fn emitted(&mut self) {
        self.advance(Stage::OutputEmitted);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GetScope {
    ByName,
    ByResourceGroup,
    All,
}

const GET_SCOPE_SETS: &[ParameterSet<GetScope>] = &[
    ParameterSet {
        kind: GetScope::ByName,
        name: "ByName",
        required: &["Name", "ResourceGroupName"],
        optional: &[],
    },
    ParameterSet {
        kind: GetScope::ByResourceGroup,
        name: "ByResourceGroup",
        required: &["ResourceGroupName"],
        optional: &[],
    },
    ParameterSet {
        kind: GetScope::All,
        name: "All",
        required: &[],
        optional: &[],
    },
];

/// What a `get` command was asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope<'a> {
    ByName { resource_group: &'a str, name: &'a str },
    ByResourceGroup(&'a str),
    All,
}

/// `--name` / `--resource-group-name` pair shared by the `get` commands
#[derive(clap::Args, Debug, Default, Clone)]
pub struct ScopeArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub resource_group_name: Option<String>,
}

impl ScopeArgs {
    pub fn resolve(&self, inv: &mut Invocation) -> Result<Scope<'_>> {
        let bound = BoundParameters::new()
            .bind_opt("Name", &self.name)
            .bind_opt("ResourceGroupName", &self.resource_group_name);

        Ok(match inv.resolve(GET_SCOPE_SETS, &bound)? {
            GetScope::ByName => Scope::ByName {
                resource_group: required(&self.resource_group_name, "ResourceGroupName")?,
                name: required(&self.name, "Name")?,
            },
            GetScope::ByResourceGroup => {
                Scope::ByResourceGroup(required(&self.resource_group_name, "ResourceGroupName")?)
            }
            GetScope::All => Scope::All,
        })
    }
}

/// Value of a parameter the resolved set requires
pub fn required<'a, T>(value: &'a Option<T>, name: &'static str) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| Error::AmbiguousOrMissingParameters(format!("missing required parameter {name}")))
}
