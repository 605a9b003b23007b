//! `azrm batch ...` command handlers

use super::client::BatchClient;
use super::models::{JobSpecification, PoolInformation};
use crate::arm::ArmClient;
use crate::cmdlet::{required, Invocation};
use crate::error::Result;
use crate::output::{read_input, Output};
use crate::resource::{BoundParameters, ParameterSet};
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum BatchCommand {
    /// Add a job to a Batch account
    NewJob(NewJobArgs),
    /// Get a job from a Batch account
    GetJob(GetJobArgs),
}

impl BatchCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BatchCommand::NewJob(_) => "new-job",
            BatchCommand::GetJob(_) => "get-job",
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct NewJobArgs {
    /// Batch account URL
    #[arg(long)]
    pub account_endpoint: String,
    #[arg(long)]
    pub id: String,
    /// Run on an existing pool
    #[arg(long)]
    pub pool_id: Option<String>,
    #[arg(long)]
    pub priority: Option<i32>,
    #[arg(long)]
    pub display_name: Option<String>,
    /// Job specification object as JSON or YAML; `-` reads stdin
    #[arg(long)]
    pub input: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct GetJobArgs {
    #[arg(long)]
    pub account_endpoint: String,
    #[arg(long)]
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NewJobSet {
    PoolId,
    Specification,
}

const NEW_JOB_SETS: &[ParameterSet<NewJobSet>] = &[
    ParameterSet {
        kind: NewJobSet::PoolId,
        name: "PoolId",
        required: &["Id", "PoolId"],
        optional: &["Priority", "DisplayName"],
    },
    ParameterSet {
        kind: NewJobSet::Specification,
        name: "Specification",
        required: &["Id", "InputObject"],
        optional: &[],
    },
];

impl NewJobArgs {
    fn specification(&self, inv: &mut Invocation) -> Result<JobSpecification> {
        let bound = BoundParameters::new()
            .bind("Id")
            .bind_opt("PoolId", &self.pool_id)
            .bind_opt("Priority", &self.priority)
            .bind_opt("DisplayName", &self.display_name)
            .bind_opt("InputObject", &self.input);

        match inv.resolve(NEW_JOB_SETS, &bound)? {
            NewJobSet::PoolId => Ok(JobSpecification {
                display_name: self.display_name.clone(),
                priority: self.priority,
                pool_information: Some(PoolInformation {
                    pool_id: Some(required(&self.pool_id, "PoolId")?.clone()),
                    auto_pool_specification: None,
                }),
                ..Default::default()
            }),
            NewJobSet::Specification => read_input(required(&self.input, "InputObject")?),
        }
    }
}

pub async fn run(cmd: BatchCommand, client: &ArmClient, inv: &mut Invocation) -> Result<Output> {
    match cmd {
        BatchCommand::NewJob(args) => {
            let spec = args.specification(inv)?;
            let batch = BatchClient::new(client, &args.account_endpoint)?;
            inv.request_built();
            let created = batch.add_job(&args.id, &spec).await?;
            inv.invoked();
            Ok(Output::confirmation(created))
        }
        BatchCommand::GetJob(args) => {
            inv.bound();
            inv.resolved("Id");
            let batch = BatchClient::new(client, &args.account_endpoint)?;
            inv.request_built();
            let job = batch.get_job(&args.id).await?;
            inv.invoked();
            Output::single(&job)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_pool_id_set_builds_pool_information() {
        let args = NewJobArgs {
            account_endpoint: "https://acct".to_string(),
            id: "job-1".to_string(),
            pool_id: Some("pool-1".to_string()),
            priority: Some(5),
            ..Default::default()
        };
        let spec = args.specification(&mut Invocation::new("new-job")).unwrap();
        assert_eq!(spec.priority, Some(5));
        assert_eq!(
            spec.pool_information.unwrap().pool_id.as_deref(),
            Some("pool-1")
        );
        assert_eq!(spec.common_environment_settings, None);
    }

    #[test]
    fn test_pool_id_and_specification_conflict() {
        let args = NewJobArgs {
            id: "job-1".to_string(),
            pool_id: Some("pool-1".to_string()),
            input: Some(PathBuf::from("spec.json")),
            ..Default::default()
        };
        assert!(matches!(
            args.specification(&mut Invocation::new("new-job")),
            Err(Error::AmbiguousOrMissingParameters(_))
        ));
    }
}
