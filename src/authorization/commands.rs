//! `azrm role-assignment ...` command handlers

use super::client::AuthorizationClient;
use super::query::RoleAssignmentFilterArgs;
use crate::arm::ArmClient;
use crate::cmdlet::Invocation;
use crate::error::Result;
use crate::output::Output;
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum RoleAssignmentCommand {
    /// List role assignments matching a principal, scope and role filter
    Get(RoleAssignmentFilterArgs),
}

impl RoleAssignmentCommand {
    pub fn name(&self) -> &'static str {
        match self {
            RoleAssignmentCommand::Get(_) => "get-role-assignment",
        }
    }
}

pub async fn run(cmd: RoleAssignmentCommand, client: &ArmClient, inv: &mut Invocation) -> Result<Output> {
    match cmd {
        RoleAssignmentCommand::Get(args) => {
            let query = args.resolve(&client.subscription_id, inv)?;
            inv.request_built();
            let assignments = AuthorizationClient::new(client)
                .filter_role_assignments(&query)
                .await?;
            inv.invoked();
            Output::sequence(&assignments)
        }
    }
}
