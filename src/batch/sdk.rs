//! Batch service wire model (data plane, `{account}/jobs`)

use crate::resource::EnumMapping;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnvironmentSetting {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceFile {
    pub blob_source: String,
    pub file_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetadataItem {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateReference {
    pub thumbprint: String,
    pub thumbprint_algorithm: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_location: Option<CertificateStoreLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Vec<CertificateVisibility>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobConstraints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_wall_clock_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_task_retry_count: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobManagerTask {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub command_line: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_settings: Option<Vec<EnvironmentSetting>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_files: Option<Vec<ResourceFile>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kill_job_on_completion: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_exclusive: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPreparationTask {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub command_line: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_settings: Option<Vec<EnvironmentSetting>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_files: Option<Vec<ResourceFile>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_for_success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rerun_on_node_reboot_after_success: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobReleaseTask {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub command_line: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_settings: Option<Vec<EnvironmentSetting>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_files: Option<Vec<ResourceFile>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartTask {
    pub command_line: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_settings: Option<Vec<EnvironmentSetting>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_files: Option<Vec<ResourceFile>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_for_success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_task_retry_count: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolSpecification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub vm_size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_dedicated_nodes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_references: Option<Vec<CertificateReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Vec<MetadataItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_task: Option<StartTask>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoPoolSpecification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_pool_id_prefix: Option<String>,
    pub pool_lifetime_option: PoolLifetimeOption,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_alive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool: Option<PoolSpecification>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolInformation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_pool_specification: Option<AutoPoolSpecification>,
}

/// Fields shared by `JobAddParameter` and `CloudJob`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSpecification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<JobConstraints>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_manager_task: Option<JobManagerTask>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_preparation_task: Option<JobPreparationTask>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_release_task: Option<JobReleaseTask>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_environment_settings: Option<Vec<EnvironmentSetting>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_info: Option<PoolInformation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Vec<MetadataItem>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JobAddParameter {
    pub id: String,
    #[serde(flatten)]
    pub specification: JobSpecification,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudJob {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<JobState>,
    #[serde(flatten)]
    pub specification: JobSpecification,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificateStoreLocation {
    CurrentUser,
    LocalMachine,
}

impl EnumMapping for CertificateStoreLocation {
    const KIND: &'static str = "certificate store location";
    const VARIANTS: &'static [Self] = &[
        CertificateStoreLocation::CurrentUser,
        CertificateStoreLocation::LocalMachine,
    ];

    fn as_str(self) -> &'static str {
        match self {
            CertificateStoreLocation::CurrentUser => "CurrentUser",
            CertificateStoreLocation::LocalMachine => "LocalMachine",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CertificateVisibility {
    StartTask,
    Task,
    RemoteUser,
}

impl EnumMapping for CertificateVisibility {
    const KIND: &'static str = "certificate visibility";
    const VARIANTS: &'static [Self] = &[
        CertificateVisibility::StartTask,
        CertificateVisibility::Task,
        CertificateVisibility::RemoteUser,
    ];

    fn as_str(self) -> &'static str {
        match self {
            CertificateVisibility::StartTask => "StartTask",
            CertificateVisibility::Task => "Task",
            CertificateVisibility::RemoteUser => "RemoteUser",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PoolLifetimeOption {
    Job,
    JobSchedule,
}

impl EnumMapping for PoolLifetimeOption {
    const KIND: &'static str = "pool lifetime option";
    const VARIANTS: &'static [Self] = &[PoolLifetimeOption::Job, PoolLifetimeOption::JobSchedule];

    fn as_str(self) -> &'static str {
        match self {
            PoolLifetimeOption::Job => "Job",
            PoolLifetimeOption::JobSchedule => "JobSchedule",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JobState {
    Active,
    Disabling,
    Disabled,
    Enabling,
    Terminating,
    Completed,
    Deleting,
}

impl EnumMapping for JobState {
    const KIND: &'static str = "job state";
    const VARIANTS: &'static [Self] = &[
        JobState::Active,
        JobState::Disabling,
        JobState::Disabled,
        JobState::Enabling,
        JobState::Terminating,
        JobState::Completed,
        JobState::Deleting,
    ];

    fn as_str(self) -> &'static str {
        match self {
            JobState::Active => "Active",
            JobState::Disabling => "Disabling",
            JobState::Disabled => "Disabled",
            JobState::Enabling => "Enabling",
            JobState::Terminating => "Terminating",
            JobState::Completed => "Completed",
            JobState::Deleting => "Deleting",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_enum_spelling() {
        assert_eq!(
            serde_json::to_value(CertificateStoreLocation::LocalMachine).unwrap(),
            json!("localmachine")
        );
        assert_eq!(
            serde_json::to_value(CertificateVisibility::RemoteUser).unwrap(),
            json!("remoteUser")
        );
        assert_eq!(
            serde_json::to_value(PoolLifetimeOption::JobSchedule).unwrap(),
            json!("jobSchedule")
        );
    }

    #[test]
    fn test_job_add_parameter_is_flat() {
        let job = JobAddParameter {
            id: "job-1".to_string(),
            specification: JobSpecification {
                pool_info: Some(PoolInformation {
                    pool_id: Some("pool-1".to_string()),
                    auto_pool_specification: None,
                }),
                common_environment_settings: Some(vec![]),
                ..Default::default()
            },
        };
        assert_eq!(
            serde_json::to_value(&job).unwrap(),
            json!({
                "id": "job-1",
                "poolInfo": {"poolId": "pool-1"},
                "commonEnvironmentSettings": []
            })
        );
    }
}
