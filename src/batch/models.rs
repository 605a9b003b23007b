//! Batch job presentation objects

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EnvironmentSetting {
    pub name: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ResourceFile {
    pub blob_source: String,
    pub file_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MetadataItem {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CertificateReference {
    pub thumbprint: String,
    pub thumbprint_algorithm: String,
    /// `CurrentUser` or `LocalMachine`
    pub store_location: Option<String>,
    pub store_name: Option<String>,
    /// Any of `StartTask`, `Task`, `RemoteUser`
    pub visibility: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct JobConstraints {
    /// ISO 8601 duration
    pub max_wall_clock_time: Option<String>,
    pub max_task_retry_count: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct JobManagerTask {
    pub id: String,
    pub display_name: Option<String>,
    pub command_line: String,
    pub environment_settings: Option<Vec<EnvironmentSetting>>,
    pub resource_files: Option<Vec<ResourceFile>>,
    pub kill_job_on_completion: Option<bool>,
    pub run_exclusive: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct JobPreparationTask {
    pub id: Option<String>,
    pub command_line: String,
    pub environment_settings: Option<Vec<EnvironmentSetting>>,
    pub resource_files: Option<Vec<ResourceFile>>,
    pub wait_for_success: Option<bool>,
    pub rerun_on_node_reboot_after_success: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct JobReleaseTask {
    pub id: Option<String>,
    pub command_line: String,
    pub environment_settings: Option<Vec<EnvironmentSetting>>,
    pub resource_files: Option<Vec<ResourceFile>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct StartTask {
    pub command_line: String,
    pub environment_settings: Option<Vec<EnvironmentSetting>>,
    pub resource_files: Option<Vec<ResourceFile>>,
    pub wait_for_success: Option<bool>,
    pub max_task_retry_count: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PoolSpecification {
    pub display_name: Option<String>,
    pub vm_size: String,
    pub target_dedicated_nodes: Option<i32>,
    pub certificate_references: Option<Vec<CertificateReference>>,
    pub metadata: Option<Vec<MetadataItem>>,
    pub start_task: Option<StartTask>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AutoPoolSpecification {
    pub auto_pool_id_prefix: Option<String>,
    /// `Job` or `JobSchedule`
    pub pool_lifetime_option: String,
    pub keep_alive: Option<bool>,
    pub pool: Option<PoolSpecification>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PoolInformation {
    pub pool_id: Option<String>,
    pub auto_pool_specification: Option<AutoPoolSpecification>,
}

/// Everything a job is created from, apart from its ID
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct JobSpecification {
    pub display_name: Option<String>,
    pub priority: Option<i32>,
    pub constraints: Option<JobConstraints>,
    pub job_manager_task: Option<JobManagerTask>,
    pub job_preparation_task: Option<JobPreparationTask>,
    pub job_release_task: Option<JobReleaseTask>,
    pub common_environment_settings: Option<Vec<EnvironmentSetting>>,
    pub pool_information: Option<PoolInformation>,
    pub metadata: Option<Vec<MetadataItem>>,
}

/// A job as reported by the service
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CloudJob {
    pub id: String,
    pub url: Option<String>,
    pub e_tag: Option<String>,
    pub creation_time: Option<String>,
    /// `Active`, `Disabling`, `Disabled`, `Enabling`, `Terminating`, `Completed` or `Deleting`
    pub state: Option<String>,
    #[serde(flatten)]
    pub specification: JobSpecification,
}
