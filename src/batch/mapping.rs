//! Job specification synchronization.
//!
//! Every nested object is optional; an absent level maps to an absent level
//! and nothing below it is visited. Collections go through [`synced_list`] so
//! an omitted list never turns into an empty one.

use super::models as ps;
use super::sdk;
use super::sdk::{CertificateStoreLocation, CertificateVisibility, JobState, PoolLifetimeOption};
use crate::error::Result;
use crate::resource::sync::{synced_list, try_synced_list};
use crate::resource::EnumMapping;

fn environment_to_sdk(e: &ps::EnvironmentSetting) -> sdk::EnvironmentSetting {
    sdk::EnvironmentSetting {
        name: e.name.clone(),
        value: e.value.clone(),
    }
}

fn environment_from_sdk(e: &sdk::EnvironmentSetting) -> ps::EnvironmentSetting {
    ps::EnvironmentSetting {
        name: e.name.clone(),
        value: e.value.clone(),
    }
}

fn resource_file_to_sdk(r: &ps::ResourceFile) -> sdk::ResourceFile {
    sdk::ResourceFile {
        blob_source: r.blob_source.clone(),
        file_path: r.file_path.clone(),
    }
}

fn resource_file_from_sdk(r: &sdk::ResourceFile) -> ps::ResourceFile {
    ps::ResourceFile {
        blob_source: r.blob_source.clone(),
        file_path: r.file_path.clone(),
    }
}

fn metadata_to_sdk(m: &ps::MetadataItem) -> sdk::MetadataItem {
    sdk::MetadataItem {
        name: m.name.clone(),
        value: m.value.clone(),
    }
}

fn metadata_from_sdk(m: &sdk::MetadataItem) -> ps::MetadataItem {
    ps::MetadataItem {
        name: m.name.clone(),
        value: m.value.clone(),
    }
}

fn certificate_to_sdk(c: &ps::CertificateReference) -> Result<sdk::CertificateReference> {
    Ok(sdk::CertificateReference {
        thumbprint: c.thumbprint.clone(),
        thumbprint_algorithm: c.thumbprint_algorithm.clone(),
        store_location: CertificateStoreLocation::parse_opt(c.store_location.as_deref())?,
        store_name: c.store_name.clone(),
        visibility: try_synced_list(c.visibility.as_deref(), |v| CertificateVisibility::parse(v))?,
    })
}

fn certificate_from_sdk(c: &sdk::CertificateReference) -> ps::CertificateReference {
    ps::CertificateReference {
        thumbprint: c.thumbprint.clone(),
        thumbprint_algorithm: c.thumbprint_algorithm.clone(),
        store_location: c.store_location.map(|l| l.as_str().to_string()),
        store_name: c.store_name.clone(),
        visibility: synced_list(c.visibility.as_deref(), |v| v.as_str().to_string()),
    }
}

fn constraints_to_sdk(c: &ps::JobConstraints) -> sdk::JobConstraints {
    sdk::JobConstraints {
        max_wall_clock_time: c.max_wall_clock_time.clone(),
        max_task_retry_count: c.max_task_retry_count,
    }
}

fn constraints_from_sdk(c: &sdk::JobConstraints) -> ps::JobConstraints {
    ps::JobConstraints {
        max_wall_clock_time: c.max_wall_clock_time.clone(),
        max_task_retry_count: c.max_task_retry_count,
    }
}

fn job_manager_to_sdk(t: &ps::JobManagerTask) -> sdk::JobManagerTask {
    sdk::JobManagerTask {
        id: t.id.clone(),
        display_name: t.display_name.clone(),
        command_line: t.command_line.clone(),
        environment_settings: synced_list(t.environment_settings.as_deref(), environment_to_sdk),
        resource_files: synced_list(t.resource_files.as_deref(), resource_file_to_sdk),
        kill_job_on_completion: t.kill_job_on_completion,
        run_exclusive: t.run_exclusive,
    }
}

fn job_manager_from_sdk(t: &sdk::JobManagerTask) -> ps::JobManagerTask {
    ps::JobManagerTask {
        id: t.id.clone(),
        display_name: t.display_name.clone(),
        command_line: t.command_line.clone(),
        environment_settings: synced_list(t.environment_settings.as_deref(), environment_from_sdk),
        resource_files: synced_list(t.resource_files.as_deref(), resource_file_from_sdk),
        kill_job_on_completion: t.kill_job_on_completion,
        run_exclusive: t.run_exclusive,
    }
}

fn job_preparation_to_sdk(t: &ps::JobPreparationTask) -> sdk::JobPreparationTask {
    sdk::JobPreparationTask {
        id: t.id.clone(),
        command_line: t.command_line.clone(),
        environment_settings: synced_list(t.environment_settings.as_deref(), environment_to_sdk),
        resource_files: synced_list(t.resource_files.as_deref(), resource_file_to_sdk),
        wait_for_success: t.wait_for_success,
        rerun_on_node_reboot_after_success: t.rerun_on_node_reboot_after_success,
    }
}

fn job_preparation_from_sdk(t: &sdk::JobPreparationTask) -> ps::JobPreparationTask {
    ps::JobPreparationTask {
        id: t.id.clone(),
        command_line: t.command_line.clone(),
        environment_settings: synced_list(t.environment_settings.as_deref(), environment_from_sdk),
        resource_files: synced_list(t.resource_files.as_deref(), resource_file_from_sdk),
        wait_for_success: t.wait_for_success,
        rerun_on_node_reboot_after_success: t.rerun_on_node_reboot_after_success,
    }
}

fn job_release_to_sdk(t: &ps::JobReleaseTask) -> sdk::JobReleaseTask {
    sdk::JobReleaseTask {
        id: t.id.clone(),
        command_line: t.command_line.clone(),
        environment_settings: synced_list(t.environment_settings.as_deref(), environment_to_sdk),
        resource_files: synced_list(t.resource_files.as_deref(), resource_file_to_sdk),
    }
}

fn job_release_from_sdk(t: &sdk::JobReleaseTask) -> ps::JobReleaseTask {
    ps::JobReleaseTask {
        id: t.id.clone(),
        command_line: t.command_line.clone(),
        environment_settings: synced_list(t.environment_settings.as_deref(), environment_from_sdk),
        resource_files: synced_list(t.resource_files.as_deref(), resource_file_from_sdk),
    }
}

fn start_task_to_sdk(t: &ps::StartTask) -> sdk::StartTask {
    sdk::StartTask {
        command_line: t.command_line.clone(),
        environment_settings: synced_list(t.environment_settings.as_deref(), environment_to_sdk),
        resource_files: synced_list(t.resource_files.as_deref(), resource_file_to_sdk),
        wait_for_success: t.wait_for_success,
        max_task_retry_count: t.max_task_retry_count,
    }
}

fn start_task_from_sdk(t: &sdk::StartTask) -> ps::StartTask {
    ps::StartTask {
        command_line: t.command_line.clone(),
        environment_settings: synced_list(t.environment_settings.as_deref(), environment_from_sdk),
        resource_files: synced_list(t.resource_files.as_deref(), resource_file_from_sdk),
        wait_for_success: t.wait_for_success,
        max_task_retry_count: t.max_task_retry_count,
    }
}

fn pool_to_sdk(p: &ps::PoolSpecification) -> Result<sdk::PoolSpecification> {
    Ok(sdk::PoolSpecification {
        display_name: p.display_name.clone(),
        vm_size: p.vm_size.clone(),
        target_dedicated_nodes: p.target_dedicated_nodes,
        certificate_references: try_synced_list(
            p.certificate_references.as_deref(),
            certificate_to_sdk,
        )?,
        metadata: synced_list(p.metadata.as_deref(), metadata_to_sdk),
        start_task: p.start_task.as_ref().map(start_task_to_sdk),
    })
}

fn pool_from_sdk(p: &sdk::PoolSpecification) -> ps::PoolSpecification {
    ps::PoolSpecification {
        display_name: p.display_name.clone(),
        vm_size: p.vm_size.clone(),
        target_dedicated_nodes: p.target_dedicated_nodes,
        certificate_references: synced_list(
            p.certificate_references.as_deref(),
            certificate_from_sdk,
        ),
        metadata: synced_list(p.metadata.as_deref(), metadata_from_sdk),
        start_task: p.start_task.as_ref().map(start_task_from_sdk),
    }
}

fn auto_pool_to_sdk(a: &ps::AutoPoolSpecification) -> Result<sdk::AutoPoolSpecification> {
    Ok(sdk::AutoPoolSpecification {
        auto_pool_id_prefix: a.auto_pool_id_prefix.clone(),
        pool_lifetime_option: PoolLifetimeOption::parse(&a.pool_lifetime_option)?,
        keep_alive: a.keep_alive,
        pool: a.pool.as_ref().map(pool_to_sdk).transpose()?,
    })
}

fn auto_pool_from_sdk(a: &sdk::AutoPoolSpecification) -> ps::AutoPoolSpecification {
    ps::AutoPoolSpecification {
        auto_pool_id_prefix: a.auto_pool_id_prefix.clone(),
        pool_lifetime_option: a.pool_lifetime_option.as_str().to_string(),
        keep_alive: a.keep_alive,
        pool: a.pool.as_ref().map(pool_from_sdk),
    }
}

fn pool_information_to_sdk(p: &ps::PoolInformation) -> Result<sdk::PoolInformation> {
    Ok(sdk::PoolInformation {
        pool_id: p.pool_id.clone(),
        auto_pool_specification: p
            .auto_pool_specification
            .as_ref()
            .map(auto_pool_to_sdk)
            .transpose()?,
    })
}

fn pool_information_from_sdk(p: &sdk::PoolInformation) -> ps::PoolInformation {
    ps::PoolInformation {
        pool_id: p.pool_id.clone(),
        auto_pool_specification: p.auto_pool_specification.as_ref().map(auto_pool_from_sdk),
    }
}

pub fn job_specification_to_sdk(spec: &ps::JobSpecification) -> Result<sdk::JobSpecification> {
    Ok(sdk::JobSpecification {
        display_name: spec.display_name.clone(),
        priority: spec.priority,
        constraints: spec.constraints.as_ref().map(constraints_to_sdk),
        job_manager_task: spec.job_manager_task.as_ref().map(job_manager_to_sdk),
        job_preparation_task: spec.job_preparation_task.as_ref().map(job_preparation_to_sdk),
        job_release_task: spec.job_release_task.as_ref().map(job_release_to_sdk),
        common_environment_settings: synced_list(
            spec.common_environment_settings.as_deref(),
            environment_to_sdk,
        ),
        pool_info: spec
            .pool_information
            .as_ref()
            .map(pool_information_to_sdk)
            .transpose()?,
        metadata: synced_list(spec.metadata.as_deref(), metadata_to_sdk),
    })
}

pub fn job_specification_from_sdk(spec: &sdk::JobSpecification) -> ps::JobSpecification {
    ps::JobSpecification {
        display_name: spec.display_name.clone(),
        priority: spec.priority,
        constraints: spec.constraints.as_ref().map(constraints_from_sdk),
        job_manager_task: spec.job_manager_task.as_ref().map(job_manager_from_sdk),
        job_preparation_task: spec
            .job_preparation_task
            .as_ref()
            .map(job_preparation_from_sdk),
        job_release_task: spec.job_release_task.as_ref().map(job_release_from_sdk),
        common_environment_settings: synced_list(
            spec.common_environment_settings.as_deref(),
            environment_from_sdk,
        ),
        pool_information: spec.pool_info.as_ref().map(pool_information_from_sdk),
        metadata: synced_list(spec.metadata.as_deref(), metadata_from_sdk),
    }
}

pub fn job_add_parameter(id: &str, spec: &ps::JobSpecification) -> Result<sdk::JobAddParameter> {
    Ok(sdk::JobAddParameter {
        id: id.to_string(),
        specification: job_specification_to_sdk(spec)?,
    })
}

pub fn cloud_job_from_sdk(job: &sdk::CloudJob) -> ps::CloudJob {
    ps::CloudJob {
        id: job.id.clone(),
        url: job.url.clone(),
        e_tag: job.e_tag.clone(),
        creation_time: job.creation_time.clone(),
        state: job.state.map(|s: JobState| s.as_str().to_string()),
        specification: job_specification_from_sdk(&job.specification),
    }
}
