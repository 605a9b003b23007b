//! Batch account data plane calls

use super::mapping::{cloud_job_from_sdk, job_add_parameter};
use super::models::{CloudJob, JobSpecification};
use super::sdk;
use crate::arm::client::BATCH_AUDIENCE;
use crate::arm::ArmClient;
use crate::error::{Error, Result};
use reqwest::Method;
use url::Url;

const API_VERSION: &str = "2023-05-01.17.0";

pub struct BatchClient<'a> {
    client: &'a ArmClient,
    account_endpoint: Url,
}

impl<'a> BatchClient<'a> {
    /// `account_endpoint` is the account URL, e.g. `https://myaccount.westus.batch.azure.com`
    pub fn new(client: &'a ArmClient, account_endpoint: &str) -> Result<Self> {
        let account_endpoint = Url::parse(account_endpoint).map_err(|e| {
            Error::InvalidInput(format!("invalid Batch account endpoint '{account_endpoint}': {e}"))
        })?;
        if !matches!(account_endpoint.scheme(), "https" | "http") {
            return Err(Error::InvalidInput(format!(
                "Batch account endpoint must be an http(s) URL, got '{account_endpoint}'"
            )));
        }
        Ok(Self {
            client,
            account_endpoint,
        })
    }

    fn jobs_url(&self, job_id: Option<&str>) -> String {
        let base = self.account_endpoint.as_str().trim_end_matches('/');
        match job_id {
            Some(id) => format!(
                "{}/jobs/{}?api-version={}",
                base,
                urlencoding::encode(id),
                API_VERSION
            ),
            None => format!("{}/jobs?api-version={}", base, API_VERSION),
        }
    }

    /// Add a job; the service answers 201 Created on success
    pub async fn add_job(&self, id: &str, spec: &JobSpecification) -> Result<bool> {
        let body = serde_json::to_value(job_add_parameter(id, spec)?)?;
        let response = self
            .client
            .send_with_audience(BATCH_AUDIENCE, Method::POST, &self.jobs_url(None), Some(&body))
            .await?;
        Ok(response.status == 201)
    }

    pub async fn get_job(&self, id: &str) -> Result<CloudJob> {
        let response = self
            .client
            .send_with_audience(BATCH_AUDIENCE, Method::GET, &self.jobs_url(Some(id)), None)
            .await?;
        let job: sdk::CloudJob = serde_json::from_value(response.body)?;
        Ok(cloud_job_from_sdk(&job))
    }
}
