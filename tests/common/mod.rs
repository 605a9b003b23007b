//! Shared fixtures for the wiremock-backed integration tests

#![allow(dead_code)]

use azrm::arm::auth::StaticTokenProvider;
use azrm::arm::{ArmClient, ClientOptions};
use serde_json::Value;
use std::sync::Arc;
use wiremock::MockServer;

pub const SUBSCRIPTION: &str = "00000000-0000-0000-0000-000000000000";
pub const TOKEN: &str = "test-token";

/// A mock server with ARM and Graph both pointed at it
pub struct TestContext {
    pub server: MockServer,
    pub client: ArmClient,
}

impl TestContext {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let client = ArmClient::new(
            SUBSCRIPTION,
            Arc::new(StaticTokenProvider::new(TOKEN)),
            ClientOptions::for_endpoint(&server.uri()),
        )
        .expect("client should build");
        Self { server, client }
    }

    /// `/subscriptions/{sub}/resourceGroups/{rg}/providers/{provider_type}`
    pub fn rg_path(&self, resource_group: &str, provider_type: &str) -> String {
        format!(
            "/subscriptions/{}/resourceGroups/{}/providers/{}",
            SUBSCRIPTION, resource_group, provider_type
        )
    }

    /// JSON bodies of every request the server saw, in order
    pub async fn request_bodies(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| serde_json::from_slice(&r.body).unwrap_or(Value::Null))
            .collect()
    }
}
