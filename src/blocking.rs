//! Synchronous (blocking) client for the ALKS API.
//!
//! This module is only available when the `blocking` feature is enabled.
//! It mirrors the async [`crate::client::Client`] API using `reqwest::blocking`.
//!
//! # Example
//!
//! ```no_run
//! use rs_alks::ClientConfig;
//! use rs_alks::blocking::Client;
//!
//! fn main() -> rs_alks::Result<()> {
//!     let client = Client::with_config(
//!         ClientConfig::new()
//!             .with_base_url("https://your.alks-host.com")
//!             .with_userid("johndoe")
//!             .with_password("pass123"),
//!     )?;
//!
//!     for account in client.get_accounts(ClientConfig::default())? {
//!         println!("{} ({})", account.account, account.role);
//!     }
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::exec::handle_response;
use crate::request::{Operation, build_request};
use crate::response::{
    Account, Credentials, CustomRole, project_account_role, project_account_roles,
    project_accounts, project_credentials, project_custom_role, project_role_types,
};
use crate::transport::{BlockingReqwestTransport, BlockingTransport};

/// Synchronous client for the ALKS API.
#[derive(Clone)]
pub struct Client {
    defaults: ClientConfig,
    transport: Arc<dyn BlockingTransport>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

impl Client {
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(defaults: ClientConfig) -> Result<Self> {
        Ok(Self::with_transport(
            defaults,
            Arc::new(BlockingReqwestTransport::new()?),
        ))
    }

    pub fn with_transport(defaults: ClientConfig, transport: Arc<dyn BlockingTransport>) -> Self {
        Self {
            defaults,
            transport,
        }
    }

    /// Creates a client whose defaults come from `ALKS_BASE_URL`,
    /// `ALKS_USERID` and `ALKS_PASSWORD`.
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env())
    }

    /// Returns a new client carrying `defaults` and sharing this client's transport.
    pub fn create(&self, defaults: ClientConfig) -> Client {
        Self::with_transport(defaults, Arc::clone(&self.transport))
    }

    pub fn defaults(&self) -> &ClientConfig {
        &self.defaults
    }

    pub fn get_accounts(&self, overrides: ClientConfig) -> Result<Vec<Account>> {
        project_accounts(self.dispatch(Operation::GetAccounts, &overrides)?)
    }

    pub fn get_keys(&self, overrides: ClientConfig) -> Result<Credentials> {
        project_credentials(self.dispatch(Operation::GetKeys, &overrides)?)
    }

    pub fn get_iam_keys(&self, overrides: ClientConfig) -> Result<Credentials> {
        project_credentials(self.dispatch(Operation::GetIamKeys, &overrides)?)
    }

    pub fn get_aws_role_types(&self, overrides: ClientConfig) -> Result<Vec<String>> {
        project_role_types(self.dispatch(Operation::GetAwsRoleTypes, &overrides)?)
    }

    pub fn create_role(&self, overrides: ClientConfig) -> Result<CustomRole> {
        project_custom_role(self.dispatch(Operation::CreateRole, &overrides)?)
    }

    pub fn list_aws_account_roles(&self, overrides: ClientConfig) -> Result<Vec<String>> {
        project_account_roles(self.dispatch(Operation::ListAwsAccountRoles, &overrides)?)
    }

    pub fn get_account_role(&self, overrides: ClientConfig) -> Result<String> {
        let config = self.defaults.merge(&overrides);
        project_account_role(self.send(Operation::GetAccountRole, &config)?, &config)
    }

    pub fn delete_role(&self, overrides: ClientConfig) -> Result<bool> {
        self.dispatch(Operation::DeleteRole, &overrides)?;
        Ok(true)
    }

    /// Sends one request and returns the raw body of a successful response.
    pub fn dispatch(&self, operation: Operation, overrides: &ClientConfig) -> Result<Value> {
        self.send(operation, &self.defaults.merge(overrides))
    }

    fn send(&self, operation: Operation, config: &ClientConfig) -> Result<Value> {
        let request = build_request(operation, config)?;
        debug!(%operation, url = %request.url, "sending ALKS request");

        let raw = self.transport.post_json(&request.url, &request.body)?;
        handle_response(raw)
    }
}
