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
use crate::transport::{ReqwestTransport, Transport};

/// Async client for the ALKS API.
///
/// Holds a set of default parameters. Each operation merges the defaults with
/// the `overrides` it is given (overrides win) and sends the result as the
/// request body. Cloning is cheap and shares the transport.
#[derive(Clone)]
pub struct Client {
    defaults: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a client with no defaults; every call must supply its own
    /// parameters, including `base_url`.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a client with the given defaults and the reqwest transport.
    pub fn with_config(defaults: ClientConfig) -> Result<Self> {
        Ok(Self::with_transport(defaults, Arc::new(ReqwestTransport::new()?)))
    }

    /// Creates a client with the given defaults and transport.
    pub fn with_transport(defaults: ClientConfig, transport: Arc<dyn Transport>) -> Self {
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

    /// Returns a new client carrying `defaults` and sharing this client's
    /// transport. The new defaults replace the current ones.
    ///
    /// ```no_run
    /// use rs_alks::{Client, ClientConfig};
    ///
    /// # async fn example() -> rs_alks::Result<()> {
    /// let my_alks = Client::new()?.create(
    ///     ClientConfig::new()
    ///         .with_base_url("https://your.alks-host.com")
    ///         .with_userid("johndoe")
    ///         .with_password("pass123"),
    /// );
    ///
    /// let creds = my_alks
    ///     .get_keys(
    ///         ClientConfig::new()
    ///             .with_account("anAccount")
    ///             .with_role("PowerUser")
    ///             .with_session_time(2),
    ///     )
    ///     .await?;
    /// println!("{}", creds.access_key);
    /// # Ok(())
    /// # }
    /// ```
    pub fn create(&self, defaults: ClientConfig) -> Client {
        Self::with_transport(defaults, Arc::clone(&self.transport))
    }

    /// The defaults merged into every call.
    pub fn defaults(&self) -> &ClientConfig {
        &self.defaults
    }

    /// Lists the accounts (and roles) available to the user.
    pub async fn get_accounts(&self, overrides: ClientConfig) -> Result<Vec<Account>> {
        let body = self.dispatch(Operation::GetAccounts, &overrides).await?;
        project_accounts(body)
    }

    /// Issues short-term STS credentials for `account` / `role`.
    pub async fn get_keys(&self, overrides: ClientConfig) -> Result<Credentials> {
        let body = self.dispatch(Operation::GetKeys, &overrides).await?;
        project_credentials(body)
    }

    /// Issues STS credentials with IAM permissions.
    pub async fn get_iam_keys(&self, overrides: ClientConfig) -> Result<Credentials> {
        let body = self.dispatch(Operation::GetIamKeys, &overrides).await?;
        project_credentials(body)
    }

    /// Lists the AWS role types a custom role can be created with.
    pub async fn get_aws_role_types(&self, overrides: ClientConfig) -> Result<Vec<String>> {
        let body = self.dispatch(Operation::GetAwsRoleTypes, &overrides).await?;
        project_role_types(body)
    }

    /// Creates a custom IAM role named `role_name` of type `role_type`.
    pub async fn create_role(&self, overrides: ClientConfig) -> Result<CustomRole> {
        let body = self.dispatch(Operation::CreateRole, &overrides).await?;
        project_custom_role(body)
    }

    /// Lists the names of the custom roles in the account.
    pub async fn list_aws_account_roles(&self, overrides: ClientConfig) -> Result<Vec<String>> {
        let body = self
            .dispatch(Operation::ListAwsAccountRoles, &overrides)
            .await?;
        project_account_roles(body)
    }

    /// Returns the ARN of the custom role `role_name`.
    ///
    /// Fails with [`AlksError::NotFound`](crate::AlksError::NotFound) when
    /// the service reports that the role does not exist.
    pub async fn get_account_role(&self, overrides: ClientConfig) -> Result<String> {
        let config = self.defaults.merge(&overrides);
        let body = self.send(Operation::GetAccountRole, &config).await?;
        project_account_role(body, &config)
    }

    /// Deletes the custom role `role_name`. Returns `true` on success.
    pub async fn delete_role(&self, overrides: ClientConfig) -> Result<bool> {
        self.dispatch(Operation::DeleteRole, &overrides).await?;
        Ok(true)
    }

    /// Sends one request and returns the raw body of a successful response.
    pub async fn dispatch(&self, operation: Operation, overrides: &ClientConfig) -> Result<Value> {
        self.send(operation, &self.defaults.merge(overrides)).await
    }

    async fn send(&self, operation: Operation, config: &ClientConfig) -> Result<Value> {
        let request = build_request(operation, config)?;
        debug!(%operation, url = %request.url, "sending ALKS request");

        let raw = self.transport.post_json(&request.url, &request.body).await?;
        handle_response(raw)
    }
}
