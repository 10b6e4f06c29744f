//! Endpoint naming and request body construction.

use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{AlksError, Result};

/// ALKS endpoints wrapped by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GetAccounts,
    GetKeys,
    GetIamKeys,
    GetAwsRoleTypes,
    CreateRole,
    ListAwsAccountRoles,
    GetAccountRole,
    DeleteRole,
}

impl Operation {
    /// Path segment of the endpoint.
    pub fn path(self) -> &'static str {
        match self {
            Operation::GetAccounts => "getAccounts",
            Operation::GetKeys => "getKeys",
            Operation::GetIamKeys => "getIAMKeys",
            Operation::GetAwsRoleTypes => "getAWSRoleTypes",
            Operation::CreateRole => "createRole",
            Operation::ListAwsAccountRoles => "listAWSAccountRoles",
            Operation::GetAccountRole => "getAccountRole",
            Operation::DeleteRole => "deleteRole",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// A request ready to hand to a transport.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PreparedRequest {
    pub url: String,
    pub body: Value,
}

/// Builds `<baseUrl>/<operation>/` and the JSON body from a merged config.
pub(crate) fn build_request(operation: Operation, config: &ClientConfig) -> Result<PreparedRequest> {
    let base_url = config
        .base_url
        .as_deref()
        .filter(|url| !url.is_empty())
        .ok_or_else(|| AlksError::Config("baseUrl is required".into()))?;

    let url = format!(
        "{}/{}/",
        base_url.strip_suffix('/').unwrap_or(base_url),
        operation.path()
    );
    let body = serde_json::to_value(config)
        .map_err(|e| AlksError::Config(format!("cannot serialize request body: {e}")))?;

    Ok(PreparedRequest { url, body })
}
