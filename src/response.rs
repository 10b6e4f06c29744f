use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{AlksError, Result};

/// An AWS account (and role) the user may request credentials for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// The ALKS account key, e.g. `"1234 - foobar"`.
    pub account: String,
    /// The user's role in this account.
    pub role: String,
    /// Whether IAM-capable credentials can be issued here.
    pub iam_key_active: bool,
}

/// Temporary AWS STS credentials.
///
/// The `Debug` implementation redacts `secret_key` and `session_token`
/// to prevent accidental credential leakage in logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
    pub session_token: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"****")
            .field("session_token", &"****")
            .finish()
    }
}

/// Result of creating a custom IAM role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomRole {
    pub role_arn: String,
    /// ARNs of the deny policies attached to the role.
    pub deny_arns: Vec<String>,
    pub instance_profile_arn: String,
    pub added_role_to_instance_profile: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountsBody {
    account_list_role: IndexMap<String, Vec<AccountRole>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountRole {
    role: String,
    iam_key_active: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoleTypesBody {
    role_types: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateRoleBody {
    role_arn: String,
    deny_arns: String,
    instance_profile_arn: String,
    added_role_to_instance_profile: bool,
}

#[derive(Deserialize)]
struct AccountRolesBody {
    #[serde(rename = "jsonAWSRoleList")]
    json_aws_role_list: String,
}

#[derive(Deserialize)]
struct AccountRoleBody {
    #[serde(rename = "roleExists")]
    role_exists: bool,
    /// Only read when `roleExists` is true.
    #[serde(rename = "roleARN", default)]
    role_arn: Option<Value>,
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T> {
    serde_json::from_value(body).map_err(AlksError::from)
}

/// Decodes a string field that itself holds a JSON array of strings.
fn decode_embedded_list(field: &str, text: &str) -> Result<Vec<String>> {
    serde_json::from_str(text)
        .map_err(|e| AlksError::Decode(format!("{field} is not a JSON string array: {e}")))
}

pub(crate) fn project_accounts(body: Value) -> Result<Vec<Account>> {
    let body: AccountsBody = decode(body)?;
    body.account_list_role
        .into_iter()
        .map(|(key, roles)| {
            let first = roles.into_iter().next().ok_or_else(|| {
                AlksError::Decode(format!("account '{key}' has no role entries"))
            })?;
            Ok(Account {
                account: key,
                role: first.role,
                iam_key_active: first.iam_key_active,
            })
        })
        .collect()
}

pub(crate) fn project_credentials(body: Value) -> Result<Credentials> {
    decode(body)
}

pub(crate) fn project_role_types(body: Value) -> Result<Vec<String>> {
    let body: RoleTypesBody = decode(body)?;
    decode_embedded_list("roleTypes", &body.role_types)
}

pub(crate) fn project_custom_role(body: Value) -> Result<CustomRole> {
    let body: CreateRoleBody = decode(body)?;
    Ok(CustomRole {
        role_arn: body.role_arn,
        deny_arns: body.deny_arns.split(',').map(str::to_string).collect(),
        instance_profile_arn: body.instance_profile_arn,
        added_role_to_instance_profile: body.added_role_to_instance_profile,
    })
}

pub(crate) fn project_account_roles(body: Value) -> Result<Vec<String>> {
    let body: AccountRolesBody = decode(body)?;
    let arns = decode_embedded_list("jsonAWSRoleList", &body.json_aws_role_list)?;
    Ok(arns
        .iter()
        .map(|arn| arn.rsplit('/').next().unwrap_or(arn.as_str()).to_string())
        .collect())
}

/// Projects a `getAccountRole` body; `config` is the merged request config,
/// whose `role_name` names the role in the not-found message.
pub(crate) fn project_account_role(body: Value, config: &ClientConfig) -> Result<String> {
    let body: AccountRoleBody = decode(body)?;
    if !body.role_exists {
        return Err(AlksError::NotFound(format!(
            "Role {} does not exist in this account",
            config.role_name.as_deref().unwrap_or_default()
        )));
    }
    match body.role_arn {
        Some(Value::String(arn)) => Ok(arn),
        Some(Value::Null) | None => Err(AlksError::Decode(
            "roleExists is true but roleARN is missing".into(),
        )),
        Some(other) => Err(AlksError::Decode(format!(
            "roleARN is not a string: {other}"
        ))),
    }
}
