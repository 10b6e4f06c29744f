use std::env;

use serde::Serialize;

/// Environment variable holding the ALKS base URL.
pub const BASE_URL_ENV: &str = "ALKS_BASE_URL";
/// Environment variable holding the ALKS user ID.
pub const USERID_ENV: &str = "ALKS_USERID";
/// Environment variable holding the ALKS password.
pub const PASSWORD_ENV: &str = "ALKS_PASSWORD";

/// Parameters sent to ALKS.
///
/// Every field is optional. A client stores one of these as its defaults and
/// each call supplies another as overrides; see [`ClientConfig::merge`]. The
/// service decides which fields an operation requires.
///
/// The `Debug` implementation redacts `password`.
#[derive(Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// AWS account the operation targets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    /// The user's ALKS role in `account`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Session length for issued credentials, in hours.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_time: Option<u32>,
    /// Name of the custom IAM role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
    /// AWS role type used when creating a custom role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_type: Option<String>,
    /// 1 to attach the default policy to a new role, 0 otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_default_policy: Option<u8>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("userid", &self.userid)
            .field("password", &self.password.as_ref().map(|_| "****"))
            .field("account", &self.account)
            .field("role", &self.role)
            .field("session_time", &self.session_time)
            .field("role_name", &self.role_name)
            .field("role_type", &self.role_type)
            .field("include_default_policy", &self.include_default_policy)
            .finish()
    }
}

impl ClientConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `ALKS_BASE_URL`, `ALKS_USERID` and `ALKS_PASSWORD`. Unset or
    /// empty variables leave the field unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| lookup(name).filter(|v| !v.is_empty());
        Self {
            base_url: read(BASE_URL_ENV),
            userid: read(USERID_ENV),
            password: read(PASSWORD_ENV),
            ..Self::default()
        }
    }

    /// Combines `self` (the defaults) with `overrides`; a field set in
    /// `overrides` wins.
    pub fn merge(&self, overrides: &ClientConfig) -> ClientConfig {
        fn pick<T: Clone>(over: &Option<T>, base: &Option<T>) -> Option<T> {
            over.as_ref().or(base.as_ref()).cloned()
        }

        ClientConfig {
            base_url: pick(&overrides.base_url, &self.base_url),
            userid: pick(&overrides.userid, &self.userid),
            password: pick(&overrides.password, &self.password),
            account: pick(&overrides.account, &self.account),
            role: pick(&overrides.role, &self.role),
            session_time: pick(&overrides.session_time, &self.session_time),
            role_name: pick(&overrides.role_name, &self.role_name),
            role_type: pick(&overrides.role_type, &self.role_type),
            include_default_policy: pick(
                &overrides.include_default_policy,
                &self.include_default_policy,
            ),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_userid(mut self, userid: impl Into<String>) -> Self {
        self.userid = Some(userid.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_session_time(mut self, hours: u32) -> Self {
        self.session_time = Some(hours);
        self
    }

    pub fn with_role_name(mut self, role_name: impl Into<String>) -> Self {
        self.role_name = Some(role_name.into());
        self
    }

    pub fn with_role_type(mut self, role_type: impl Into<String>) -> Self {
        self.role_type = Some(role_type.into());
        self
    }

    /// Sets `includeDefaultPolicy` to 1 or 0.
    pub fn with_include_default_policy(mut self, include: bool) -> Self {
        self.include_default_policy = Some(u8::from(include));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_empty() {
        let config = ClientConfig::default();
        assert!(config.base_url.is_none());
        assert_eq!(serde_json::to_string(&config).unwrap(), "{}");
    }

    #[test]
    fn override_wins_on_collision() {
        let defaults = ClientConfig::new()
            .with_base_url("https://your.alks-host.com")
            .with_userid("testuser")
            .with_role("PowerUser");
        let overrides = ClientConfig::new().with_role("IAMAdmin").with_session_time(2);

        let merged = defaults.merge(&overrides);
        assert_eq!(merged.base_url.as_deref(), Some("https://your.alks-host.com"));
        assert_eq!(merged.userid.as_deref(), Some("testuser"));
        assert_eq!(merged.role.as_deref(), Some("IAMAdmin"));
        assert_eq!(merged.session_time, Some(2));
        assert!(merged.account.is_none());
    }

    #[test]
    fn merge_with_empty_overrides_keeps_defaults() {
        let defaults = ClientConfig::new()
            .with_base_url("https://host")
            .with_password("pass");
        assert_eq!(defaults.merge(&ClientConfig::default()), defaults);
    }

    #[test]
    fn serializes_camel_case_and_skips_unset() {
        let config = ClientConfig::new()
            .with_base_url("https://host")
            .with_session_time(1)
            .with_role_name("awsRoleName")
            .with_include_default_policy(true);
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "baseUrl": "https://host",
                "sessionTime": 1,
                "roleName": "awsRoleName",
                "includeDefaultPolicy": 1
            })
        );
    }

    #[test]
    fn debug_redacts_password() {
        let config = ClientConfig::new().with_userid("johndoe").with_password("pass123");
        let debug = format!("{config:?}");
        assert!(debug.contains("johndoe"));
        assert!(debug.contains("****"));
        assert!(!debug.contains("pass123"));
    }

    #[test]
    fn lookup_fills_login_fields() {
        let config = ClientConfig::from_lookup(|name| match name {
            BASE_URL_ENV => Some("https://your.alks-host.com".to_string()),
            USERID_ENV => Some("johndoe".to_string()),
            PASSWORD_ENV => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.base_url.as_deref(), Some("https://your.alks-host.com"));
        assert_eq!(config.userid.as_deref(), Some("johndoe"));
        assert!(config.password.is_none());
        assert!(config.account.is_none());
    }

    #[test]
    fn env_fields_yield_to_call_overrides() {
        let from_env = ClientConfig::from_lookup(|name| (name == USERID_ENV).then(|| "env-user".to_string()));
        let merged = from_env.merge(&ClientConfig::new().with_userid("explicit"));
        assert_eq!(merged.userid.as_deref(), Some("explicit"));
    }
}
