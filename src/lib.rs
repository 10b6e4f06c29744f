//! Rust client for ALKS, a service that issues temporary AWS STS credentials
//! and manages custom IAM roles.
//!
//! Every operation is one JSON `POST` to `{baseUrl}/{operation}/`:
//!
//! - [`Client::get_accounts`] — accounts and roles available to the user
//! - [`Client::get_keys`] / [`Client::get_iam_keys`] — STS credentials
//! - [`Client::get_aws_role_types`] — role types for custom roles
//! - [`Client::create_role`] / [`Client::delete_role`] — manage a custom role
//! - [`Client::list_aws_account_roles`] / [`Client::get_account_role`] — look up custom roles
//!
//! Parameters are carried by [`ClientConfig`]. A client stores one as its
//! defaults, and each call passes another whose set fields take precedence.
//!
//! # Quick Start (async)
//!
//! ```no_run
//! use rs_alks::{Client, ClientConfig};
//!
//! # async fn example() -> rs_alks::Result<()> {
//! let client = Client::with_config(
//!     ClientConfig::new()
//!         .with_base_url("https://your.alks-host.com")
//!         .with_userid("johndoe")
//!         .with_password("pass123"),
//! )?;
//!
//! let creds = client
//!     .get_iam_keys(
//!         ClientConfig::new()
//!             .with_account("anAccount")
//!             .with_role("IAMAdmin")
//!             .with_session_time(1),
//!     )
//!     .await?;
//!
//! println!("Temporary AK: {}", creds.access_key);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod request;
pub mod response;
pub mod transport;

#[cfg(feature = "blocking")]
pub mod blocking;

mod exec;

pub use client::Client;
pub use config::ClientConfig;
pub use error::{AlksError, ErrorKind, Result};
pub use exec::RawResponse;
pub use request::Operation;
pub use response::{Account, Credentials, CustomRole};
pub use transport::{ReqwestTransport, Transport};

#[cfg(feature = "blocking")]
pub use transport::{BlockingReqwestTransport, BlockingTransport};

// Compile-time assertions: key types must be Send + Sync for use across threads.
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    let _ = assert_send_sync::<Client>;
    let _ = assert_send_sync::<AlksError>;
    let _ = assert_send_sync::<ClientConfig>;
};
