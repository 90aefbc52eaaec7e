//! A Cloud Foundry v2 API client for chaos experiments
//!
//! This crate talks to the Cloud Controller of a Cloud Foundry deployment:
//! - [`Config`](crate::config) to build a connection from a chaos host's configuration or a `cf login` session
//! - [`auth`] to exchange a user for a token against UAA
//! - [`Client`](crate::Client) for raw calls through a `tower` service stack
//! - [`api`] for resolving organizations, spaces, apps, routes and bindings by name
//!
//! # Example
//!
//! ```rust,no_run
//! use chaoscf_client::{api::Scope, Client, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), chaoscf_client::Error> {
//!     let client = Client::connect(Config::from_cf_home()?).await?;
//!     let app = client.get_app_by_name("my-app", &Scope::new().org("my-org")).await?;
//!     println!("{} is {:?}", app.entity.name, app.entity.state);
//!     Ok(())
//! }
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;

#[doc(inline)] pub use client::Client;
#[doc(inline)] pub use config::{Config, Credentials};
#[doc(inline)] pub use error::Error;

/// Convient alias for `Result<T, Error>`
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Re-exports from chaoscf_core
pub use chaoscf_core as core;
