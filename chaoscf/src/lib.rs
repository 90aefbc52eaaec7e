//! Chaos engineering activities against [Cloud Foundry](https://www.cloudfoundry.org).
//!
//! # Overview
//!
//! This crate exports the actions and probes of the `chaostoolkit-cloud-foundry` extension,
//! together with the Cloud Foundry client they run on.
//!
//! The main modules are:
//!
//! - [`actions`] to stop, start, delete apps, terminate instances, (un)map routes and unbind services
//! - [`probes`] to read apps, their stats, summaries and instances
//! - [`discovery`] with the document describing every exported activity
//! - [`activity`] to run an activity from its name and JSON arguments
//! - [`client`](crate::client) with the [`Client`](crate::Client) and its layers
//! - [`config`](crate::config) for the connection [`Config`](crate::Config)
//! - [`core`](crate::core) with the v2 resource types
//!
//! # Running an action
//! ```no_run
//! use chaoscf::{actions, api::Scope, Client, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reuse the session of `cf login`
//!     let client = Client::connect(Config::from_cf_home()?).await?;
//!     let scope = Scope::new().org("my-org").space("my-space");
//!     let index = actions::terminate_some_random_instance(&client, "my-app", &scope).await?;
//!     println!("terminated instance {index}");
//!     Ok(())
//! }
//! ```
//!
//! # Running an activity from a host
//! ```no_run
//! use serde_json::json;
//!
//! # async fn wrapper() -> Result<(), chaoscf::Error> {
//! let configuration = json!({"cf_api_url": "https://api.sys.example.com"});
//! let secrets = json!({"cf_username": "someone", "cf_password": "secret"});
//! let stats = chaoscf::run_activity(
//!     "get_app_stats",
//!     json!({"app_name": "my-app", "org_name": "my-org"}),
//!     configuration.as_object().unwrap(),
//!     secrets.as_object().unwrap(),
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub mod actions;
pub mod activity;
pub mod discovery;
pub mod probes;

#[doc(inline)] pub use activity::{run_activity, Activity};
#[doc(inline)] pub use discovery::discover;

pub use chaoscf_client::{api, auth, client, config, error};
#[doc(inline)] pub use chaoscf_client::{Client, Config, Credentials, Error, Result};

/// Re-exports from chaoscf_core
#[doc(inline)]
pub use chaoscf_core as core;
