//! Crate with types necessary for interacting with the Cloud Foundry v2 API
//!
//! This crate is available as a minimal alternative to `chaoscf` where a client is not available.
//! The same information here is always re-exported from `chaoscf` under `chaoscf::core`.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub mod entity;
pub use entity::{App, AppState, Entity, Organization, Route, ServiceBinding, Space};

pub mod extension;
pub use extension::{ActivitySpec, ActivityType, Configuration, Discovery, Secrets};

pub mod filter;
pub use filter::Filter;

pub mod instance;
pub use instance::{InstanceInfo, Instances};

pub mod object;
pub use object::{Metadata, Resource, ResourceList};

pub mod params;
pub use params::ListParams;

pub mod request;
pub use request::Request;

mod error;
mod fields;
pub use error::Error;

/// Convient alias for `Result<T, Error>`
pub type Result<T, E = Error> = std::result::Result<T, E>;
