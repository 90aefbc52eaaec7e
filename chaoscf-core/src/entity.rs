//! Typed entities of the resources this extension works with.
//!
//! Every entity keeps the fields the actions rely on, and carries the rest of the
//! payload in `other` so that a resource survives a round trip unmodified.
//! Typed fields the API sends as `null` are kept in `other` too.
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{fields::raw_object, object::Resource};

/// A resource type served under a collection path of the v2 API
pub trait Entity: DeserializeOwned + Clone {
    /// Singular name, used when reporting lookups
    const KIND: &'static str;

    /// Collection path, e.g. `/v2/apps`
    const URL_PATH: &'static str;
}

/// An organization
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Organization {
    /// Organization name
    pub name: String,
    /// `active` or `suspended`
    pub status: Option<String>,
    /// Remaining fields of the entity
    pub other: Map<String, Value>,
}

raw_object!(Organization { name ; status });

impl Entity for Organization {
    const KIND: &'static str = "org";
    const URL_PATH: &'static str = "/v2/organizations";
}

/// A space within an organization
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Space {
    /// Space name
    pub name: String,
    /// Owning organization
    pub organization_guid: Option<String>,
    /// Remaining fields of the entity
    pub other: Map<String, Value>,
}

raw_object!(Space { name ; organization_guid });

impl Entity for Space {
    const KIND: &'static str = "space";
    const URL_PATH: &'static str = "/v2/spaces";
}

/// Desired state of an application
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppState {
    /// The application should be running
    Started,
    /// The application should not be running
    Stopped,
}

/// An application
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct App {
    /// Application name
    pub name: String,
    /// Owning space
    pub space_guid: Option<String>,
    /// Desired state
    pub state: Option<AppState>,
    /// Desired number of instances
    pub instances: Option<u32>,
    /// Path listing the routes mapped to the app
    pub routes_url: Option<String>,
    /// Path listing the service bindings of the app
    pub service_bindings_url: Option<String>,
    /// Remaining fields of the entity
    pub other: Map<String, Value>,
}

raw_object!(App { name ; space_guid, state, instances, routes_url, service_bindings_url });

impl Entity for App {
    const KIND: &'static str = "app";
    const URL_PATH: &'static str = "/v2/apps";
}

impl Resource<App> {
    /// Path of the routes mapped to this app
    ///
    /// Older payloads omit `routes_url`, the canonical path is used then.
    pub fn routes_url(&self) -> String {
        self.entity
            .routes_url
            .clone()
            .unwrap_or_else(|| format!("{}/{}/routes", App::URL_PATH, self.guid()))
    }

    /// Path of the instances of this app
    pub fn instances_url(&self) -> String {
        format!("{}/{}/instances", App::URL_PATH, self.guid())
    }
}

/// A route, addressed by host (domains are deprecated in v2)
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Route {
    /// Host part of the route
    pub host: String,
    /// Path part of the route
    pub path: Option<String>,
    /// Domain of the route
    pub domain_guid: Option<String>,
    /// Owning space
    pub space_guid: Option<String>,
    /// Path listing the apps bound to the route
    pub apps_url: Option<String>,
    /// Remaining fields of the entity
    pub other: Map<String, Value>,
}

raw_object!(Route { host ; path, domain_guid, space_guid, apps_url });

impl Entity for Route {
    const KIND: &'static str = "route";
    const URL_PATH: &'static str = "/v2/routes";
}

impl Resource<Route> {
    /// Path of the apps bound to this route
    pub fn apps_url(&self) -> String {
        self.entity
            .apps_url
            .clone()
            .unwrap_or_else(|| format!("{}/{}/apps", Route::URL_PATH, self.guid()))
    }
}

/// A binding between an app and a service instance
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct ServiceBinding {
    /// Binding name, when one was given
    pub name: Option<String>,
    /// Bound application
    pub app_guid: Option<String>,
    /// Bound service instance
    pub service_instance_guid: Option<String>,
    /// Remaining fields of the entity
    pub other: Map<String, Value>,
}

raw_object!(ServiceBinding { ; name, app_guid, service_instance_guid });

impl Entity for ServiceBinding {
    const KIND: &'static str = "bind";
    const URL_PATH: &'static str = "/v2/service_bindings";
}
