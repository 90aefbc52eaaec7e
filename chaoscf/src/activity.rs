//! Dispatch of activity calls made by a chaos host.
//!
//! A host names an exported activity and hands over its arguments as JSON,
//! along with the configuration and secrets of the experiment.
use chaoscf_client::{api::Scope, Client, Config, Error, Result};
use chaoscf_core::{Configuration, Secrets};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{actions, probes};

/// A call to one of the exported activities, with its arguments
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "name", content = "arguments", rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum Activity {
    DeleteApp {
        app_name: String,
        org_name: Option<String>,
        space_name: Option<String>,
    },
    StopApp {
        app_name: String,
        org_name: Option<String>,
        space_name: Option<String>,
    },
    StartApp {
        app_name: String,
        org_name: Option<String>,
        space_name: Option<String>,
    },
    StopAllApps {
        org_name: String,
    },
    StartAllApps {
        org_name: String,
    },
    MapRouteToApp {
        app_name: String,
        host_name: String,
        org_name: Option<String>,
        space_name: Option<String>,
    },
    UnmapRouteFromApp {
        app_name: String,
        host_name: String,
        org_name: Option<String>,
        space_name: Option<String>,
    },
    RemoveRoutesFromApp {
        app_name: String,
        route_host: String,
        org_name: Option<String>,
        space_name: Option<String>,
    },
    TerminateAppInstance {
        app_name: String,
        instance_index: u32,
        org_name: Option<String>,
        space_name: Option<String>,
    },
    TerminateSomeRandomInstance {
        app_name: String,
        org_name: Option<String>,
        space_name: Option<String>,
    },
    UnbindServiceFromApp {
        app_name: String,
        bind_name: String,
        org_name: Option<String>,
        space_name: Option<String>,
    },
    ListApps {},
    GetAppStats {
        app_name: String,
        org_name: Option<String>,
        space_name: Option<String>,
    },
    GetAppSummary {
        app_name: String,
        org_name: Option<String>,
        space_name: Option<String>,
    },
    GetAppInstances {
        app_name: String,
        org_name: Option<String>,
        space_name: Option<String>,
    },
}

fn scope(org_name: &Option<String>, space_name: &Option<String>) -> Scope {
    Scope::from_names(org_name.as_deref(), space_name.as_deref())
}

fn to_json<T: Serialize>(value: T) -> Result<Value> {
    serde_json::to_value(value).map_err(Error::SerdeError)
}

impl Activity {
    /// Build the call from an activity name and its arguments
    ///
    /// Arguments are a JSON object, `null` stands for no arguments.
    pub fn from_call(name: &str, arguments: Value) -> Result<Self> {
        let arguments = match arguments {
            Value::Null => json!({}),
            other => other,
        };
        serde_json::from_value(json!({ "name": name, "arguments": arguments }))
            .map_err(|e| Error::InvalidActivity(format!("{name}: {e}")))
    }

    /// Run the activity, returning its result as JSON
    ///
    /// Activities that produce nothing return `null`.
    pub async fn run(&self, client: &Client) -> Result<Value> {
        tracing::debug!(activity = ?self, "running activity");
        match self {
            Activity::DeleteApp {
                app_name,
                org_name,
                space_name,
            } => to_json(actions::delete_app(client, app_name, &scope(org_name, space_name)).await?),
            Activity::StopApp {
                app_name,
                org_name,
                space_name,
            } => to_json(actions::stop_app(client, app_name, &scope(org_name, space_name)).await?),
            Activity::StartApp {
                app_name,
                org_name,
                space_name,
            } => to_json(actions::start_app(client, app_name, &scope(org_name, space_name)).await?),
            Activity::StopAllApps { org_name } => to_json(actions::stop_all_apps(client, org_name).await?),
            Activity::StartAllApps { org_name } => to_json(actions::start_all_apps(client, org_name).await?),
            Activity::MapRouteToApp {
                app_name,
                host_name,
                org_name,
                space_name,
            } => to_json(
                actions::map_route_to_app(client, app_name, host_name, &scope(org_name, space_name)).await?,
            ),
            Activity::UnmapRouteFromApp {
                app_name,
                host_name,
                org_name,
                space_name,
            } => to_json(
                actions::unmap_route_from_app(client, app_name, host_name, &scope(org_name, space_name))
                    .await?,
            ),
            Activity::RemoveRoutesFromApp {
                app_name,
                route_host,
                org_name,
                space_name,
            } => to_json(
                actions::remove_routes_from_app(client, app_name, route_host, &scope(org_name, space_name))
                    .await?,
            ),
            Activity::TerminateAppInstance {
                app_name,
                instance_index,
                org_name,
                space_name,
            } => to_json(
                actions::terminate_app_instance(client, app_name, *instance_index, &scope(org_name, space_name))
                    .await?,
            ),
            Activity::TerminateSomeRandomInstance {
                app_name,
                org_name,
                space_name,
            } => to_json(
                actions::terminate_some_random_instance(client, app_name, &scope(org_name, space_name)).await?,
            ),
            Activity::UnbindServiceFromApp {
                app_name,
                bind_name,
                org_name,
                space_name,
            } => to_json(
                actions::unbind_service_from_app(client, app_name, bind_name, &scope(org_name, space_name))
                    .await?,
            ),
            Activity::ListApps {} => to_json(probes::list_apps(client).await?),
            Activity::GetAppStats {
                app_name,
                org_name,
                space_name,
            } => probes::get_app_stats(client, app_name, &scope(org_name, space_name)).await,
            Activity::GetAppSummary {
                app_name,
                org_name,
                space_name,
            } => probes::get_app_summary(client, app_name, &scope(org_name, space_name)).await,
            Activity::GetAppInstances {
                app_name,
                org_name,
                space_name,
            } => to_json(probes::get_app_instances(client, app_name, &scope(org_name, space_name)).await?),
        }
    }
}

/// Run an exported activity the way a chaos host calls it
///
/// The call is validated before anything is sent. The client authenticates
/// once, when the secrets hold a user rather than a token.
pub async fn run_activity(
    name: &str,
    arguments: Value,
    configuration: &Configuration,
    secrets: &Secrets,
) -> Result<Value> {
    let activity = Activity::from_call(name, arguments)?;
    let config = Config::from_activity(configuration, secrets)?;
    let client = Client::connect(config).await?;
    activity.run(&client).await
}
