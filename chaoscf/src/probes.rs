//! Probes read the state of a Cloud Foundry deployment.
use chaoscf_client::{api::Scope, Client, Error, Result};
use chaoscf_core::{extension::ArgumentSpec, ActivitySpec, App, Entity, Instances, ListParams, Request, ResourceList};
use serde_json::Value;

/// Module name advertised for probes
pub const MODULE: &str = "chaoscf.probes";

const APP: ArgumentSpec = ArgumentSpec::required("app_name");
const ORG: ArgumentSpec = ArgumentSpec::optional("org_name");
const SPACE: ArgumentSpec = ArgumentSpec::optional("space_name");

/// Every exported probe
pub const EXPORTS: &[ActivitySpec] = &[
    ActivitySpec {
        name: "list_apps",
        doc: "List all applications available to the authorized user.",
        arguments: &[],
    },
    ActivitySpec {
        name: "get_app_stats",
        doc: "Fetch the metrics of the given application.",
        arguments: &[APP, ORG, SPACE],
    },
    ActivitySpec {
        name: "get_app_summary",
        doc: "Fetch the application summary.",
        arguments: &[APP, ORG, SPACE],
    },
    ActivitySpec {
        name: "get_app_instances",
        doc: "Fetch the instances of a started application.",
        arguments: &[APP, ORG, SPACE],
    },
];

/// List the applications available to the authorized user
///
/// Only the first page of the listing is returned.
/// See <https://apidocs.cloudfoundry.org/280/apps/list_all_apps.html>
pub async fn list_apps(client: &Client) -> Result<ResourceList<App>> {
    client
        .list(&Request::new(App::URL_PATH), &ListParams::default())
        .await
}

/// Fetch the metrics of each instance of an application
///
/// See <https://apidocs.cloudfoundry.org/280/apps/get_detailed_stats_for_a_started_app.html>
pub async fn get_app_stats(client: &Client, app_name: &str, scope: &Scope) -> Result<Value> {
    app_subresource(client, app_name, "stats", scope).await
}

/// Fetch the application summary
///
/// See <https://apidocs.cloudfoundry.org/280/apps/get_app_summary.html>
pub async fn get_app_summary(client: &Client, app_name: &str, scope: &Scope) -> Result<Value> {
    app_subresource(client, app_name, "summary", scope).await
}

/// Fetch the instances of a started application
pub async fn get_app_instances(client: &Client, app_name: &str, scope: &Scope) -> Result<Instances> {
    client.get_app_instances(app_name, scope).await
}

async fn app_subresource(client: &Client, app_name: &str, subresource: &str, scope: &Scope) -> Result<Value> {
    let app = client.get_app_by_name(app_name, scope).await?;
    let req = Request::new(App::URL_PATH)
        .get_subresource(subresource, app.guid())
        .map_err(Error::BuildRequest)?;
    client.request(req).await
}
