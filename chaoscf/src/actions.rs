//! Actions change the state of a Cloud Foundry deployment.
//!
//! Each action resolves the resources it targets by name, then issues its calls
//! one after the other. A failing call stops the action, earlier calls are not rolled back.
use chaoscf_client::{api::Scope, Client, Error, Result};
use chaoscf_core::{
    extension::ArgumentSpec, ActivitySpec, App, AppState, Entity, ListParams, Request, Resource, Route,
    ServiceBinding,
};
use rand::seq::IteratorRandom;
use serde_json::json;

/// Module name advertised for actions
pub const MODULE: &str = "chaoscf.actions";

const APP: ArgumentSpec = ArgumentSpec::required("app_name");
const ORG: ArgumentSpec = ArgumentSpec::optional("org_name");
const SPACE: ArgumentSpec = ArgumentSpec::optional("space_name");

/// Every exported action
pub const EXPORTS: &[ActivitySpec] = &[
    ActivitySpec {
        name: "delete_app",
        doc: "Delete application.",
        arguments: &[APP, ORG, SPACE],
    },
    ActivitySpec {
        name: "stop_app",
        doc: "Stop application.",
        arguments: &[APP, ORG, SPACE],
    },
    ActivitySpec {
        name: "start_app",
        doc: "Start application.",
        arguments: &[APP, ORG, SPACE],
    },
    ActivitySpec {
        name: "stop_all_apps",
        doc: "Stop all applications of an organization, one after the other.",
        arguments: &[ArgumentSpec::required("org_name")],
    },
    ActivitySpec {
        name: "start_all_apps",
        doc: "Start all applications of an organization, one after the other.",
        arguments: &[ArgumentSpec::required("org_name")],
    },
    ActivitySpec {
        name: "map_route_to_app",
        doc: "Map the routes with the given host to an application.",
        arguments: &[APP, ArgumentSpec::required("host_name"), ORG, SPACE],
    },
    ActivitySpec {
        name: "unmap_route_from_app",
        doc: "Unmap the routes with the given host from an application.",
        arguments: &[APP, ArgumentSpec::required("host_name"), ORG, SPACE],
    },
    ActivitySpec {
        name: "remove_routes_from_app",
        doc: "Remove the routes with the given host that are bound to an application.",
        arguments: &[APP, ArgumentSpec::required("route_host"), ORG, SPACE],
    },
    ActivitySpec {
        name: "terminate_app_instance",
        doc: "Terminate the application's instance at the given index.",
        arguments: &[APP, ArgumentSpec::integer("instance_index"), ORG, SPACE],
    },
    ActivitySpec {
        name: "terminate_some_random_instance",
        doc: "Terminate a random application's instance.",
        arguments: &[APP, ORG, SPACE],
    },
    ActivitySpec {
        name: "unbind_service_from_app",
        doc: "Unbind the service from the given application.",
        arguments: &[APP, ArgumentSpec::required("bind_name"), ORG, SPACE],
    },
];

/// Delete an application
///
/// See <https://apidocs.cloudfoundry.org/280/apps/delete_a_particular_app.html>
pub async fn delete_app(client: &Client, app_name: &str, scope: &Scope) -> Result<()> {
    let app = client.get_app_by_name(app_name, scope).await?;
    tracing::debug!("Deleting application {}", app_name);
    let req = Request::new(App::URL_PATH)
        .delete(app.guid())
        .map_err(Error::BuildRequest)?;
    client.request_text(req).await?;
    Ok(())
}

/// Stop an application, returns the updated app
pub async fn stop_app(client: &Client, app_name: &str, scope: &Scope) -> Result<Resource<App>> {
    let app = client.get_app_by_name(app_name, scope).await?;
    set_state(client, &app, AppState::Stopped).await
}

/// Start an application, returns the updated app
pub async fn start_app(client: &Client, app_name: &str, scope: &Scope) -> Result<Resource<App>> {
    let app = client.get_app_by_name(app_name, scope).await?;
    set_state(client, &app, AppState::Started).await
}

/// Stop every application of an organization in listing order
pub async fn stop_all_apps(client: &Client, org_name: &str) -> Result<Vec<Resource<App>>> {
    set_state_of_org_apps(client, org_name, AppState::Stopped).await
}

/// Start every application of an organization in listing order
pub async fn start_all_apps(client: &Client, org_name: &str) -> Result<Vec<Resource<App>>> {
    set_state_of_org_apps(client, org_name, AppState::Started).await
}

async fn set_state_of_org_apps(client: &Client, org_name: &str, state: AppState) -> Result<Vec<Resource<App>>> {
    let apps = client.list_org_apps(org_name).await?;
    let mut updated = Vec::with_capacity(apps.len());
    for app in &apps {
        updated.push(set_state(client, app, state).await?);
    }
    Ok(updated)
}

async fn set_state(client: &Client, app: &Resource<App>, state: AppState) -> Result<Resource<App>> {
    tracing::debug!("Setting application {} to {:?}", app.entity.name, state);
    let req = Request::new(App::URL_PATH)
        .update(app.guid(), &json!({ "state": state }))
        .map_err(Error::BuildRequest)?;
    client.request(req).await
}

/// Map the routes with the given host to an application
///
/// Routes already mapped to the app are left alone. Returns the app as updated by each mapping.
/// Domains are deprecated in the v2 API and therefore not taken into account.
///
/// See <https://apidocs.cloudfoundry.org/280/apps/associate_route_with_the_app.html>
pub async fn map_route_to_app(
    client: &Client,
    app_name: &str,
    host_name: &str,
    scope: &Scope,
) -> Result<Vec<Resource<App>>> {
    let scope = client.resolve_scope(scope).await?;
    let app = client.get_app_by_name(app_name, &scope).await?;
    let routes_for_host = client.get_routes_by_host(host_name, &scope).await?;

    let routes_path = app.routes_url();
    let mapped: Vec<Resource<Route>> = client
        .list_all(&Request::new(routes_path.as_str()), &ListParams::default())
        .await?;

    let mut results = vec![];
    for route in routes_for_host {
        if mapped.iter().any(|r| r.guid() == route.guid()) {
            tracing::debug!("Route {} is already mapped to {}", route.guid(), app_name);
            continue;
        }
        tracing::debug!("Mapping route {} to {}", route.guid(), app_name);
        let req = Request::new(routes_path.as_str())
            .associate(route.guid())
            .map_err(Error::BuildRequest)?;
        results.push(client.request(req).await?);
    }
    Ok(results)
}

/// Unmap the routes with the given host from an application, returns the unmapped routes
///
/// See <https://apidocs.cloudfoundry.org/280/apps/remove_route_from_the_app.html>
pub async fn unmap_route_from_app(
    client: &Client,
    app_name: &str,
    host_name: &str,
    scope: &Scope,
) -> Result<Vec<Resource<Route>>> {
    let app = client.get_app_by_name(app_name, scope).await?;
    let routes_path = app.routes_url();
    let routes: Vec<Resource<Route>> = client
        .list_all(&Request::new(routes_path.as_str()), &ListParams::default())
        .await?;

    let mut unmapped = vec![];
    for route in routes {
        if route.entity.host != host_name {
            continue;
        }
        tracing::debug!("Unmapping route {} from {}", route.guid(), app_name);
        let req = Request::new(routes_path.as_str())
            .delete(route.guid())
            .map_err(Error::BuildRequest)?;
        client.request_text(req).await?;
        unmapped.push(route);
    }
    Ok(unmapped)
}

/// Remove the routes with the given host bound to an application, returns the removed routes
///
/// See <https://apidocs.cloudfoundry.org/280/apps/remove_route_from_the_app.html>
pub async fn remove_routes_from_app(
    client: &Client,
    app_name: &str,
    route_host: &str,
    scope: &Scope,
) -> Result<Vec<Resource<Route>>> {
    let scope = client.resolve_scope(scope).await?;
    let app = client.get_app_by_name(app_name, &scope).await?;
    let routes = client.get_app_routes_by_host(app_name, route_host, &scope).await?;

    let app_routes = Request::new(format!("{}/{}/routes", App::URL_PATH, app.guid()));
    for route in &routes {
        tracing::debug!("Removing route {} from {}", route.guid(), app_name);
        let req = app_routes.delete(route.guid()).map_err(Error::BuildRequest)?;
        client.request_text(req).await?;
    }
    Ok(routes)
}

/// Terminate the application's instance at the given index
///
/// See <https://apidocs.cloudfoundry.org/280/apps/terminate_the_running_app_instance_at_the_given_index.html>
pub async fn terminate_app_instance(
    client: &Client,
    app_name: &str,
    instance_index: u32,
    scope: &Scope,
) -> Result<()> {
    let app = client.get_app_by_name(app_name, scope).await?;
    terminate_instance(client, &app, instance_index).await
}

/// Terminate an instance of an application picked at random
///
/// Returns the index of the terminated instance.
pub async fn terminate_some_random_instance(client: &Client, app_name: &str, scope: &Scope) -> Result<u32> {
    let app = client.get_app_by_name(app_name, scope).await?;
    let instances = client.instances_of(&app).await?;
    let index = instances
        .keys()
        .copied()
        .choose(&mut rand::rng())
        .ok_or_else(|| Error::NoInstances {
            app: app_name.to_owned(),
        })?;
    terminate_instance(client, &app, index).await?;
    Ok(index)
}

async fn terminate_instance(client: &Client, app: &Resource<App>, index: u32) -> Result<()> {
    tracing::debug!("Terminating instance {} of application {}", index, app.entity.name);
    let req = Request::new(app.instances_url())
        .delete(&index.to_string())
        .map_err(Error::BuildRequest)?;
    client.request_text(req).await?;
    Ok(())
}

/// Unbind a service from an application
///
/// See <https://apidocs.cloudfoundry.org/280/service_bindings/delete_a_particular_service_binding.html>
pub async fn unbind_service_from_app(
    client: &Client,
    app_name: &str,
    bind_name: &str,
    scope: &Scope,
) -> Result<()> {
    let scope = client.resolve_scope(scope).await?;
    let app = client.get_app_by_name(app_name, &scope).await?;
    let binding = client.get_bind_by_name(bind_name, &scope).await?;
    tracing::debug!("Unbinding {} from {}", bind_name, app.entity.name);
    let req = Request::new(ServiceBinding::URL_PATH)
        .delete(binding.guid())
        .map_err(Error::BuildRequest)?;
    client.request_text(req).await?;
    Ok(())
}
