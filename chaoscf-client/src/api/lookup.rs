use chaoscf_core::{
    App, Entity, Filter, Instances, ListParams, Organization, Request, Resource, ResourceList, Route,
    ServiceBinding, Space,
};

use super::Scope;
use crate::{Client, Error, Result};

/// Lookups by name, the way activities address resources
impl Client {
    /// List one page of a collection
    pub async fn list<E: Entity>(&self, request: &Request, lp: &ListParams) -> Result<ResourceList<E>> {
        let req = request.list(lp).map_err(Error::BuildRequest)?;
        self.request(req).await
    }

    /// List every page of a collection, following `next_url` until the last page
    pub async fn list_all<E: Entity>(&self, request: &Request, lp: &ListParams) -> Result<Vec<Resource<E>>> {
        let mut items = vec![];
        let mut page: ResourceList<E> = self.list(request, lp).await?;
        loop {
            let next_url = page.next_url.take();
            items.extend(page);
            match next_url {
                Some(url) => {
                    tracing::trace!("following {}", url);
                    page = self.list(&Request::new(url), &ListParams::default()).await?;
                }
                None => break,
            }
        }
        Ok(items)
    }

    /// The first resource of `E`'s collection matching `filter`
    async fn first_matching<E: Entity>(&self, filter: Filter, name: &str) -> Result<Resource<E>> {
        let list: ResourceList<E> = self
            .list(&Request::new(E::URL_PATH), &ListParams::filtered(filter))
            .await?;
        list.into_iter().next().ok_or_else(|| Error::NotFound {
            kind: E::KIND,
            name: name.to_owned(),
        })
    }

    /// Get the organization with the given name
    pub async fn get_org_by_name(&self, org_name: &str) -> Result<Resource<Organization>> {
        self.first_matching(Filter::new().name(org_name), org_name).await
    }

    async fn resolve_org_guid(&self, scope: &Scope) -> Result<Option<String>> {
        Ok(match (&scope.org_guid, &scope.org_name) {
            (Some(guid), _) => Some(guid.clone()),
            (None, Some(name)) => Some(self.get_org_by_name(name).await?.metadata.guid),
            (None, None) => None,
        })
    }

    /// Get the space with the given name
    ///
    /// Only the organization part of `scope` narrows the search.
    pub async fn get_space_by_name(&self, space_name: &str, scope: &Scope) -> Result<Resource<Space>> {
        let mut filter = Filter::new().name(space_name);
        if let Some(org_guid) = self.resolve_org_guid(scope).await? {
            filter = filter.organization_guid(&org_guid);
        }
        self.first_matching(filter, space_name).await
    }

    /// Turn the names of a scope into GUIDs
    ///
    /// The space is looked up within the resolved organization.
    pub async fn resolve_scope(&self, scope: &Scope) -> Result<Scope> {
        if scope.is_resolved() {
            return Ok(scope.clone());
        }
        let org_guid = self.resolve_org_guid(scope).await?;
        let space_guid = match (&scope.space_guid, &scope.space_name) {
            (Some(guid), _) => Some(guid.clone()),
            (None, Some(name)) => {
                let within = Scope {
                    org_guid: org_guid.clone(),
                    ..Scope::default()
                };
                Some(self.get_space_by_name(name, &within).await?.metadata.guid)
            }
            (None, None) => None,
        };
        Ok(Scope {
            org_guid,
            space_guid,
            ..Scope::default()
        })
    }

    /// The filter narrowing a lookup to `scope`
    pub async fn filter_query(&self, scope: &Scope) -> Result<Filter> {
        Ok(self.resolve_scope(scope).await?.guid_filter())
    }

    /// Get the application with the given name
    pub async fn get_app_by_name(&self, app_name: &str, scope: &Scope) -> Result<Resource<App>> {
        let filter = self.filter_query(scope).await?.name(app_name);
        self.first_matching(filter, app_name).await
    }

    /// Get all routes with the given host
    ///
    /// Only the organization part of `scope` narrows the search.
    pub async fn get_routes_by_host(&self, route_host: &str, scope: &Scope) -> Result<ResourceList<Route>> {
        let mut filter = Filter::new();
        if let Some(org_guid) = self.resolve_org_guid(scope).await? {
            filter = filter.organization_guid(&org_guid);
        }
        let routes: ResourceList<Route> = self
            .list(
                &Request::new(Route::URL_PATH),
                &ListParams::filtered(filter.host(route_host)),
            )
            .await?;
        if routes.is_empty() {
            return Err(Error::NotFound {
                kind: Route::KIND,
                name: route_host.to_owned(),
            });
        }
        Ok(routes)
    }

    /// Get the routes with the given host that are bound to the named app
    pub async fn get_app_routes_by_host(
        &self,
        app_name: &str,
        route_host: &str,
        scope: &Scope,
    ) -> Result<Vec<Resource<Route>>> {
        let scope = self.resolve_scope(scope).await?;
        let routes = self.get_routes_by_host(route_host, &scope).await?;
        let app = self.get_app_by_name(app_name, &scope).await?;
        self.routes_bound_to(&app, routes, route_host, &scope).await
    }

    /// Keep the routes that list `app` among their apps
    pub(crate) async fn routes_bound_to(
        &self,
        app: &Resource<App>,
        routes: ResourceList<Route>,
        route_host: &str,
        scope: &Scope,
    ) -> Result<Vec<Resource<Route>>> {
        let filter = self.filter_query(scope).await?;
        let mut bound = vec![];
        for route in routes {
            let lp = ListParams::filtered(filter.clone()).param("app_guid", app.guid());
            let apps: ResourceList<App> = self.list(&Request::new(route.apps_url()), &lp).await?;
            if !apps.is_empty() {
                bound.push(route);
            }
        }
        if bound.is_empty() {
            return Err(Error::NoRoutesForApp {
                app: app.entity.name.clone(),
                host: route_host.to_owned(),
            });
        }
        Ok(bound)
    }

    /// Get all the instances of a started application
    pub async fn get_app_instances(&self, app_name: &str, scope: &Scope) -> Result<Instances> {
        let app = self.get_app_by_name(app_name, scope).await?;
        self.instances_of(&app).await
    }

    /// Get the instances of an application already looked up
    pub async fn instances_of(&self, app: &Resource<App>) -> Result<Instances> {
        let req = Request::new(App::URL_PATH)
            .get_subresource("instances", app.guid())
            .map_err(Error::BuildRequest)?;
        let instances: Instances = self.request(req).await?;
        if instances.is_empty() {
            return Err(Error::NoInstances {
                app: app.entity.name.clone(),
            });
        }
        Ok(instances)
    }

    /// Get the service binding with the given name
    pub async fn get_bind_by_name(&self, bind_name: &str, scope: &Scope) -> Result<Resource<ServiceBinding>> {
        let filter = self.filter_query(scope).await?.name(bind_name);
        self.first_matching(filter, bind_name).await
    }

    /// Every app of the named organization, across all pages, in listing order
    pub async fn list_org_apps(&self, org_name: &str) -> Result<Vec<Resource<App>>> {
        let org = self.get_org_by_name(org_name).await?;
        self.list_all(
            &Request::new(App::URL_PATH),
            &ListParams::filtered(Filter::new().organization_guid(org.guid())),
        )
        .await
    }
}
