//! Request builder type for arbitrary api types
use crate::{params::ListParams, Error, Result};

pub(crate) const JSON_MIME: &str = "application/json";

/// A v2 API request builder
///
/// Takes a collection path and supplies constructors for the calls this extension makes.
/// Paths are relative to the API root; the client joins them onto the configured URL.
#[derive(Debug, Clone)]
pub struct Request {
    /// The path component of a url
    pub url_path: String,
}

impl Request {
    /// New request with a resource's url path
    pub fn new<S: Into<String>>(url_path: S) -> Self {
        Self {
            url_path: url_path.into(),
        }
    }
}

/// Convenience methods following the v2 API conventions
impl Request {
    /// List a collection, one `q` parameter per filter clause
    pub fn list(&self, lp: &ListParams) -> Result<http::Request<Vec<u8>>> {
        let mut qp = form_urlencoded::Serializer::new(String::new());
        for clause in lp.filter.clauses() {
            qp.append_pair("q", clause);
        }
        for (key, value) in &lp.extra {
            qp.append_pair(key, value);
        }
        let query = qp.finish();

        let urlstr = if query.is_empty() {
            self.url_path.clone()
        } else if self.url_path.contains('?') {
            format!("{}&{}", self.url_path, query)
        } else {
            format!("{}?{}", self.url_path, query)
        };
        http::Request::get(urlstr).body(vec![]).map_err(Error::HttpError)
    }

    /// Get a single resource
    pub fn get(&self, guid: &str) -> Result<http::Request<Vec<u8>>> {
        let target = format!("{}/{}", self.url_path, guid);
        http::Request::get(target).body(vec![]).map_err(Error::HttpError)
    }

    /// Get a nested path of a single resource, e.g. `/v2/apps/{guid}/stats`
    pub fn get_subresource(&self, subresource: &str, guid: &str) -> Result<http::Request<Vec<u8>>> {
        let target = format!("{}/{}/{}", self.url_path, guid, subresource);
        http::Request::get(target).body(vec![]).map_err(Error::HttpError)
    }

    /// Update a single resource with a JSON body
    pub fn update<T: serde::Serialize>(&self, guid: &str, data: &T) -> Result<http::Request<Vec<u8>>> {
        let target = format!("{}/{}", self.url_path, guid);
        let body = serde_json::to_vec(data)?;
        http::Request::put(target)
            .header(http::header::CONTENT_TYPE, JSON_MIME)
            .body(body)
            .map_err(Error::HttpError)
    }

    /// Associate a member with the collection, e.g. a route with an app
    pub fn associate(&self, guid: &str) -> Result<http::Request<Vec<u8>>> {
        let target = format!("{}/{}", self.url_path, guid);
        http::Request::put(target).body(vec![]).map_err(Error::HttpError)
    }

    /// Delete a single resource, or remove a member from the collection
    pub fn delete(&self, guid: &str) -> Result<http::Request<Vec<u8>>> {
        let target = format!("{}/{}", self.url_path, guid);
        http::Request::delete(target).body(vec![]).map_err(Error::HttpError)
    }
}

#[cfg(test)]
mod test {
    use crate::{filter::Filter, params::ListParams, request::Request};
    use http::Method;

    fn query_pairs(req: &http::Request<Vec<u8>>) -> Vec<(String, String)> {
        form_urlencoded::parse(req.uri().query().unwrap_or_default().as_bytes())
            .into_owned()
            .collect()
    }

    #[test]
    fn list_path_without_params() {
        let req = Request::new("/v2/apps").list(&ListParams::default()).unwrap();
        assert_eq!(req.method(), Method::GET);
        assert_eq!(req.uri(), "/v2/apps");
    }

    #[test]
    fn list_path_one_q_per_clause() {
        let lp = ListParams::filtered(Filter::new().organization_guid("o-1").name("my-app"));
        let req = Request::new("/v2/apps").list(&lp).unwrap();
        assert_eq!(req.uri().path(), "/v2/apps");
        assert_eq!(query_pairs(&req), vec![
            ("q".to_string(), "organization_guid:o-1".to_string()),
            ("q".to_string(), "name:my-app".to_string()),
        ]);
    }

    #[test]
    fn list_path_extra_params_follow_filter() {
        let lp = ListParams::filtered(Filter::new().space_guid("s-1")).param("app_guid", "a-1");
        let req = Request::new("/v2/routes/r-1/apps").list(&lp).unwrap();
        assert_eq!(query_pairs(&req), vec![
            ("q".to_string(), "space_guid:s-1".to_string()),
            ("app_guid".to_string(), "a-1".to_string()),
        ]);
    }

    #[test]
    fn list_next_page_keeps_query() {
        let req = Request::new("/v2/apps?page=2&results-per-page=50")
            .list(&ListParams::default())
            .unwrap();
        assert_eq!(req.uri(), "/v2/apps?page=2&results-per-page=50");
    }

    #[test]
    fn subresource_path() {
        let req = Request::new("/v2/apps").get_subresource("stats", "a-1").unwrap();
        assert_eq!(req.uri(), "/v2/apps/a-1/stats");
    }

    #[test]
    fn update_sends_json() {
        let req = Request::new("/v2/apps")
            .update("a-1", &serde_json::json!({"state": "STOPPED"}))
            .unwrap();
        assert_eq!(req.method(), Method::PUT);
        assert_eq!(req.uri(), "/v2/apps/a-1");
        assert_eq!(req.headers()[http::header::CONTENT_TYPE], "application/json");
        assert_eq!(req.body(), br#"{"state":"STOPPED"}"#);
    }

    #[test]
    fn associate_and_delete_member() {
        let routes = Request::new("/v2/apps/a-1/routes");
        let put = routes.associate("r-1").unwrap();
        assert_eq!(put.method(), Method::PUT);
        assert_eq!(put.uri(), "/v2/apps/a-1/routes/r-1");
        let delete = routes.delete("r-1").unwrap();
        assert_eq!(delete.method(), Method::DELETE);
        assert_eq!(delete.uri(), "/v2/apps/a-1/routes/r-1");
    }
}
