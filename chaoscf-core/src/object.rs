//! Generic resource envelopes of the v2 API.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::fields::raw_object;

/// Metadata found on every v2 resource
#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Metadata {
    /// The unique identifier of the resource
    pub guid: String,
    /// The self link of the resource
    pub url: Option<String>,
    /// Creation timestamp as returned by the API
    pub created_at: Option<String>,
    /// Last update timestamp as returned by the API
    pub updated_at: Option<String>,
    /// Remaining metadata, and the fields above when `null`
    pub other: Map<String, Value>,
}

raw_object!(Metadata { guid ; url, created_at, updated_at });

/// A v2 resource: `metadata` plus the typed `entity`
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Resource<E> {
    /// Identity of the resource
    pub metadata: Metadata,
    /// The resource body
    pub entity: E,
}

impl<E> Resource<E> {
    /// The GUID of this resource
    pub fn guid(&self) -> &str {
        &self.metadata.guid
    }
}

/// A page of a v2 listing
///
/// `next_url` points at the following page, and is a path relative to the API root.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ResourceList<E> {
    /// Number of resources across all pages
    #[serde(default)]
    pub total_results: u64,
    /// Number of pages
    #[serde(default)]
    pub total_pages: u64,
    /// Path of the previous page
    #[serde(default)]
    pub prev_url: Option<String>,
    /// Path of the next page
    #[serde(default)]
    pub next_url: Option<String>,
    /// The resources on this page
    #[serde(bound(deserialize = "Vec<Resource<E>>: Deserialize<'de>"))]
    #[serde(default = "Vec::new")]
    pub resources: Vec<Resource<E>>,
}

impl<E> ResourceList<E> {
    /// Whether the listing matched nothing
    ///
    /// Both the counter and the page are checked since some endpoints omit `total_results`.
    pub fn is_empty(&self) -> bool {
        self.total_results == 0 && self.resources.is_empty()
    }

    /// Iterate over the resources of this page
    pub fn iter(&self) -> impl Iterator<Item = &Resource<E>> {
        self.resources.iter()
    }
}

impl<E> IntoIterator for ResourceList<E> {
    type IntoIter = ::std::vec::IntoIter<Self::Item>;
    type Item = Resource<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.resources.into_iter()
    }
}

impl<'a, E> IntoIterator for &'a ResourceList<E> {
    type IntoIter = ::std::slice::Iter<'a, Resource<E>>;
    type Item = &'a Resource<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.resources.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_without_counters_is_read_from_resources() {
        let list: ResourceList<Value> = serde_json::from_value(json!({
            "resources": [{"metadata": {"guid": "abc"}, "entity": {}}]
        }))
        .unwrap();
        assert!(!list.is_empty());
        assert_eq!(list.iter().next().unwrap().guid(), "abc");
        assert_eq!(list.next_url, None);
    }

    #[test]
    fn metadata_keeps_extra_keys_and_nulls() {
        let raw = json!({
            "guid": "abc",
            "url": "/v2/apps/abc",
            "created_at": "2018-01-04T14:35:55Z",
            "updated_at": null,
            "labels": {"team": "sre"}
        });
        let metadata: Metadata = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(metadata.guid, "abc");
        assert_eq!(metadata.updated_at, None);
        assert_eq!(serde_json::to_value(&metadata).unwrap(), raw);
    }

    #[test]
    fn empty_list() {
        let list: ResourceList<Value> = serde_json::from_value(json!({
            "total_results": 0,
            "total_pages": 1,
            "prev_url": null,
            "next_url": null,
            "resources": []
        }))
        .unwrap();
        assert!(list.is_empty());
    }
}
