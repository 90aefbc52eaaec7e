//! Name resolution against the v2 API.
//!
//! Activities address resources by name, optionally narrowed to an organization
//! and a space. A [`Scope`] carries that narrowing, the lookups on [`Client`](crate::Client)
//! turn names into resources.
mod lookup;

use chaoscf_core::Filter;

/// Organization and space narrowing a lookup
///
/// Names are resolved to GUIDs on use, GUIDs skip the corresponding lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scope {
    /// Name of the organization
    pub org_name: Option<String>,
    /// GUID of the organization, wins over `org_name`
    pub org_guid: Option<String>,
    /// Name of the space
    pub space_name: Option<String>,
    /// GUID of the space, wins over `space_name`
    pub space_guid: Option<String>,
}

impl Scope {
    /// No narrowing, lookups span everything the user can see
    pub fn new() -> Self {
        Self::default()
    }

    /// Narrow by optional organization and space names, as activities receive them
    pub fn from_names(org_name: Option<&str>, space_name: Option<&str>) -> Self {
        Self {
            org_name: org_name.map(String::from),
            space_name: space_name.map(String::from),
            ..Self::default()
        }
    }

    /// Narrow to the named organization
    #[must_use]
    pub fn org(mut self, name: &str) -> Self {
        self.org_name = Some(name.to_owned());
        self
    }

    /// Narrow to the named space
    #[must_use]
    pub fn space(mut self, name: &str) -> Self {
        self.space_name = Some(name.to_owned());
        self
    }

    /// Narrow to an organization by GUID
    #[must_use]
    pub fn org_guid(mut self, guid: &str) -> Self {
        self.org_guid = Some(guid.to_owned());
        self
    }

    /// Narrow to a space by GUID
    #[must_use]
    pub fn space_guid(mut self, guid: &str) -> Self {
        self.space_guid = Some(guid.to_owned());
        self
    }

    /// Whether both organization and space are given by GUID or absent
    pub fn is_resolved(&self) -> bool {
        (self.org_name.is_none() || self.org_guid.is_some())
            && (self.space_name.is_none() || self.space_guid.is_some())
    }

    /// Filter clauses of the GUIDs at hand, organization first
    pub(crate) fn guid_filter(&self) -> Filter {
        let mut filter = Filter::new();
        if let Some(org_guid) = &self.org_guid {
            filter = filter.organization_guid(org_guid);
        }
        if let Some(space_guid) = &self.space_guid {
            filter = filter.space_guid(space_guid);
        }
        filter
    }
}

#[cfg(test)]
mod tests {
    use super::Scope;

    #[test]
    fn guid_filter_ignores_names() {
        let scope = Scope::from_names(Some("pcfdev-org"), Some("pcfdev-space"));
        assert!(!scope.is_resolved());
        assert!(scope.guid_filter().is_empty());

        let scope = scope.org_guid("o-1").space_guid("s-1");
        assert!(scope.is_resolved());
        assert_eq!(scope.guid_filter().to_string(), "organization_guid:o-1;space_guid:s-1");
    }
}
