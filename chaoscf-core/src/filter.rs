//! Query filters of the v2 API.
//!
//! Listings accept any number of `q` parameters of the form `field:value`,
//! all of which must hold for a resource to be returned.
use std::fmt;

/// An ordered set of `q` filter clauses
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Filter {
    clauses: Vec<String>,
}

impl Filter {
    /// An empty filter, matching everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `field:value` clause
    #[must_use]
    pub fn clause(mut self, field: &str, value: &str) -> Self {
        self.clauses.push(format!("{field}:{value}"));
        self
    }

    /// Restrict to resources with the given name
    #[must_use]
    pub fn name(self, name: &str) -> Self {
        self.clause("name", name)
    }

    /// Restrict to routes with the given host
    #[must_use]
    pub fn host(self, host: &str) -> Self {
        self.clause("host", host)
    }

    /// Restrict to an organization
    #[must_use]
    pub fn organization_guid(self, guid: &str) -> Self {
        self.clause("organization_guid", guid)
    }

    /// Restrict to a space
    #[must_use]
    pub fn space_guid(self, guid: &str) -> Self {
        self.clause("space_guid", guid)
    }

    /// The clauses in the order they were added
    pub fn clauses(&self) -> &[String] {
        &self.clauses
    }

    /// Whether no clause was added
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.clauses.join(";"))
    }
}

#[cfg(test)]
mod tests {
    use super::Filter;

    #[test]
    fn clauses_keep_insertion_order() {
        let f = Filter::new().organization_guid("o").space_guid("s").name("my-app");
        assert_eq!(f.clauses(), ["organization_guid:o", "space_guid:s", "name:my-app"]);
        assert_eq!(f.to_string(), "organization_guid:o;space_guid:s;name:my-app");
    }

    #[test]
    fn empty_filter() {
        assert!(Filter::new().is_empty());
        assert!(!Filter::new().host("whatever").is_empty());
    }
}
