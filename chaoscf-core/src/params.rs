//! Parameters of listing calls.
use crate::filter::Filter;

/// Common query parameters used in list calls
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListParams {
    /// `q` clauses narrowing the listing
    pub filter: Filter,

    /// Extra query pairs, sent after the filter
    pub extra: Vec<(String, String)>,
}

impl ListParams {
    /// List with the given filter
    pub fn filtered(filter: Filter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    /// Add a query pair
    #[must_use]
    pub fn param(mut self, key: &str, value: &str) -> Self {
        self.extra.push((key.to_owned(), value.to_owned()));
        self
    }
}
