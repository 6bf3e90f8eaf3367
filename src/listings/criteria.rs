use serde::{Deserialize, Serialize};

use crate::models::JobType;

/// Listings shown per page in the browse view
pub const PAGE_SIZE: usize = 12;

/// Result ordering for the browse view
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Keep the working set's own order (default ranking)
    #[default]
    Relevance,
    Newest,
    Deadline,
}

/// Active search/filter/sort/page parameters for the listing pipeline.
/// Ephemeral UI state, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Criteria {
    /// Matched case-insensitively against title, company and tags
    pub search_query: String,
    /// Case-insensitive substring match against location
    pub location_query: String,
    /// `None` means "all"
    pub type_filter: Option<JobType>,
    pub sort_key: SortKey,
    /// 1-based; clamped against the filtered count when paginating
    pub page: usize,
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            location_query: String::new(),
            type_filter: None,
            sort_key: SortKey::default(),
            page: 1,
        }
    }
}

impl Criteria {
    /// Build initial criteria from the entry URL's query string,
    /// reading the `q` and `location` parameters.
    pub fn from_query_string(query: &str) -> Self {
        let mut criteria = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "q" => criteria.search_query = value.into_owned(),
                "location" => criteria.location_query = value.into_owned(),
                _ => {}
            }
        }
        criteria
    }

    pub fn with_search(mut self, query: &str) -> Self {
        self.search_query = query.to_string();
        self
    }

    pub fn with_location(mut self, query: &str) -> Self {
        self.location_query = query.to_string();
        self
    }

    pub fn with_type(mut self, job_type: JobType) -> Self {
        self.type_filter = Some(job_type);
        self
    }

    pub fn with_sort(mut self, sort_key: SortKey) -> Self {
        self.sort_key = sort_key;
        self
    }

    pub fn on_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_string_populates_search_and_location() {
        let criteria = Criteria::from_query_string("q=utvecklare&location=G%C3%B6teborg");
        assert_eq!(criteria.search_query, "utvecklare");
        assert_eq!(criteria.location_query, "Göteborg");
        assert_eq!(criteria.page, 1);
        assert_eq!(criteria.sort_key, SortKey::Relevance);
    }

    #[test]
    fn query_string_ignores_unknown_params() {
        let criteria = Criteria::from_query_string("utm_source=mail&q=rust");
        assert_eq!(criteria.search_query, "rust");
        assert!(criteria.location_query.is_empty());
    }

    #[test]
    fn plus_decodes_to_space() {
        let criteria = Criteria::from_query_string("q=senior+developer");
        assert_eq!(criteria.search_query, "senior developer");
    }
}
