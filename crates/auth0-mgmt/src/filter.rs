//! Query-parameter filters for list endpoints.
//!
//! Filters collect parameters in insertion order; setting the same
//! parameter twice replaces the earlier value in place. The values are
//! encoded once, when the URL is built.

use crate::request::{set_param, QueryValue};

/// Pagination filter for endpoints that support offset (`page`/`per_page`/
/// `include_totals`) or checkpoint (`from`/`take`) pagination.
///
/// If `from` or `take` is set, the API disregards any offset parameters.
#[derive(Debug, Clone, Default)]
pub struct PageFilter {
    params: Vec<(String, QueryValue)>,
}

impl PageFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select an offset page: the page number (zero-based) and the amount of
    /// items per page.
    #[must_use]
    pub fn with_page(mut self, page_number: u32, per_page: u32) -> Self {
        set_param(&mut self.params, "page", page_number.into());
        set_param(&mut self.params, "per_page", per_page.into());
        self
    }

    /// Ask the server to include the query summary (`start`/`limit`/`total`)
    /// in the response.
    #[must_use]
    pub fn with_totals(mut self, include_totals: bool) -> Self {
        set_param(&mut self.params, "include_totals", include_totals.into());
        self
    }

    /// Start checkpoint selection from an opaque cursor, as returned in the
    /// `next` field of a previous page.
    #[must_use]
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        set_param(&mut self.params, "from", QueryValue::Str(from.into()));
        self
    }

    /// Amount of entries per checkpoint page.
    #[must_use]
    pub fn with_take(mut self, take: u32) -> Self {
        set_param(&mut self.params, "take", take.into());
        self
    }

    #[must_use]
    pub fn params(&self) -> &[(String, QueryValue)] {
        &self.params
    }
}

/// Field-selection filter (`fields` + `include_fields`).
#[derive(Debug, Clone, Default)]
pub struct FieldsFilter {
    params: Vec<(String, QueryValue)>,
}

impl FieldsFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the fields of the result. `include_fields` selects whether
    /// the comma-separated list is an allow-list (`true`) or a deny-list.
    #[must_use]
    pub fn with_fields(mut self, fields: impl Into<String>, include_fields: bool) -> Self {
        set_param(&mut self.params, "fields", QueryValue::Str(fields.into()));
        set_param(&mut self.params, "include_fields", include_fields.into());
        self
    }

    #[must_use]
    pub fn params(&self) -> &[(String, QueryValue)] {
        &self.params
    }
}

/// Filter for endpoints that accept a free-text query, sorting, field
/// selection, and offset pagination (e.g. user search).
#[derive(Debug, Clone, Default)]
pub struct QueryFilter {
    params: Vec<(String, QueryValue)>,
}

impl QueryFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by a query expression in the service's Lucene-like syntax.
    /// The value is stored raw and percent-encoded once at URL build time.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        set_param(&mut self.params, "q", QueryValue::Str(query.into()));
        self
    }

    /// Sort the result. Use `field:order` where order is `1` for ascending
    /// and `-1` for descending.
    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        set_param(&mut self.params, "sort", QueryValue::Str(sort.into()));
        self
    }

    #[must_use]
    pub fn with_page(mut self, page_number: u32, per_page: u32) -> Self {
        set_param(&mut self.params, "page", page_number.into());
        set_param(&mut self.params, "per_page", per_page.into());
        self
    }

    #[must_use]
    pub fn with_totals(mut self, include_totals: bool) -> Self {
        set_param(&mut self.params, "include_totals", include_totals.into());
        self
    }

    #[must_use]
    pub fn with_fields(mut self, fields: impl Into<String>, include_fields: bool) -> Self {
        set_param(&mut self.params, "fields", QueryValue::Str(fields.into()));
        set_param(&mut self.params, "include_fields", include_fields.into());
        self
    }

    #[must_use]
    pub fn params(&self) -> &[(String, QueryValue)] {
        &self.params
    }
}

/// Filter for listing actions.
#[derive(Debug, Clone, Default)]
pub struct ActionFilter {
    params: Vec<(String, QueryValue)>,
}

impl ActionFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only actions attached to the given trigger.
    #[must_use]
    pub fn with_trigger(mut self, trigger_id: impl Into<String>) -> Self {
        set_param(
            &mut self.params,
            "triggerId",
            QueryValue::Str(trigger_id.into()),
        );
        self
    }

    /// Only the action with this name.
    #[must_use]
    pub fn with_name(mut self, action_name: impl Into<String>) -> Self {
        set_param(
            &mut self.params,
            "actionName",
            QueryValue::Str(action_name.into()),
        );
        self
    }

    #[must_use]
    pub fn with_page(mut self, page_number: u32, per_page: u32) -> Self {
        set_param(&mut self.params, "page", page_number.into());
        set_param(&mut self.params, "per_page", per_page.into());
        self
    }

    #[must_use]
    pub fn params(&self) -> &[(String, QueryValue)] {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get<'a>(params: &'a [(String, QueryValue)], name: &str) -> Option<&'a QueryValue> {
        params.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    #[test]
    fn test_page_filter_offset_parameters() {
        let filter = PageFilter::new().with_page(2, 25).with_totals(true);
        let params = filter.params();
        assert_eq!(get(params, "page"), Some(&QueryValue::Int(2)));
        assert_eq!(get(params, "per_page"), Some(&QueryValue::Int(25)));
        assert_eq!(get(params, "include_totals"), Some(&QueryValue::Bool(true)));
    }

    #[test]
    fn test_page_filter_checkpoint_parameters() {
        let filter = PageFilter::new().with_from("cursor-1").with_take(50);
        let params = filter.params();
        assert_eq!(
            get(params, "from"),
            Some(&QueryValue::Str("cursor-1".to_string()))
        );
        assert_eq!(get(params, "take"), Some(&QueryValue::Int(50)));
        assert_eq!(get(params, "page"), None);
    }

    #[test]
    fn test_setting_twice_replaces_in_place() {
        let filter = PageFilter::new().with_page(0, 10).with_page(3, 10);
        let params = filter.params();
        assert_eq!(params.len(), 2);
        assert_eq!(params[0], ("page".to_string(), QueryValue::Int(3)));
    }

    #[test]
    fn test_query_filter_collects_all_parameters() {
        let filter = QueryFilter::new()
            .with_query("email:\"jane@acme.test\"")
            .with_sort("created_at:1")
            .with_fields("user_id,email", true)
            .with_page(0, 50)
            .with_totals(true);

        let params = filter.params();
        assert_eq!(
            get(params, "q"),
            Some(&QueryValue::Str("email:\"jane@acme.test\"".to_string()))
        );
        assert_eq!(
            get(params, "sort"),
            Some(&QueryValue::Str("created_at:1".to_string()))
        );
        assert_eq!(get(params, "include_fields"), Some(&QueryValue::Bool(true)));
        assert_eq!(get(params, "per_page"), Some(&QueryValue::Int(50)));
    }

    #[test]
    fn test_fields_filter_deny_list() {
        let filter = FieldsFilter::new().with_fields("identities", false);
        assert_eq!(
            get(filter.params(), "include_fields"),
            Some(&QueryValue::Bool(false))
        );
    }

    #[test]
    fn test_action_filter_uses_camel_case_wire_names() {
        let filter = ActionFilter::new()
            .with_trigger("post-login")
            .with_name("enrich-profile");
        let params = filter.params();
        assert_eq!(
            get(params, "triggerId"),
            Some(&QueryValue::Str("post-login".to_string()))
        );
        assert_eq!(
            get(params, "actionName"),
            Some(&QueryValue::Str("enrich-profile".to_string()))
        );
    }

    #[test]
    fn test_empty_filter_has_no_parameters() {
        assert!(PageFilter::new().params().is_empty());
        assert!(QueryFilter::new().params().is_empty());
    }
}
