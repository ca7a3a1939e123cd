//! Link building for paginated index pages.
//!
//! Search and trending pages are server-rendered; the client only computes
//! where the next/previous links point, carrying the query, page number and
//! selected category. Pages are 1-based and the server supplies a `more`
//! flag for the current result set.

use url::form_urlencoded;

/// Detail-page path for an index entry.
pub fn file_url(txid: &str) -> String {
    format!("/file/{}", txid)
}

/// Pagination state rendered into a server page.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    /// Page path, e.g. `/search` or `/trending`.
    pub path: String,
    /// Current page, 1-based.
    pub page: u32,
    /// Whether the server reported more results past this page.
    pub more: bool,
    /// Search query, for `/search` pages.
    pub query: Option<String>,
    /// Selected category, for `/trending` pages.
    pub category: Option<String>,
}

impl PageContext {
    pub fn new(path: impl Into<String>, page: u32, more: bool) -> Self {
        Self {
            path: path.into(),
            page,
            more,
            query: None,
            category: None,
        }
    }

    /// Carry a search query in the built links.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Carry a category filter in the built links.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    fn url_for(&self, page: u32) -> String {
        let mut params = form_urlencoded::Serializer::new(String::new());
        if let Some(ref query) = self.query {
            params.append_pair("query", query);
        }
        params.append_pair("page", &page.to_string());
        if let Some(ref category) = self.category {
            params.append_pair("category", category);
        }
        format!("{}?{}", self.path, params.finish())
    }

    /// URL of the next page, when the server reported more results.
    pub fn next_url(&self) -> Option<String> {
        self.more.then(|| self.url_for(self.page + 1))
    }

    /// URL of the previous page. There is no page 0.
    pub fn prev_url(&self) -> Option<String> {
        (self.page > 1).then(|| self.url_for(self.page - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_links() {
        let ctx = PageContext::new("/search", 2, true).with_query("open bazaar");
        assert_eq!(
            ctx.next_url().as_deref(),
            Some("/search?query=open+bazaar&page=3")
        );
        assert_eq!(
            ctx.prev_url().as_deref(),
            Some("/search?query=open+bazaar&page=1")
        );
    }

    #[test]
    fn test_first_page_has_no_previous() {
        let ctx = PageContext::new("/search", 1, true).with_query("q");
        assert_eq!(ctx.prev_url(), None);
        assert!(ctx.next_url().is_some());
    }

    #[test]
    fn test_no_next_without_more() {
        let ctx = PageContext::new("/trending", 3, false);
        assert_eq!(ctx.next_url(), None);
        assert_eq!(ctx.prev_url().as_deref(), Some("/trending?page=2"));
    }

    #[test]
    fn test_category_links() {
        let ctx = PageContext::new("/trending", 1, true).with_category("Video");
        assert_eq!(
            ctx.next_url().as_deref(),
            Some("/trending?page=2&category=Video")
        );
    }

    #[test]
    fn test_file_url() {
        assert_eq!(file_url("abc123"), "/file/abc123");
    }
}
