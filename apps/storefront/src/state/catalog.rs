//! # Catalog State
//!
//! The loaded catalog plus the product list's view state: search box text,
//! offer dropdown, and current page.
//!
//! ```text
//! search / filter ──► query changes ──► page resets to 1
//! list <n>        ──► page = n (clamped when the page is built)
//! ```

use tracing::debug;

use storefront_core::{paginate, Catalog, CatalogEntry, CatalogQuery, OfferFilter, Page};

/// Catalog and browsing state for one session.
#[derive(Debug, Clone)]
pub struct CatalogState {
    catalog: Catalog,
    query: CatalogQuery,
    page: usize,
    page_size: usize,
}

impl CatalogState {
    pub fn new(catalog: Catalog, page_size: usize) -> Self {
        CatalogState {
            catalog,
            query: CatalogQuery::default(),
            page: 1,
            page_size,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Sets the search term. Expects an already validated, trimmed term.
    pub fn set_search_term(&mut self, term: String) {
        debug!(term = %term, "Search term changed");
        self.query.search_term = term;
        self.page = 1;
    }

    pub fn set_offer_filter(&mut self, filter: OfferFilter) {
        debug!(filter = %filter, "Offer filter changed");
        self.query.offer_filter = filter;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Builds the current page and remembers the clamped page number.
    pub fn current_page(&mut self) -> Page<&CatalogEntry> {
        let page = paginate(self.catalog.filter(&self.query), self.page, self.page_size);
        self.page = page.current_page;
        page
    }
}
