//! # Catalog View
//!
//! Joins products with their offers and answers the product list's queries:
//! search term, offer-type filter, pagination.
//!
//! ## Query Pipeline
//! ```text
//! products ──┐
//!            ├──► Catalog::new ──► entries ──► filter(query) ──► paginate(page)
//! offers ────┘   (first offer                  (term AND           (1-based,
//!                 per product)                  offer filter)       clamped)
//! ```

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::{Offer, OfferKind, Product};

// =============================================================================
// Catalog Entry
// =============================================================================

/// A product together with the offer resolved for it.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct CatalogEntry {
    pub product: Product,
    pub offer: Option<Offer>,
}

impl CatalogEntry {
    fn matches_term(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        self.product.name.to_lowercase().contains(term)
            || self
                .offer
                .as_ref()
                .is_some_and(|o| o.kind.as_str().contains(term))
    }
}

// =============================================================================
// Offer Filter
// =============================================================================

/// The offer-type dropdown of the product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum OfferFilter {
    #[default]
    All,
    Kind(OfferKind),
    NoOffers,
}

impl OfferFilter {
    pub fn accepts(&self, offer: Option<&Offer>) -> bool {
        match (self, offer) {
            (OfferFilter::All, _) => true,
            (OfferFilter::Kind(kind), Some(offer)) => offer.kind == *kind,
            (OfferFilter::Kind(_), None) => false,
            (OfferFilter::NoOffers, offer) => offer.is_none(),
        }
    }
}

impl fmt::Display for OfferFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OfferFilter::All => f.write_str("all"),
            OfferFilter::Kind(kind) => write!(f, "{}", kind),
            OfferFilter::NoOffers => f.write_str("no-offers"),
        }
    }
}

impl FromStr for OfferFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(OfferFilter::All),
            "no-offers" => Ok(OfferFilter::NoOffers),
            other => other.parse::<OfferKind>().map(OfferFilter::Kind).map_err(|_| {
                ValidationError::NotAllowed {
                    field: "offer filter".to_string(),
                    allowed: vec![
                        "all".to_string(),
                        "flat".to_string(),
                        "percentage".to_string(),
                        "free".to_string(),
                        "no-offers".to_string(),
                    ],
                }
            }),
        }
    }
}

/// Search box text plus the offer dropdown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub search_term: String,
    pub offer_filter: OfferFilter,
}

// =============================================================================
// Catalog
// =============================================================================

/// Products merged with offers, in catalog order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Resolves each product's offer. When several offers name the same
    /// product, the first one wins.
    pub fn new(products: Vec<Product>, offers: Vec<Offer>) -> Self {
        let entries = products
            .into_iter()
            .map(|product| {
                let offer = offers.iter().find(|o| o.product_id == product.id).cloned();
                CatalogEntry { product, offer }
            })
            .collect();
        Catalog { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, product_id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.product.id == product_id)
    }

    /// Entries matching the search term (name or offer kind, case
    /// insensitive) and the offer filter.
    pub fn filter(&self, query: &CatalogQuery) -> Vec<&CatalogEntry> {
        let term = query.search_term.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.matches_term(&term) && query.offer_filter.accepts(e.offer.as_ref()))
            .collect()
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based.
    pub current_page: usize,
    /// Zero when there are no results.
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Page number behind the "previous" button.
    pub fn prev_page(&self) -> usize {
        self.current_page.saturating_sub(1).max(1)
    }

    /// Page number behind the "next" button.
    pub fn next_page(&self) -> usize {
        (self.current_page + 1).min(self.total_pages.max(1))
    }
}

/// Slices `items` into the requested 1-based page.
///
/// Out-of-range pages are clamped to the nearest valid page. A `per_page` of
/// zero is treated as one.
///
/// ```rust
/// use storefront_core::catalog::paginate;
///
/// let page = paginate((1..=14).collect::<Vec<_>>(), 3, 6);
/// assert_eq!(page.items, vec![13, 14]);
/// assert_eq!(page.total_pages, 3);
/// assert!(!page.has_next());
/// ```
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);
    let current_page = page.clamp(1, total_pages.max(1));

    let items = items
        .into_iter()
        .skip((current_page - 1) * per_page)
        .take(per_page)
        .collect();

    Page {
        items,
        current_page,
        total_pages,
        total_items,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
