//! # Product Commands
//!
//! Browsing the catalog: the product list, its search box, its offer
//! dropdown, and its pager.
//!
//! ## Product List Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product List                                         │
//! │                                                                         │
//! │  search <term> ──┐                                                     │
//! │  filter <kind> ──┼──► CatalogState.query ──► filter ──► paginate       │
//! │  list [page]   ──┘                                         │            │
//! │                                                            ▼            │
//! │                                              ProductPageResponse        │
//! │                                              ┌──────────────────────┐   │
//! │                                              │ cards (≤ page_size)  │   │
//! │                                              │ page 2 of 3          │   │
//! │                                              └──────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;

use storefront_core::validation::{validate_product_id, validate_search_query};
use storefront_core::{CatalogEntry, CoreError, Money, Offer, OfferFilter, Page};

use crate::error::ApiError;
use crate::state::CatalogState;

/// A product as shown on its card.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub price: Money,
    pub photo_url: String,
    pub rating: f64,
    pub offer: Option<Offer>,
    /// Badge text, e.g. "Flat ₹20.00 off"
    pub offer_badge: Option<String>,
}

impl From<&CatalogEntry> for ProductCard {
    fn from(entry: &CatalogEntry) -> Self {
        ProductCard {
            id: entry.product.id.clone(),
            name: entry.product.name.clone(),
            price: entry.product.price(),
            photo_url: entry.product.photo_url.clone(),
            rating: entry.product.rating,
            offer: entry.offer.clone(),
            offer_badge: entry.offer.as_ref().map(ToString::to_string),
        }
    }
}

/// One page of the product list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPageResponse {
    pub items: Vec<ProductCard>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// Target of the "previous" button, absent on the first page.
    pub prev_page: Option<usize>,
    /// Target of the "next" button, absent on the last page.
    pub next_page: Option<usize>,
    pub search_term: String,
    pub offer_filter: OfferFilter,
}

impl ProductPageResponse {
    fn build(page: Page<&CatalogEntry>, search_term: String, offer_filter: OfferFilter) -> Self {
        let prev_page = page.has_prev().then(|| page.prev_page());
        let next_page = page.has_next().then(|| page.next_page());
        ProductPageResponse {
            prev_page,
            next_page,
            items: page.items.into_iter().map(ProductCard::from).collect(),
            current_page: page.current_page,
            total_pages: page.total_pages,
            total_items: page.total_items,
            search_term,
            offer_filter,
        }
    }
}

fn current_page(catalog: &mut CatalogState) -> ProductPageResponse {
    let search_term = catalog.query().search_term.clone();
    let offer_filter = catalog.query().offer_filter;
    let page = catalog.current_page();
    ProductPageResponse::build(page, search_term, offer_filter)
}

/// Shows a page of the product list under the current search and filter.
///
/// `page` is 1-based; `None` keeps the current page. Out-of-range pages are
/// clamped.
pub fn list_products(catalog: &mut CatalogState, page: Option<usize>) -> ProductPageResponse {
    debug!(?page, "list_products command");
    if let Some(page) = page {
        catalog.set_page(page);
    }
    current_page(catalog)
}

/// Sets the search term and shows the first page of matches.
///
/// An empty term clears the search.
pub fn search_products(catalog: &mut CatalogState, term: &str) -> Result<ProductPageResponse, ApiError> {
    let term = validate_search_query(term)?;
    debug!(term = %term, "search_products command");

    catalog.set_search_term(term);
    Ok(current_page(catalog))
}

/// Sets the offer dropdown (`all`, `flat`, `percentage`, `free`,
/// `no-offers`) and shows the first page.
pub fn filter_products(catalog: &mut CatalogState, filter: &str) -> Result<ProductPageResponse, ApiError> {
    let filter: OfferFilter = filter.parse()?;
    debug!(filter = %filter, "filter_products command");

    catalog.set_offer_filter(filter);
    Ok(current_page(catalog))
}

/// Gets a single product card by id.
pub fn get_product_by_id(catalog: &CatalogState, id: &str) -> Result<ProductCard, ApiError> {
    debug!(id = %id, "get_product_by_id command");
    validate_product_id(id)?;

    catalog
        .catalog()
        .find(id.trim())
        .map(ProductCard::from)
        .ok_or_else(|| CoreError::ProductNotFound(id.trim().to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use storefront_core::{Catalog, Product};

    fn catalog_state() -> CatalogState {
        let names = [
            "Rose Water",
            "Face Wash",
            "Vitamin C Serum",
            "Aloe Gel",
            "Night Cream",
            "Sunscreen",
            "Lip Balm",
        ];
        let products = names
            .iter()
            .enumerate()
            .map(|(i, name)| Product {
                id: format!("p{}", i + 1),
                name: name.to_string(),
                price_paise: 10_000 + i as i64 * 1_000,
                photo_url: format!("https://cdn/p{}.png", i + 1),
                rating: 4.0,
            })
            .collect();
        let offers = vec![
            Offer::flat("p2", Money::from_rupees(20)),
            Offer::percentage("p3", 10),
            Offer::buy_one_get_one("p4"),
        ];
        CatalogState::new(Catalog::new(products, offers), 6)
    }

    #[test]
    fn test_list_first_and_last_page() {
        let mut catalog = catalog_state();
        let page = list_products(&mut catalog, None);
        assert_eq!(page.items.len(), 6);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.next_page, Some(2));
        assert_eq!(page.prev_page, None);

        let page = list_products(&mut catalog, Some(2));
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Lip Balm");
        assert_eq!(page.next_page, None);
        assert_eq!(page.prev_page, Some(1));
    }

    #[test]
    fn test_cards_carry_badges() {
        let mut catalog = catalog_state();
        let page = list_products(&mut catalog, Some(1));
        let badges: Vec<_> = page.items.iter().map(|c| c.offer_badge.clone()).collect();
        assert_eq!(badges[0], None);
        assert_eq!(badges[1].as_deref(), Some("Flat ₹20.00 off"));
        assert_eq!(badges[2].as_deref(), Some("10% off"));
        assert_eq!(badges[3].as_deref(), Some("Buy 1 Get 1"));
    }

    #[test]
    fn test_search_by_offer_kind_name() {
        let mut catalog = catalog_state();
        let page = search_products(&mut catalog, "  FREE ").unwrap();
        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].id, "p4");
        assert_eq!(page.search_term, "FREE");

        let page = search_products(&mut catalog, "").unwrap();
        assert_eq!(page.total_items, 7);
    }

    #[test]
    fn test_search_too_long() {
        let mut catalog = catalog_state();
        let err = search_products(&mut catalog, &"x".repeat(200)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_filter_products() {
        let mut catalog = catalog_state();
        let page = filter_products(&mut catalog, "no-offers").unwrap();
        assert_eq!(page.total_items, 4);
        assert!(page.items.iter().all(|c| c.offer.is_none()));

        let page = filter_products(&mut catalog, "flat").unwrap();
        assert_eq!(page.total_items, 1);

        let err = filter_products(&mut catalog, "bundle").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_search_and_filter_combine() {
        let mut catalog = catalog_state();
        filter_products(&mut catalog, "no-offers").unwrap();
        let page = search_products(&mut catalog, "wash").unwrap();
        assert_eq!(page.total_items, 0);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.current_page, 1);
        assert_eq!((page.prev_page, page.next_page), (None, None));
    }

    #[test]
    fn test_get_product_by_id() {
        let catalog = catalog_state();
        assert_eq!(get_product_by_id(&catalog, "p3").unwrap().name, "Vitamin C Serum");

        let err = get_product_by_id(&catalog, "p99").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
