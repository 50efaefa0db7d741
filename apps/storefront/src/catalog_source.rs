//! # Catalog Source
//!
//! Loads the product and offer lists from the two JSON files the storefront
//! is pointed at, validates every record, and builds the core `Catalog`.
//!
//! ## Wire Shapes
//! ```text
//! products.json                           offers.json
//! ─────────────                           ───────────
//! [{                                      [{
//!   "_id": "p-101",                         "product": "p-101",
//!   "name": "Aloe Gel",                     "offerType": "percentage",
//!   "price": 199.5,      (rupees)           "discountValue": 12.5
//!   "photos": "https://...",              }]
//!   "rating": 4.4
//! }]
//! ```
//!
//! Amounts on the wire are decimal rupees. `discountValue` is rupees off each
//! unit for `flat`, a percent for `percentage`, and ignored for `free`. Both
//! are parsed as exact decimals and rounded once, half away from zero, to
//! paise or basis points.
//!
//! ## Load Flow
//! ```text
//! read file ──► serde_json ──► Vec<Record> ──► validate + convert ──► Catalog
//!    │               │                               │
//!    ▼               ▼                               ▼
//!  Read error    Parse error              InvalidProduct / InvalidOffer
//!                                         (record index in the message)
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use storefront_core::validation::{
    validate_discount_value, validate_price_paise, validate_product_id, validate_product_name,
};
use storefront_core::{Catalog, Money, Offer, OfferKind, Product, ValidationError};

// =============================================================================
// Errors
// =============================================================================

/// Errors raised while loading the catalog files.
#[derive(Debug, Error)]
pub enum CatalogSourceError {
    /// The file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not valid JSON of the expected shape.
    #[error("Malformed {file}: {source}")]
    Parse {
        file: &'static str,
        source: serde_json::Error,
    },

    /// A product record failed validation.
    #[error("Invalid product at index {index}: {source}")]
    InvalidProduct {
        index: usize,
        source: ValidationError,
    },

    /// An offer record failed validation.
    #[error("Invalid offer at index {index}: {source}")]
    InvalidOffer {
        index: usize,
        source: ValidationError,
    },
}

// =============================================================================
// Wire Records
// =============================================================================

/// Converts a decimal amount to hundredths (rupees → paise, percent → bps).
fn to_hundredths(field: &str, value: Decimal) -> Result<i64, ValidationError> {
    value
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|v| v.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|v| v.to_i64())
        .ok_or_else(|| ValidationError::OutOfRange {
            field: field.to_string(),
            min: i64::MIN / 100,
            max: i64::MAX / 100,
        })
}

/// One entry of `products.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    /// Unit price in rupees.
    pub price: Decimal,
    #[serde(default)]
    pub photos: String,
    #[serde(default)]
    pub rating: f64,
}

impl TryFrom<ProductRecord> for Product {
    type Error = ValidationError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        validate_product_id(&record.id)?;
        validate_product_name(&record.name)?;
        let price_paise = to_hundredths("price", record.price)?;
        validate_price_paise(price_paise)?;

        Ok(Product {
            id: record.id.trim().to_string(),
            name: record.name.trim().to_string(),
            price_paise,
            photo_url: record.photos,
            rating: record.rating,
        })
    }
}

/// One entry of `offers.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferRecord {
    pub product: String,
    pub offer_type: OfferKind,
    /// Rupees for `flat`, percent for `percentage`.
    #[serde(default)]
    pub discount_value: Decimal,
}

impl TryFrom<OfferRecord> for Offer {
    type Error = ValidationError;

    fn try_from(record: OfferRecord) -> Result<Self, Self::Error> {
        validate_product_id(&record.product)?;
        let product_id = record.product.trim().to_string();

        let offer = match record.offer_type {
            OfferKind::Flat => {
                let paise = to_hundredths("flat discount", record.discount_value)?;
                Offer::flat(product_id, Money::from_paise(paise))
            }
            OfferKind::Percentage => {
                let bps = to_hundredths("percentage discount", record.discount_value)?;
                Offer::percentage_bps(product_id, bps)
            }
            OfferKind::Free => Offer::buy_one_get_one(product_id),
        };
        validate_discount_value(offer.kind, offer.discount_value)?;

        Ok(offer)
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses and validates the contents of `products.json`.
pub fn parse_products(json: &str) -> Result<Vec<Product>, CatalogSourceError> {
    let records: Vec<ProductRecord> =
        serde_json::from_str(json).map_err(|source| CatalogSourceError::Parse {
            file: "products.json",
            source,
        })?;

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            Product::try_from(record)
                .map_err(|source| CatalogSourceError::InvalidProduct { index, source })
        })
        .collect()
}

/// Parses and validates the contents of `offers.json`.
pub fn parse_offers(json: &str) -> Result<Vec<Offer>, CatalogSourceError> {
    let records: Vec<OfferRecord> =
        serde_json::from_str(json).map_err(|source| CatalogSourceError::Parse {
            file: "offers.json",
            source,
        })?;

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            Offer::try_from(record)
                .map_err(|source| CatalogSourceError::InvalidOffer { index, source })
        })
        .collect()
}

// =============================================================================
// Loading
// =============================================================================

fn read(path: &Path) -> Result<String, CatalogSourceError> {
    std::fs::read_to_string(path).map_err(|source| CatalogSourceError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads both files and joins them into a catalog.
///
/// Offers naming a product that is not in the product list are kept out of
/// the catalog silently; the join only looks offers up by product.
pub fn load_catalog(products_path: &Path, offers_path: &Path) -> Result<Catalog, CatalogSourceError> {
    let products = parse_products(&read(products_path)?)?;
    let offers = parse_offers(&read(offers_path)?)?;

    debug!(
        products = products.len(),
        offers = offers.len(),
        "Catalog files parsed"
    );

    let catalog = Catalog::new(products, offers);
    let with_offers = catalog.entries().iter().filter(|e| e.offer.is_some()).count();
    info!(
        products = catalog.len(),
        with_offers,
        "Catalog loaded"
    );

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PRODUCTS: &str = r#"[
        {"_id": "p1", "name": "Rose Water", "price": 100, "photos": "https://cdn/p1.png", "rating": 4.1},
        {"_id": "p2", "name": "Face Wash", "price": 250, "photos": "https://cdn/p2.png", "rating": 3.9},
        {"_id": "p3", "name": "Aloe Gel", "price": 199}
    ]"#;

    const OFFERS: &str = r#"[
        {"product": "p1", "offerType": "percentage", "discountValue": 10},
        {"product": "p2", "offerType": "flat", "discountValue": 20},
        {"product": "p3", "offerType": "free"}
    ]"#;

    #[test]
    fn test_parse_products() {
        let products = parse_products(PRODUCTS).unwrap();
        assert_eq!(products.len(), 3);
        assert_eq!(products[0].id, "p1");
        assert_eq!(products[0].price(), Money::from_rupees(100));
        assert_eq!(products[0].photo_url, "https://cdn/p1.png");

        // Missing photos and rating fall back to defaults
        assert_eq!(products[2].photo_url, "");
        assert_eq!(products[2].rating, 0.0);
    }

    #[test]
    fn test_prices_are_rupees() {
        let json = r#"[
            {"_id": "a", "name": "Serum", "price": 49.99},
            {"_id": "b", "name": "Balm", "price": 499},
            {"_id": "c", "name": "Toner", "price": 0.005},
            {"_id": "d", "name": "Mist", "price": 12.344}
        ]"#;
        let paise: Vec<i64> = parse_products(json)
            .unwrap()
            .iter()
            .map(|p| p.price_paise)
            .collect();
        // 0.5 paisa rounds away from zero
        assert_eq!(paise, vec![4_999, 49_900, 1, 1_234]);
    }

    #[test]
    fn test_parse_offers_converts_units() {
        let offers = parse_offers(OFFERS).unwrap();
        assert_eq!(offers[0], Offer::percentage("p1", 10));
        assert_eq!(offers[0].discount_value, 1_000);
        assert_eq!(offers[1], Offer::flat("p2", Money::from_rupees(20)));
        assert_eq!(offers[1].to_string(), "Flat ₹20.00 off");
        assert_eq!(offers[2], Offer::buy_one_get_one("p3"));
    }

    #[test]
    fn test_fractional_discounts() {
        let json = r#"[
            {"product": "p1", "offerType": "percentage", "discountValue": 12.5},
            {"product": "p2", "offerType": "flat", "discountValue": 49.5}
        ]"#;
        let offers = parse_offers(json).unwrap();
        assert_eq!(offers[0], Offer::percentage_bps("p1", 1_250));
        assert_eq!(offers[0].to_string(), "12.5% off");
        assert_eq!(offers[1].flat_discount(), Money::from_paise(4_950));
    }

    #[test]
    fn test_invalid_records_report_index() {
        let json = r#"[
            {"_id": "ok", "name": "Fine", "price": 1},
            {"_id": "bad", "name": "Negative", "price": -5}
        ]"#;
        let err = parse_products(json).unwrap_err();
        assert!(matches!(err, CatalogSourceError::InvalidProduct { index: 1, .. }));

        let json = r#"[{"_id": "big", "name": "Too Big", "price": 1e20}]"#;
        let err = parse_products(json).unwrap_err();
        assert!(matches!(err, CatalogSourceError::InvalidProduct { index: 0, .. }));

        let json = r#"[{"product": "p1", "offerType": "percentage", "discountValue": 150}]"#;
        let err = parse_offers(json).unwrap_err();
        assert!(matches!(err, CatalogSourceError::InvalidOffer { index: 0, .. }));

        let json = r#"[{"product": "p1", "offerType": "flat", "discountValue": -1}]"#;
        assert!(parse_offers(json).is_err());
    }

    #[test]
    fn test_unknown_offer_type_is_a_parse_error() {
        let json = r#"[{"product": "p1", "offerType": "bundle", "discountValue": 1}]"#;
        let err = parse_offers(json).unwrap_err();
        assert!(matches!(err, CatalogSourceError::Parse { file: "offers.json", .. }));
    }

    #[test]
    fn test_load_catalog_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let products_path = dir.path().join("products.json");
        let offers_path = dir.path().join("offers.json");
        std::fs::File::create(&products_path)
            .unwrap()
            .write_all(PRODUCTS.as_bytes())
            .unwrap();
        std::fs::File::create(&offers_path)
            .unwrap()
            .write_all(OFFERS.as_bytes())
            .unwrap();

        let catalog = load_catalog(&products_path, &offers_path).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(
            catalog.find("p3").unwrap().offer,
            Some(Offer::buy_one_get_one("p3"))
        );
    }

    #[test]
    fn test_load_catalog_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let err = load_catalog(&missing, &missing).unwrap_err();
        assert!(matches!(err, CatalogSourceError::Read { .. }));
        assert!(err.to_string().contains("nope.json"));
    }
}
