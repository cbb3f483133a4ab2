//! Product and category visibility over the watch catalog.

#![allow(clippy::unwrap_used)]

use caseback_core::ProductId;
use caseback_integration_tests::watch_catalog;
use caseback_storefront::catalog::{
    Catalog, CatalogError, Category, FilterCriteria, FilterError, ProductCard, compute_visibility,
    search_visibility,
};
use rust_decimal_macros::dec;

fn visible(criteria: &FilterCriteria) -> Vec<String> {
    compute_visibility(&watch_catalog(), criteria)
        .visible_products()
        .map(ToString::to_string)
        .collect()
}

#[test]
fn test_fixture_prices_are_parsed() {
    let catalog = watch_catalog();
    assert_eq!(catalog.product_count(), 3);
    let daytona = catalog.product(&ProductId::new("rolex-daytona")).unwrap();
    assert_eq!(daytona.price, dec!(14000));
    assert_eq!(daytona.category_label, "Rolex");
}

#[test]
fn test_unfiltered_shows_everything() {
    let criteria = FilterCriteria::parse("", "all", "all").unwrap();
    assert!(criteria.is_unfiltered());
    assert_eq!(visible(&criteria).len(), 3);
}

#[test]
fn test_brand_and_price_range() {
    let criteria = FilterCriteria::parse("", "Rolex", "5000-10000").unwrap();
    let visibility = compute_visibility(&watch_catalog(), &criteria);

    assert_eq!(
        visibility.is_product_visible(&ProductId::new("rolex-submariner")),
        Some(true)
    );
    assert_eq!(
        visibility.is_product_visible(&ProductId::new("rolex-daytona")),
        Some(false)
    );
    assert_eq!(
        visibility.is_product_visible(&ProductId::new("omega-seamaster")),
        Some(false)
    );
    assert_eq!(visibility.is_category_visible("Rolex"), Some(true));
    assert_eq!(visibility.is_category_visible("Omega"), Some(false));
}

#[test]
fn test_search_hides_categories_without_matches() {
    let visibility = search_visibility(&watch_catalog(), "  sea ");

    assert_eq!(visibility.visible_count(), 1);
    assert_eq!(visibility.is_category_visible("Rolex"), Some(false));
    assert_eq!(visibility.is_category_visible("Omega"), Some(true));
}

#[test]
fn test_search_is_case_insensitive() {
    let criteria = FilterCriteria::parse("DAYTONA", "all", "").unwrap();
    assert_eq!(visible(&criteria), ["rolex-daytona"]);
}

#[test]
fn test_brand_is_case_insensitive_substring() {
    let criteria = FilterCriteria::parse("", "rol", "all").unwrap();
    assert_eq!(visible(&criteria), ["rolex-submariner", "rolex-daytona"]);
}

#[test]
fn test_open_ended_range() {
    let criteria = FilterCriteria::parse("", "all", "10000+").unwrap();
    assert_eq!(visible(&criteria), ["rolex-daytona"]);
}

#[test]
fn test_range_bounds_are_inclusive() {
    let criteria = FilterCriteria::parse("", "all", "5000-9000").unwrap();
    assert_eq!(visible(&criteria), ["rolex-submariner", "omega-seamaster"]);
}

#[test]
fn test_nothing_matches() {
    let criteria = FilterCriteria::parse("speedmaster", "Rolex", "all").unwrap();
    let visibility = compute_visibility(&watch_catalog(), &criteria);
    assert_eq!(visibility.visible_count(), 0);
    assert_eq!(visibility.is_category_visible("Rolex"), Some(false));
    assert_eq!(visibility.is_category_visible("Omega"), Some(false));
}

#[test]
fn test_unknown_ids_have_no_visibility() {
    let visibility = search_visibility(&watch_catalog(), "");
    assert_eq!(visibility.is_product_visible(&ProductId::new("tudor-bb58")), None);
    assert_eq!(visibility.is_category_visible("Tudor"), None);
}

#[test]
fn test_invalid_ranges_rejected() {
    assert!(matches!(
        FilterCriteria::parse("", "all", "cheap"),
        Err(FilterError::InvalidBound(_))
    ));
    assert!(matches!(
        FilterCriteria::parse("", "all", "10000-5000"),
        Err(FilterError::InvertedRange { .. })
    ));
}

#[test]
fn test_empty_category_is_hidden() {
    let mut catalog = watch_catalog();
    catalog.push_category(Category::new("Tudor")).unwrap();

    let visibility = search_visibility(&catalog, "");
    assert_eq!(visibility.is_category_visible("Tudor"), Some(false));
    assert_eq!(visibility.visible_count(), 3);
}

#[test]
fn test_bad_card_price_is_rejected() {
    let mut category = Category::new("Omega");
    let err = category
        .push_card(ProductCard {
            id: "omega-speedmaster".to_string(),
            name: "Speedmaster".to_string(),
            price_text: "call for price".to_string(),
            image_url: String::new(),
        })
        .unwrap_err();

    assert!(matches!(err, CatalogError::InvalidPrice { .. }));
    assert!(category.products().is_empty());
}

#[test]
fn test_duplicate_product_across_categories_rejected() {
    let mut catalog: Catalog = watch_catalog();
    let mut again = Category::new("Pre-owned");
    again
        .push_card(ProductCard {
            id: "rolex-daytona".to_string(),
            name: "Daytona".to_string(),
            price_text: "$12,500".to_string(),
            image_url: String::new(),
        })
        .unwrap();

    let err = catalog.push_category(again).unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateProduct(ref id) if id.as_str() == "rolex-daytona"));
    assert_eq!(catalog.product_count(), 3);
}

#[test]
fn test_price_band_across_brands() {
    let criteria = FilterCriteria::parse("", "all", "5000-10000").unwrap();
    let visibility = compute_visibility(&watch_catalog(), &criteria);

    assert_eq!(
        visibility.visible_products().map(ToString::to_string).collect::<Vec<_>>(),
        ["rolex-submariner", "omega-seamaster"]
    );
    assert_eq!(visibility.is_category_visible("Rolex"), Some(true));
    assert_eq!(visibility.is_category_visible("Omega"), Some(true));
    assert_eq!(
        visibility.is_product_visible(&ProductId::new("rolex-daytona")),
        Some(false)
    );
}

#[test]
fn test_header_search_for_submariner() {
    let visibility = search_visibility(&watch_catalog(), "sub");

    assert_eq!(
        visibility.visible_products().map(ToString::to_string).collect::<Vec<_>>(),
        ["rolex-submariner"]
    );
    assert_eq!(visibility.is_category_visible("Rolex"), Some(true));
    assert_eq!(visibility.is_category_visible("Omega"), Some(false));
}

#[test]
fn test_range_without_minimum() {
    let criteria = FilterCriteria::parse("", "all", "-6000").unwrap();
    let visibility = compute_visibility(&watch_catalog(), &criteria);

    assert_eq!(
        visibility.visible_products().map(ToString::to_string).collect::<Vec<_>>(),
        ["omega-seamaster"]
    );
    assert_eq!(visibility.is_category_visible("Rolex"), Some(false));
    assert_eq!(visibility.is_category_visible("Omega"), Some(true));
}
