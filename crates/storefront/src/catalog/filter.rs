//! Catalog visibility filtering.
//!
//! A product is visible when it matches the brand, price range and search
//! text together. A category is visible when any of its products is.
//! Every criteria change re-evaluates the whole catalog.

use core::convert::Infallible;
use core::str::FromStr;

use caseback_core::{ProductId, parse_price_text};
use rust_decimal::Decimal;
use thiserror::Error;

use super::{Catalog, Product};

/// Filter parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("Invalid price bound: {0:?}")]
    InvalidBound(String),
    #[error("Price range minimum {min} exceeds maximum {max}")]
    InvertedRange { min: Decimal, max: Decimal },
}

/// Brand selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BrandFilter {
    /// Wildcard.
    #[default]
    All,
    /// Category labels containing this text, case-insensitively.
    Named(String),
}

impl BrandFilter {
    /// Parse a brand selector value. `"all"` and empty input are wildcards.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Named(s.to_string())
        }
    }
}

impl FromStr for BrandFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Price range selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriceRange {
    /// Wildcard.
    #[default]
    All,
    /// `min <= price`, and `price <= max` when a maximum is set.
    Between { min: Decimal, max: Option<Decimal> },
}

impl PriceRange {
    /// Closed range `[min, max]`.
    #[must_use]
    pub const fn between(min: Decimal, max: Decimal) -> Self {
        Self::Between {
            min,
            max: Some(max),
        }
    }

    /// Open-ended range `[min, ∞)`.
    #[must_use]
    pub const fn at_least(min: Decimal) -> Self {
        Self::Between { min, max: None }
    }

    /// Whether a price falls inside the range.
    #[must_use]
    pub fn contains(&self, price: Decimal) -> bool {
        match *self {
            Self::All => true,
            Self::Between { min, max: Some(max) } => min <= price && price <= max,
            Self::Between { min, max: None } => price >= min,
        }
    }
}

impl FromStr for PriceRange {
    type Err = FilterError;

    /// Parse a price selector value.
    ///
    /// Accepts `"all"` (or empty), `"min-max"`, `"-max"` (from zero), and
    /// open-ended `"min"`, `"min-"` or `"min+"`. Bounds may carry currency
    /// symbols and thousands separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }

        let (min_text, max_text) = match s.split_once('-') {
            Some((min, max)) => (min, Some(max.trim())),
            None => (s.strip_suffix('+').unwrap_or(s), None),
        };

        let max = match max_text {
            None | Some("") => None,
            Some(text) => Some(parse_bound(text)?),
        };
        // "-6000" reads as "up to 6000"
        let min = match (min_text.trim(), max) {
            ("", Some(_)) => Decimal::ZERO,
            _ => parse_bound(min_text)?,
        };

        match max {
            Some(max) if max < min => Err(FilterError::InvertedRange { min, max }),
            _ => Ok(Self::Between { min, max }),
        }
    }
}

fn parse_bound(text: &str) -> Result<Decimal, FilterError> {
    parse_price_text(text).map_err(|_| FilterError::InvalidBound(text.trim().to_string()))
}

/// Combined filter criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search_text: String,
    pub brand: BrandFilter,
    pub price_range: PriceRange,
}

impl FilterCriteria {
    /// Build criteria from the three raw filter control values.
    ///
    /// # Errors
    ///
    /// Returns an error if the price range cannot be parsed.
    pub fn parse(search_text: &str, brand: &str, price_range: &str) -> Result<Self, FilterError> {
        Ok(Self {
            search_text: search_text.to_string(),
            brand: BrandFilter::parse(brand),
            price_range: price_range.parse()?,
        })
    }

    /// Criteria for the header search box: trimmed text, no brand or price filter.
    #[must_use]
    pub fn search_only(text: &str) -> Self {
        Self {
            search_text: text.trim().to_string(),
            ..Self::default()
        }
    }

    /// Whether every product passes.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.search_text.is_empty()
            && self.brand == BrandFilter::All
            && self.price_range == PriceRange::All
    }

    /// Prepare the per-product predicate.
    #[must_use]
    pub fn predicate(&self) -> ProductPredicate<'_> {
        ProductPredicate {
            needle: self.search_text.to_lowercase(),
            brand: match &self.brand {
                BrandFilter::All => None,
                BrandFilter::Named(brand) => Some(brand.to_lowercase()),
            },
            price_range: &self.price_range,
        }
    }

    /// Whether a single product matches.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.predicate().matches(product)
    }
}

/// Case-folded form of [`FilterCriteria`], reused across a catalog pass.
#[derive(Debug, Clone)]
pub struct ProductPredicate<'a> {
    needle: String,
    brand: Option<String>,
    price_range: &'a PriceRange,
}

impl ProductPredicate<'_> {
    /// Brand, price and search must all match.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.brand_matches(product)
            && self.price_range.contains(product.price)
            && self.search_matches(product)
    }

    fn brand_matches(&self, product: &Product) -> bool {
        self.brand
            .as_deref()
            .is_none_or(|brand| product.category_label.to_lowercase().contains(brand))
    }

    fn search_matches(&self, product: &Product) -> bool {
        self.needle.is_empty() || product.name.to_lowercase().contains(&self.needle)
    }
}

// =============================================================================
// Visibility
// =============================================================================

/// Visibility of one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductVisibility {
    pub id: ProductId,
    pub visible: bool,
}

/// Visibility of one category and its products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryVisibility {
    pub label: String,
    /// True when any product in the category is visible.
    pub visible: bool,
    pub products: Vec<ProductVisibility>,
}

/// Visibility of a whole catalog, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogVisibility {
    pub categories: Vec<CategoryVisibility>,
}

impl CatalogVisibility {
    /// Visibility of a product, `None` if it is not in the catalog.
    #[must_use]
    pub fn is_product_visible(&self, id: &ProductId) -> Option<bool> {
        self.categories
            .iter()
            .flat_map(|c| c.products.iter())
            .find(|p| &p.id == id)
            .map(|p| p.visible)
    }

    /// Visibility of a category, `None` if no category has this label.
    #[must_use]
    pub fn is_category_visible(&self, label: &str) -> Option<bool> {
        self.categories
            .iter()
            .find(|c| c.label == label)
            .map(|c| c.visible)
    }

    /// Ids of visible products, in catalog order.
    pub fn visible_products(&self) -> impl Iterator<Item = &ProductId> {
        self.categories
            .iter()
            .flat_map(|c| c.products.iter())
            .filter(|p| p.visible)
            .map(|p| &p.id)
    }

    /// Number of visible products.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible_products().count()
    }
}

/// Evaluate the criteria against every product in the catalog.
#[must_use]
pub fn compute_visibility(catalog: &Catalog, criteria: &FilterCriteria) -> CatalogVisibility {
    let predicate = criteria.predicate();

    let categories = catalog
        .categories()
        .iter()
        .map(|category| {
            let products: Vec<ProductVisibility> = category
                .products()
                .iter()
                .map(|product| ProductVisibility {
                    id: product.id.clone(),
                    visible: predicate.matches(product),
                })
                .collect();

            CategoryVisibility {
                label: category.label().to_string(),
                visible: products.iter().any(|p| p.visible),
                products,
            }
        })
        .collect();

    CatalogVisibility { categories }
}

/// Evaluate the header search box text against every product name.
#[must_use]
pub fn search_visibility(catalog: &Catalog, text: &str) -> CatalogVisibility {
    compute_visibility(catalog, &FilterCriteria::search_only(text))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use rust_decimal_macros::dec;

    fn watches() -> Catalog {
        let rolex = Category::new("Rolex")
            .with_product(Product::new("sub", "Submariner", dec!(9000), "", "Rolex"))
            .with_product(Product::new("day", "Daytona", dec!(14000), "", "Rolex"));
        let omega = Category::new("Omega")
            .with_product(Product::new("sea", "Seamaster", dec!(5000), "", "Omega"));
        Catalog::from_categories([rolex, omega]).unwrap()
    }

    fn visible_ids(visibility: &CatalogVisibility) -> Vec<&str> {
        visibility.visible_products().map(ProductId::as_str).collect()
    }

    #[test]
    fn test_price_range_parse() {
        assert_eq!("all".parse::<PriceRange>().unwrap(), PriceRange::All);
        assert_eq!("ALL".parse::<PriceRange>().unwrap(), PriceRange::All);
        assert_eq!("".parse::<PriceRange>().unwrap(), PriceRange::All);
        assert_eq!(
            "5000-10000".parse::<PriceRange>().unwrap(),
            PriceRange::between(dec!(5000), dec!(10000))
        );
        assert_eq!(
            "20000".parse::<PriceRange>().unwrap(),
            PriceRange::at_least(dec!(20000))
        );
        assert_eq!(
            "20000-".parse::<PriceRange>().unwrap(),
            PriceRange::at_least(dec!(20000))
        );
        assert_eq!(
            "20000+".parse::<PriceRange>().unwrap(),
            PriceRange::at_least(dec!(20000))
        );
        assert_eq!(
            "$5,000 - $10,000".parse::<PriceRange>().unwrap(),
            PriceRange::between(dec!(5000), dec!(10000))
        );
    }

    #[test]
    fn test_price_range_parse_errors() {
        assert_eq!(
            "cheap".parse::<PriceRange>(),
            Err(FilterError::InvalidBound("cheap".to_string()))
        );
        assert_eq!(
            "10000-5000".parse::<PriceRange>(),
            Err(FilterError::InvertedRange {
                min: dec!(10000),
                max: dec!(5000)
            })
        );
        assert_eq!(
            "-".parse::<PriceRange>(),
            Err(FilterError::InvalidBound(String::new()))
        );
    }

    #[test]
    fn test_price_range_without_minimum_starts_at_zero() {
        assert_eq!(
            "-6000".parse::<PriceRange>().unwrap(),
            PriceRange::between(Decimal::ZERO, dec!(6000))
        );
        assert_eq!(
            " - $6,000".parse::<PriceRange>().unwrap(),
            PriceRange::between(Decimal::ZERO, dec!(6000))
        );
        assert!(PriceRange::between(Decimal::ZERO, dec!(6000)).contains(dec!(0)));
    }

    #[test]
    fn test_price_range_contains_is_inclusive() {
        let range = PriceRange::between(dec!(5000), dec!(10000));
        assert!(range.contains(dec!(5000)));
        assert!(range.contains(dec!(10000)));
        assert!(!range.contains(dec!(10000.01)));
        assert!(!range.contains(dec!(4999.99)));
        assert!(PriceRange::at_least(dec!(5000)).contains(dec!(1000000)));
        assert!(PriceRange::All.contains(dec!(0)));
    }

    #[test]
    fn test_brand_parse() {
        assert_eq!(BrandFilter::parse("all"), BrandFilter::All);
        assert_eq!(BrandFilter::parse("All"), BrandFilter::All);
        assert_eq!(BrandFilter::parse(""), BrandFilter::All);
        assert_eq!(
            "rolex".parse::<BrandFilter>().unwrap(),
            BrandFilter::Named("rolex".to_string())
        );
    }

    #[test]
    fn test_brand_is_case_insensitive_substring_of_label() {
        let product = Product::new("1", "Submariner", dec!(9000), "", "Rolex Watches");
        let criteria = FilterCriteria::parse("", "ROLEX", "all").unwrap();
        assert!(criteria.matches(&product));
        let criteria = FilterCriteria::parse("", "omega", "all").unwrap();
        assert!(!criteria.matches(&product));
    }

    #[test]
    fn test_price_filter_scenario() {
        let criteria = FilterCriteria::parse("", "all", "5000-10000").unwrap();
        let visibility = compute_visibility(&watches(), &criteria);

        assert_eq!(visible_ids(&visibility), ["sub", "sea"]);
        assert_eq!(visibility.is_product_visible(&ProductId::new("day")), Some(false));
        assert_eq!(visibility.is_category_visible("Rolex"), Some(true));
        assert_eq!(visibility.is_category_visible("Omega"), Some(true));
    }

    #[test]
    fn test_search_scenario() {
        let visibility = search_visibility(&watches(), "sub");
        assert_eq!(visible_ids(&visibility), ["sub"]);
        assert_eq!(visibility.is_category_visible("Rolex"), Some(true));
        assert_eq!(visibility.is_category_visible("Omega"), Some(false));
    }

    #[test]
    fn test_search_box_trims_and_ignores_case() {
        let visibility = search_visibility(&watches(), "  SEA  ");
        assert_eq!(visible_ids(&visibility), ["sea"]);
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let visibility = search_visibility(&watches(), "");
        assert_eq!(visibility.visible_count(), 3);
        assert!(FilterCriteria::search_only("   ").is_unfiltered());
    }

    #[test]
    fn test_all_filters_combine() {
        let criteria = FilterCriteria::parse("a", "rolex", "10000+").unwrap();
        let visibility = compute_visibility(&watches(), &criteria);
        assert_eq!(visible_ids(&visibility), ["day"]);
        assert_eq!(visibility.is_category_visible("Omega"), Some(false));
    }

    #[test]
    fn test_no_matches_hides_every_category() {
        let criteria = FilterCriteria::parse("speedmaster", "all", "all").unwrap();
        let visibility = compute_visibility(&watches(), &criteria);
        assert_eq!(visibility.visible_count(), 0);
        assert!(visibility.categories.iter().all(|c| !c.visible));
    }

    #[test]
    fn test_empty_category_is_hidden() {
        let catalog = Catalog::from_categories([Category::new("Tudor")]).unwrap();
        let visibility = compute_visibility(&catalog, &FilterCriteria::default());
        assert_eq!(visibility.is_category_visible("Tudor"), Some(false));
    }

    #[test]
    fn test_unknown_lookups() {
        let visibility = compute_visibility(&watches(), &FilterCriteria::default());
        assert_eq!(visibility.is_product_visible(&ProductId::new("nope")), None);
        assert_eq!(visibility.is_category_visible("Tudor"), None);
    }

    #[test]
    fn test_general_filter_does_not_trim_search() {
        let criteria = FilterCriteria::parse(" sub", "all", "all").unwrap();
        let visibility = compute_visibility(&watches(), &criteria);
        assert_eq!(visibility.visible_count(), 0);
    }
}
