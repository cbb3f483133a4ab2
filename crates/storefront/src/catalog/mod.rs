//! Product catalog supplied by the rendering layer.
//!
//! The catalog is read-only to the storefront: categories in display
//! order, each holding its products in display order. Product ids are
//! unique across the whole catalog.

mod filter;

use std::collections::HashSet;

use caseback_core::{PriceError, ProductId, parse_price_text};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::cart::AddToCart;

pub use filter::{
    BrandFilter, CatalogVisibility, CategoryVisibility, FilterCriteria, FilterError, PriceRange,
    ProductPredicate, ProductVisibility, compute_visibility, search_visibility,
};

/// Catalog construction errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid price for product {product_id}: {source}")]
    InvalidPrice {
        product_id: ProductId,
        #[source]
        source: PriceError,
    },
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(ProductId),
}

/// A product as rendered on the page, before its price text is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub price_text: String,
    pub image_url: String,
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub image_url: String,
    pub category_label: String,
}

impl Product {
    /// Create a product.
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Decimal,
        image_url: impl Into<String>,
        category_label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image_url: image_url.into(),
            category_label: category_label.into(),
        }
    }

    /// Convert a rendered product card, parsing its displayed price.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidPrice` if the price text is empty,
    /// not a number, or negative.
    pub fn from_card(card: ProductCard, category_label: &str) -> Result<Self, CatalogError> {
        let product_id = ProductId::new(card.id);
        let price = match parse_price_text(&card.price_text) {
            Ok(price) => price,
            Err(source) => {
                return Err(CatalogError::InvalidPrice { product_id, source });
            }
        };

        Ok(Self {
            id: product_id,
            name: card.name,
            price,
            image_url: card.image_url,
            category_label: category_label.to_string(),
        })
    }
}

impl From<&Product> for AddToCart {
    fn from(product: &Product) -> Self {
        Self::new(
            product.id.clone(),
            product.name.clone(),
            product.price,
            product.image_url.clone(),
        )
    }
}

/// A titled group of products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    label: String,
    products: Vec<Product>,
}

impl Category {
    /// Create an empty category.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            products: Vec::new(),
        }
    }

    /// Append a product.
    #[must_use]
    pub fn with_product(mut self, product: Product) -> Self {
        self.products.push(product);
        self
    }

    /// Append a rendered product card labelled with this category.
    ///
    /// # Errors
    ///
    /// Returns an error if the card's price text cannot be parsed.
    pub fn push_card(&mut self, card: ProductCard) -> Result<(), CatalogError> {
        let product = Product::from_card(card, &self.label)?;
        self.products.push(product);
        Ok(())
    }

    /// Category title.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Products in display order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

/// Ordered categories of products.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            categories: Vec::new(),
        }
    }

    /// Build a catalog, rejecting product ids that appear more than once.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateProduct` for the first repeated id.
    pub fn from_categories(
        categories: impl IntoIterator<Item = Category>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for category in categories {
            catalog.push_category(category)?;
        }
        Ok(catalog)
    }

    /// Append a category.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateProduct` if the category repeats an
    /// id already in the catalog or within itself.
    pub fn push_category(&mut self, category: Category) -> Result<(), CatalogError> {
        let mut seen: HashSet<&ProductId> = self.products().map(|p| &p.id).collect();
        for product in category.products() {
            if !seen.insert(&product.id) {
                return Err(CatalogError::DuplicateProduct(product.id.clone()));
            }
        }
        self.categories.push(category);
        Ok(())
    }

    /// Categories in display order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Every product, category by category.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.categories.iter().flat_map(|c| c.products.iter())
    }

    /// Look up a product by id.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products().find(|p| &p.id == id)
    }

    /// Number of products across all categories.
    #[must_use]
    pub fn product_count(&self) -> usize {
        self.categories.iter().map(|c| c.products.len()).sum()
    }
}
