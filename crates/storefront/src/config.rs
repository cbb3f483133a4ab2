//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//! - `CART_STORAGE_KEY` - Key the cart is persisted under (default: cartItems)
//! - `STOREFRONT_CURRENCY` - ISO 4217 code used for display (default: USD)
//! - `STOREFRONT_EMPTY_CART_MESSAGE` - Placeholder row for an empty cart
//! - `STOREFRONT_CHECKOUT_PATH` - Where a non-empty cart checks out (default: checkout.html)
//! - `STOREFRONT_SHOP_PATH` - Where an empty cart is sent instead (default: shop.html)
//! - `STOREFRONT_EMPTY_CHECKOUT_NOTICE` - Notice shown when checking out an empty cart

use caseback_core::CurrencyCode;
use thiserror::Error;

/// Default key the cart is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "cartItems";

const DEFAULT_EMPTY_CART_MESSAGE: &str = "Your cart is empty.";
const DEFAULT_CHECKOUT_PATH: &str = "checkout.html";
const DEFAULT_SHOP_PATH: &str = "shop.html";
const DEFAULT_EMPTY_CHECKOUT_NOTICE: &str = "Your cart is empty! Redirecting to product page...";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, Default)]
pub struct StorefrontConfig {
    /// Cart persistence settings
    pub cart: CartConfig,
    /// Price and placeholder display settings
    pub display: DisplayConfig,
    /// Checkout redirect settings
    pub checkout: CheckoutConfig,
}

/// Cart persistence configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Key the serialized cart is stored under
    pub storage_key: String,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

/// Display configuration for the cart view.
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    /// Currency used when formatting prices
    pub currency: CurrencyCode,
    /// Text of the single placeholder row rendered for an empty cart
    pub empty_cart_message: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: CurrencyCode::default(),
            empty_cart_message: DEFAULT_EMPTY_CART_MESSAGE.to_string(),
        }
    }
}

/// Checkout redirect configuration.
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// Checkout page for a non-empty cart
    pub checkout_path: String,
    /// Product listing page an empty cart is sent back to
    pub shop_path: String,
    /// Notice shown alongside the empty-cart redirect
    pub empty_cart_notice: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            checkout_path: DEFAULT_CHECKOUT_PATH.to_string(),
            shop_path: DEFAULT_SHOP_PATH.to_string(),
            empty_cart_notice: DEFAULT_EMPTY_CHECKOUT_NOTICE.to_string(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        let storage_key = vars.or_default("CART_STORAGE_KEY", DEFAULT_STORAGE_KEY);
        if storage_key.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "CART_STORAGE_KEY".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let currency = vars
            .or_default("STOREFRONT_CURRENCY", CurrencyCode::default().code())
            .parse::<CurrencyCode>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_CURRENCY".to_string(), e.to_string())
            })?;

        Ok(Self {
            cart: CartConfig { storage_key },
            display: DisplayConfig {
                currency,
                empty_cart_message: vars
                    .or_default("STOREFRONT_EMPTY_CART_MESSAGE", DEFAULT_EMPTY_CART_MESSAGE),
            },
            checkout: CheckoutConfig {
                checkout_path: vars.or_default("STOREFRONT_CHECKOUT_PATH", DEFAULT_CHECKOUT_PATH),
                shop_path: vars.or_default("STOREFRONT_SHOP_PATH", DEFAULT_SHOP_PATH),
                empty_cart_notice: vars.or_default(
                    "STOREFRONT_EMPTY_CHECKOUT_NOTICE",
                    DEFAULT_EMPTY_CHECKOUT_NOTICE,
                ),
            },
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup wrapper.
struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        (self.0)(key).unwrap_or_else(|| default.to_string())
    }
}
