//! Catalog product types.
//!
//! Products are read-only to the client. Identity is the server-assigned id.

use serde::{Deserialize, Deserializer};
use std::fmt;
use tracing::warn;

// ===== ProductId =====

/// Server-assigned product identifier.
///
/// Catalog backends disagree on whether ids are numbers or strings, so both
/// are accepted at the parse boundary and normalized to a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductId(String);

impl ProductId {
    /// Create an id from any string-like value.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawProductId {
    Number(serde_json::Number),
    Text(String),
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match RawProductId::deserialize(deserializer)? {
            RawProductId::Number(n) => ProductId(n.to_string()),
            RawProductId::Text(s) => ProductId(s),
        })
    }
}

// ===== Lenient field decoding =====

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok().filter(|p| p.is_finite()),
        _ => None,
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

// ===== Product =====

/// A product as returned by the catalog endpoint.
///
/// `category` and `image` default to empty strings when absent or null;
/// `price` and `description` are genuinely optional and must be checked
/// before rendering. A price sent as a numeric string is accepted; any
/// other non-number price is dropped. Unknown fields (ratings, stock, ...)
/// are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    /// Server-assigned identity.
    pub id: ProductId,
    /// Display title. Matched against the query by the ranker.
    pub title: String,
    /// Category name. Matched against the query by the ranker.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,
    /// Image URL. Shown as text since terminals cannot render it.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image: String,
    /// Unit price in the catalog's currency.
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Option<f64>,
    /// Long-form description.
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
}

impl Product {
    /// Build a product with only the required fields set.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: ProductId::new(id),
            title: title.into(),
            category: category.into(),
            image: String::new(),
            price: None,
            description: None,
        }
    }

    /// Builder-style setter for the image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Builder-style setter for the price.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Builder-style setter for the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Title as it should appear in the input box after selection.
    ///
    /// Catalog titles occasionally carry trailing whitespace.
    pub fn display_title(&self) -> &str {
        self.title.trim()
    }

    /// Price formatted for display, if the catalog provided one.
    pub fn formatted_price(&self) -> Option<String> {
        self.price.map(|p| format!("${:.2}", p))
    }

    /// Description, treating blank strings as missing.
    pub fn description_text(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

/// Parse a catalog response body (a JSON array of products).
///
/// Elements that cannot be read as a product (no `id` or `title`, wrong
/// shape) are skipped with a warning; the rest of the catalog survives.
///
/// # Errors
///
/// Returns the `serde_json` error if the body is not a JSON array.
pub fn parse_catalog(body: &str) -> Result<Vec<Product>, serde_json::Error> {
    let elements: Vec<serde_json::Value> = serde_json::from_str(body)?;

    Ok(elements
        .into_iter()
        .enumerate()
        .filter_map(|(index, element)| match Product::deserialize(element) {
            Ok(product) => Some(product),
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed catalog product");
                None
            }
        })
        .collect())
}
