//! Client-side match ranking.
//!
//! Scoring is additive across independent predicates, so an exact title
//! match also collects the starts-with and contains points:
//!
//! | predicate                 | points |
//! |---------------------------|--------|
//! | title equals query        | 1000   |
//! | title starts with query   | 500    |
//! | title contains query      | 250    |
//! | category contains query   | 100    |
//!
//! All comparisons are case-insensitive against the trimmed query.
//! Products scoring zero are filtered out; the rest are sorted by score,
//! descending, with a stable sort so equal scores keep catalog order.

use crate::model::Product;

/// Points for a case-insensitive exact title match.
pub const EXACT_TITLE: u32 = 1000;
/// Points for a title that starts with the query.
pub const TITLE_PREFIX: u32 = 500;
/// Points for a title that contains the query anywhere.
pub const TITLE_CONTAINS: u32 = 250;
/// Points for a category that contains the query.
pub const CATEGORY_CONTAINS: u32 = 100;

/// Normalize a raw query into the needle used for scoring.
///
/// Returns `None` for blank queries.
pub fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Score one product against an already-normalized needle.
pub fn score(product: &Product, needle: &str) -> u32 {
    let title = product.title.to_lowercase();
    let category = product.category.to_lowercase();

    let mut total = 0;
    if title == needle {
        total += EXACT_TITLE;
    }
    if title.starts_with(needle) {
        total += TITLE_PREFIX;
    }
    if title.contains(needle) {
        total += TITLE_CONTAINS;
    }
    if category.contains(needle) {
        total += CATEGORY_CONTAINS;
    }
    total
}

/// Rank `products` against `query`.
///
/// Returns an empty vector for a blank query or an empty catalog. The
/// result is a pure function of the inputs.
pub fn rank<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let Some(needle) = normalize_query(query) else {
        return Vec::new();
    };

    let mut scored: Vec<(u32, &Product)> = products
        .iter()
        .map(|p| (score(p, &needle), p))
        .filter(|(s, _)| *s > 0)
        .collect();

    // sort_by is stable: ties keep catalog order
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored.into_iter().map(|(_, p)| p).collect()
}

/// Owned variant of [`rank`] for callers that store the result.
pub fn rank_owned(products: &[Product], query: &str) -> Vec<Product> {
    rank(products, query).into_iter().cloned().collect()
}
