//! Query parameters, pagination and read-side helpers
//!
//! Everything here works on a snapshot taken from the store, so listing,
//! searching and statistics never hold the store lock while computing.

use crate::core::error::ValidationError;
use crate::core::product::Product;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Default page number when `page` is omitted
pub const DEFAULT_PAGE: usize = 1;

/// Default page size when `limit` is omitted
pub const DEFAULT_LIMIT: usize = 10;

/// Stats key for products without a category
pub const UNCATEGORIZED: &str = "uncategorized";

/// Query parameters for the list endpoint
///
/// `page` and `limit` arrive as raw strings and are coerced on use, so a bad
/// value is reported as a validation error instead of a query rejection.
///
/// # Example
/// ```text
/// GET /api/products?category=kitchen&page=2&limit=5
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ListParams {
    /// Exact category to keep
    pub category: Option<String>,

    /// Page number (starts at 1)
    pub page: Option<String>,

    /// Number of items per page
    pub limit: Option<String>,
}

impl ListParams {
    /// Page number, at least 1
    pub fn page(&self) -> Result<usize, ValidationError> {
        parse_positive(self.page.as_deref(), DEFAULT_PAGE)
    }

    /// Page size, at least 1
    pub fn limit(&self) -> Result<usize, ValidationError> {
        parse_positive(self.limit.as_deref(), DEFAULT_LIMIT)
    }

    /// Empty `category=` behaves like no filter
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }
}

fn parse_positive(raw: Option<&str>, default: usize) -> Result<usize, ValidationError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(ValidationError::InvalidPagination),
    }
}

/// Query parameters for the search endpoint
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SearchParams {
    pub q: Option<String>,
}

impl SearchParams {
    pub fn query(&self) -> Result<&str, ValidationError> {
        self.q
            .as_deref()
            .ok_or(ValidationError::MissingSearchQuery)
    }
}

/// Paginated response structure
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    /// Items of the requested page
    pub data: Vec<T>,

    /// Page number that was served
    pub page: usize,

    /// Size of the whole store, not of the filtered set
    pub total: usize,
}

/// Keep products whose category equals `category` exactly
pub fn filter_by_category(products: Vec<Product>, category: Option<&str>) -> Vec<Product> {
    match category {
        Some(category) => products
            .into_iter()
            .filter(|p| p.category.as_deref() == Some(category))
            .collect(),
        None => products,
    }
}

/// Slice the window `[(page-1)*limit, page*limit)` out of `items`
pub fn paginate<T>(items: Vec<T>, page: usize, limit: usize) -> Vec<T> {
    let start = page.saturating_sub(1).saturating_mul(limit);
    items.into_iter().skip(start).take(limit).collect()
}

/// Case-insensitive substring match on the product name
pub fn search_by_name(products: Vec<Product>, query: &str) -> Vec<Product> {
    let needle = query.to_lowercase();
    products
        .into_iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .collect()
}

/// Count products per category, keys in first-seen order
pub fn count_by_category(products: &[Product]) -> IndexMap<String, usize> {
    let mut stats = IndexMap::new();
    for product in products {
        let key = product.category.as_deref().unwrap_or(UNCATEGORIZED);
        *stats.entry(key.to_string()).or_insert(0) += 1;
    }
    stats
}
