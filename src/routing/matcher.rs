//! Route matching module
//!
//! Maps a request path onto one of the catalog routes. Paths are matched
//! segment by segment; there is no trailing-slash normalization, so
//! `/products/` matches nothing.

use hyper::Method;

use crate::http::decode_path_segment;

/// A catalog endpoint with its path parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Health,
    Products,
    Product(String),
    Categories,
    Stock(String),
    Reserve(String),
}

impl Route {
    /// Resolve a path (without query string) to a route
    pub fn resolve(path: &str) -> Option<Self> {
        let rest = path.strip_prefix('/')?;
        let segments: Vec<&str> = rest.split('/').collect();

        match segments.as_slice() {
            ["health"] => Some(Self::Health),
            ["products"] => Some(Self::Products),
            ["categories"] => Some(Self::Categories),
            ["products", id] => product_id(id).map(Self::Product),
            ["products", id, "stock"] => product_id(id).map(Self::Stock),
            ["products", id, "reserve"] => product_id(id).map(Self::Reserve),
            _ => None,
        }
    }

    /// Whether `method` is served by this route. GET routes also answer HEAD.
    pub fn accepts(&self, method: &Method) -> bool {
        match self {
            Self::Reserve(_) => method == Method::POST,
            _ => method == Method::GET || method == Method::HEAD,
        }
    }

    /// Value for the `Allow` header
    pub const fn allow(&self) -> &'static str {
        match self {
            Self::Reserve(_) => "POST, OPTIONS",
            _ => "GET, HEAD, OPTIONS",
        }
    }
}

fn product_id(segment: &str) -> Option<String> {
    if segment.is_empty() {
        return None;
    }
    Some(decode_path_segment(segment))
}
