//! Endpoints
//!
//! One variant per remote collection the views read. An endpoint plus its
//! path parameter is the identity of a fetched collection.

use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::ApiConfig;
use crate::domain::FetchError;

/// Characters escaped inside a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Products,
    ProductsByCategory(String),
    Product(u32),
    Categories,
    Users,
    Posts,
    PostComments(u32),
    Todos,
}

impl Endpoint {
    pub fn url(&self, config: &ApiConfig) -> String {
        let store = config.store_base();
        let placeholder = config.placeholder_base();
        match self {
            Endpoint::Products => format!("{}/products", store),
            Endpoint::ProductsByCategory(category) => format!(
                "{}/products/category/{}",
                store,
                utf8_percent_encode(category, PATH_SEGMENT)
            ),
            Endpoint::Product(id) => format!("{}/products/{}", store, id),
            Endpoint::Categories => format!("{}/products/categories", store),
            Endpoint::Users => format!("{}/users", placeholder),
            Endpoint::Posts => format!("{}/posts", placeholder),
            Endpoint::PostComments(post_id) => format!("{}/posts/{}/comments", placeholder, post_id),
            Endpoint::Todos => format!("{}/todos", placeholder),
        }
    }

    /// Whether this endpoint names one entity rather than a collection
    pub fn is_single(&self) -> bool {
        matches!(self, Endpoint::Product(_))
    }

    /// Message shown when the server rejects the request
    pub fn failure_message(&self) -> &'static str {
        match self {
            Endpoint::Products | Endpoint::ProductsByCategory(_) => "Failed to fetch products",
            Endpoint::Product(_) => "Failed to fetch product details",
            Endpoint::Categories => "Failed to fetch categories",
            Endpoint::Users => "Failed to fetch users",
            Endpoint::Posts => "Failed to fetch posts",
            Endpoint::PostComments(_) => "Failed to fetch comments",
            Endpoint::Todos => "Failed to fetch todos",
        }
    }

    /// Map a non-2xx status to the error reported for this endpoint
    pub fn status_error(&self, status: u16) -> FetchError {
        match self {
            Endpoint::Product(id) if status == 404 => FetchError::NotFound(format!("Product {}", id)),
            _ => FetchError::Http {
                status,
                message: self.failure_message().to_string(),
            },
        }
    }

    /// Error for a single-entity endpoint that answered with nothing
    pub fn missing(&self) -> FetchError {
        match self {
            Endpoint::Product(id) => FetchError::NotFound(format!("Product {}", id)),
            other => FetchError::NotFound(other.to_string()),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Products => write!(f, "products"),
            Endpoint::ProductsByCategory(category) => write!(f, "products in '{}'", category),
            Endpoint::Product(id) => write!(f, "product {}", id),
            Endpoint::Categories => write!(f, "categories"),
            Endpoint::Users => write!(f, "users"),
            Endpoint::Posts => write!(f, "posts"),
            Endpoint::PostComments(post_id) => write!(f, "comments of post {}", post_id),
            Endpoint::Todos => write!(f, "todos"),
        }
    }
}
