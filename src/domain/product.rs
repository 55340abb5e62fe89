//! Product Entity
//!
//! Storefront products as served by the product catalogue API.

use serde::{Deserialize, Serialize};
use super::entity::Entity;

/// Aggregate customer rating
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u32,
}

impl Rating {
    /// Filled stars out of five (rate rounded to the nearest whole star)
    pub fn stars(&self) -> u8 {
        self.rate.round().clamp(0.0, 5.0) as u8
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub title: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub rating: Rating,
}

impl Product {
    pub fn new(id: u32, title: &str, price: f64, category: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            price,
            category: category.to_string(),
            description: String::new(),
            image: String::new(),
            rating: Rating::default(),
        }
    }
}

impl Entity for Product {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Category label for filter buttons ("men's clothing" -> "Men's clothing")
pub fn display_category(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
