//! Domain Layer
//!
//! Contains the fetched entities and the fetch error taxonomy.
//! This layer has NO external dependencies (except serde and thiserror).

mod entity;
mod product;
mod user;
mod post;
mod todo;

pub use entity::{Entity, FetchError, FetchResult};
pub use product::{display_category, Product, Rating};
pub use user::{Address, Company, User};
pub use post::{Comment, Post};
pub use todo::{Todo, LOCAL_USER_ID};
