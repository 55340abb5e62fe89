//! View State Store
//!
//! Building blocks shared by every view: fetched resources with their
//! status, the projection engine, and the quantity clamp.

mod resource;
mod projection;
mod quantity;

pub use resource::{FetchStatus, RemoteCollection, Resource, Ticket};
pub use projection::{
    project, Categorized, CategoryFilter, Completable, Criterion, Memo, SearchTerm, Searchable,
    TodoFilter, UnknownFilter,
};
pub use quantity::Quantity;
