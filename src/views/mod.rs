//! Views
//!
//! One explicit state struct per case study. Each interaction is a method
//! that mutates the state synchronously and returns the fetches it needs;
//! the driver runs those fetches and hands each outcome back to `settle`.
//! Derived views are re-synced at the end of every transition.

mod product_listing;
mod product_detail;
mod user_dashboard;
mod blog_posts;
mod todo_tracker;


use std::fmt::Debug;

use serde_json::Value;

use crate::domain::FetchResult;
use crate::store::Ticket;

pub use product_listing::{ProductListing, ProductListingAction, ProductListingSlot};
pub use product_detail::{ProductDetail, ProductDetailAction, ProductDetailSlot};
pub use user_dashboard::{UserDashboard, UserDashboardAction, UserDashboardSlot};
pub use blog_posts::{BlogPosts, BlogPostsAction, BlogPostsSlot};
pub use todo_tracker::{TodoTracker, TodoTrackerAction, TodoTrackerSlot};

/// A request a view wants issued
///
/// `slot` names which of the view's resources the outcome belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCommand<S> {
    pub slot: S,
    pub ticket: Ticket,
}

impl<S> FetchCommand<S> {
    pub fn new(slot: S, ticket: Ticket) -> Self {
        Self { slot, ticket }
    }
}

/// Outcome of a `FetchCommand`, delivered back to the view
#[derive(Debug, Clone)]
pub struct Completion<S> {
    pub slot: S,
    pub ticket: Ticket,
    pub result: FetchResult<Value>,
}

pub trait View {
    type Action;
    type Slot: Copy + Debug + Send + 'static;

    /// Initial fetches when the view becomes active
    fn mount(&mut self) -> Vec<FetchCommand<Self::Slot>>;

    /// Apply one user interaction
    fn update(&mut self, action: Self::Action) -> Vec<FetchCommand<Self::Slot>>;

    /// Apply the outcome of a fetch issued earlier
    fn settle(&mut self, completion: Completion<Self::Slot>);
}
