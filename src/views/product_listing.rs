//! Product Listing View
//!
//! Products plus the category list, fetched side by side. Choosing a
//! category refetches from the category-scoped endpoint; the visible list is
//! also projected through the same category so it never shows items from
//! another category while a fetch is pending.

use crate::api::{decode_for, Endpoint};
use crate::domain::Product;
use crate::store::{CategoryFilter, FetchStatus, Memo, RemoteCollection, Resource};
use super::{Completion, FetchCommand, View};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductListingAction {
    SelectCategory(CategoryFilter),
    Retry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductListingSlot {
    Products,
    Categories,
}

type Command = FetchCommand<ProductListingSlot>;

#[derive(Debug, Default)]
pub struct ProductListing {
    products: RemoteCollection<Product>,
    categories: Resource<Vec<String>>,
    filter: CategoryFilter,
    visible: Memo<CategoryFilter>,
}

impl ProductListing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn status(&self) -> &FetchStatus {
        self.products.status()
    }

    pub fn categories_status(&self) -> &FetchStatus {
        self.categories.status()
    }

    pub fn products(&self) -> &RemoteCollection<Product> {
        &self.products
    }

    pub fn categories(&self) -> &[String] {
        self.categories.data()
    }

    /// Products under the active category, in server order
    pub fn visible(&self) -> Vec<&Product> {
        self.visible.view(self.products.items())
    }

    pub fn select_category(&mut self, filter: CategoryFilter) -> Vec<Command> {
        let failed = matches!(self.products.status(), FetchStatus::Failed(_));
        if filter == self.filter && self.products.last_request().is_some() && !failed {
            return Vec::new();
        }

        log::debug!("[LISTING] category {} -> {}", self.filter, filter);
        self.filter = filter;
        let ticket = self.products.begin(endpoint_for(&self.filter));
        self.refresh();
        vec![FetchCommand::new(ProductListingSlot::Products, ticket)]
    }

    pub fn retry(&mut self) -> Vec<Command> {
        let mut commands = Vec::new();
        if let Some(ticket) = self.products.retry() {
            commands.push(FetchCommand::new(ProductListingSlot::Products, ticket));
        }
        if let Some(ticket) = self.categories.retry() {
            commands.push(FetchCommand::new(ProductListingSlot::Categories, ticket));
        }
        commands
    }

    fn refresh(&mut self) {
        self.visible
            .sync(self.products.items(), self.products.revision(), &self.filter);
    }
}

fn endpoint_for(filter: &CategoryFilter) -> Endpoint {
    match filter {
        CategoryFilter::All => Endpoint::Products,
        CategoryFilter::Category(name) => Endpoint::ProductsByCategory(name.clone()),
    }
}

impl View for ProductListing {
    type Action = ProductListingAction;
    type Slot = ProductListingSlot;

    fn mount(&mut self) -> Vec<Command> {
        let products = self.products.begin(endpoint_for(&self.filter));
        let categories = self.categories.begin(Endpoint::Categories);
        self.refresh();
        vec![
            FetchCommand::new(ProductListingSlot::Products, products),
            FetchCommand::new(ProductListingSlot::Categories, categories),
        ]
    }

    fn update(&mut self, action: Self::Action) -> Vec<Command> {
        match action {
            ProductListingAction::SelectCategory(filter) => self.select_category(filter),
            ProductListingAction::Retry => self.retry(),
        }
    }

    fn settle(&mut self, completion: Completion<Self::Slot>) {
        let Completion { slot, ticket, result } = completion;
        match slot {
            ProductListingSlot::Products => {
                let result = result.and_then(|value| decode_for(&ticket.endpoint, value));
                self.products.settle(&ticket, result);
            }
            ProductListingSlot::Categories => {
                let result = result.and_then(|value| decode_for(&ticket.endpoint, value));
                self.categories.settle(&ticket, result);
            }
        }
        self.refresh();
    }
}
