//! Product Detail View
//!
//! A single product opened by id, with a quantity picker for the cart line.

use crate::api::{decode_for, Endpoint};
use crate::domain::Product;
use crate::store::{FetchStatus, Quantity, Resource};
use super::{Completion, FetchCommand, View};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductDetailAction {
    Open(u32),
    Close,
    Retry,
    /// Raw text from the quantity field
    SetQuantity(String),
    Increment,
    Decrement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductDetailSlot {
    Product,
}

type Command = FetchCommand<ProductDetailSlot>;

#[derive(Debug, Default)]
pub struct ProductDetail {
    product_id: Option<u32>,
    product: Resource<Option<Product>>,
    quantity: Quantity,
}

impl ProductDetail {
    /// Detail view with nothing selected
    pub fn new() -> Self {
        Self::default()
    }

    /// Detail view that loads `id` on mount
    pub fn for_product(id: u32) -> Self {
        Self {
            product_id: Some(id),
            ..Self::default()
        }
    }

    pub fn selected_id(&self) -> Option<u32> {
        self.product_id
    }

    pub fn product(&self) -> Option<&Product> {
        self.product.data().as_ref()
    }

    pub fn status(&self) -> &FetchStatus {
        self.product.status()
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Price of the cart line at the current quantity
    pub fn total_price(&self) -> Option<f64> {
        self.product()
            .map(|product| product.price * self.quantity.get() as f64)
    }

    pub fn open(&mut self, id: u32) -> Vec<Command> {
        let failed = matches!(self.product.status(), FetchStatus::Failed(_));
        if self.product_id == Some(id) && self.product.last_request().is_some() && !failed {
            return Vec::new();
        }
        self.product_id = Some(id);
        self.quantity = Quantity::default();
        self.load()
    }

    pub fn close(&mut self) {
        self.product_id = None;
        self.quantity = Quantity::default();
        self.product.reset();
    }

    pub fn retry(&mut self) -> Vec<Command> {
        self.product
            .retry()
            .map(|ticket| FetchCommand::new(ProductDetailSlot::Product, ticket))
            .into_iter()
            .collect()
    }

    pub fn set_quantity(&mut self, input: &str) {
        self.quantity = Quantity::parse(input);
    }

    pub fn increment(&mut self) {
        self.quantity = self.quantity.increment();
    }

    pub fn decrement(&mut self) {
        self.quantity = self.quantity.decrement();
    }

    fn load(&mut self) -> Vec<Command> {
        let Some(id) = self.product_id else {
            return Vec::new();
        };
        // the held product belongs to the previous selection
        self.product.reset();
        let ticket = self.product.begin(Endpoint::Product(id));
        vec![FetchCommand::new(ProductDetailSlot::Product, ticket)]
    }
}

impl View for ProductDetail {
    type Action = ProductDetailAction;
    type Slot = ProductDetailSlot;

    fn mount(&mut self) -> Vec<Command> {
        self.load()
    }

    fn update(&mut self, action: Self::Action) -> Vec<Command> {
        match action {
            ProductDetailAction::Open(id) => self.open(id),
            ProductDetailAction::Close => {
                self.close();
                Vec::new()
            }
            ProductDetailAction::Retry => self.retry(),
            ProductDetailAction::SetQuantity(input) => {
                self.set_quantity(&input);
                Vec::new()
            }
            ProductDetailAction::Increment => {
                self.increment();
                Vec::new()
            }
            ProductDetailAction::Decrement => {
                self.decrement();
                Vec::new()
            }
        }
    }

    fn settle(&mut self, completion: Completion<Self::Slot>) {
        let Completion { slot: ProductDetailSlot::Product, ticket, result } = completion;
        let result = result
            .and_then(|value| decode_for::<Product>(&ticket.endpoint, value))
            .map(Some);
        self.product.settle(&ticket, result);
    }
}
