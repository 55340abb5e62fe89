//! Projection Engine
//!
//! Pure, order-preserving filters over a fetched collection, plus `Memo`,
//! which caches a projection keyed on (source revision, criterion) so it is
//! recomputed exactly when one of those changes.

use std::fmt;
use std::str::FromStr;

use crate::domain::{Product, Todo, User};

/// A filter predicate over items of type `T`
pub trait Criterion<T> {
    fn matches(&self, item: &T) -> bool;
}

/// Items with a category field
pub trait Categorized {
    fn category(&self) -> &str;
}

/// Items with a completion flag
pub trait Completable {
    fn is_completed(&self) -> bool;
}

/// Items exposing fields for free-text search
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

impl Categorized for Product {
    fn category(&self) -> &str {
        &self.category
    }
}

impl Completable for Todo {
    fn is_completed(&self) -> bool {
        self.completed
    }
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str(), self.company.name.as_str()]
    }
}

/// Single pass over `items`, keeping matches in their original order
pub fn project<'a, T, C>(items: &'a [T], criterion: &C) -> Vec<&'a T>
where
    C: Criterion<T> + ?Sized,
{
    items.iter().filter(|item| criterion.matches(item)).collect()
}

fn project_indices<T, C>(items: &[T], criterion: &C) -> Vec<usize>
where
    C: Criterion<T> + ?Sized,
{
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| criterion.matches(item))
        .map(|(index, _)| index)
        .collect()
}

// ========================
// Category filter
// ========================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl From<&str> for CategoryFilter {
    fn from(s: &str) -> Self {
        match s {
            "all" => CategoryFilter::All,
            other => CategoryFilter::Category(other.to_string()),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Category(name) => write!(f, "{}", name),
        }
    }
}

impl<T: Categorized> Criterion<T> for CategoryFilter {
    fn matches(&self, item: &T) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(name) => item.category() == name,
        }
    }
}

// ========================
// Completion filter
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TodoFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl TodoFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoFilter::All => "all",
            TodoFilter::Completed => "completed",
            TodoFilter::Pending => "pending",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown todo filter '{0}' (expected all, completed or pending)")]
pub struct UnknownFilter(pub String);

impl FromStr for TodoFilter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(TodoFilter::All),
            "completed" => Ok(TodoFilter::Completed),
            "pending" => Ok(TodoFilter::Pending),
            other => Err(UnknownFilter(other.to_string())),
        }
    }
}

impl<T: Completable> Criterion<T> for TodoFilter {
    fn matches(&self, item: &T) -> bool {
        match self {
            TodoFilter::All => true,
            TodoFilter::Completed => item.is_completed(),
            TodoFilter::Pending => !item.is_completed(),
        }
    }
}

// ========================
// Free-text search
// ========================

/// Case-insensitive substring search; the empty term matches everything
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchTerm {
    raw: String,
    needle: String,
}

impl SearchTerm {
    pub fn new(term: &str) -> Self {
        Self {
            raw: term.to_string(),
            needle: term.to_lowercase(),
        }
    }

    /// The term as typed
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }
}

impl<T: Searchable> Criterion<T> for SearchTerm {
    fn matches(&self, item: &T) -> bool {
        self.is_empty()
            || item
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&self.needle))
    }
}

// ========================
// Memoized projection
// ========================

/// Cached derived view over one resource
///
/// Stores indices into the source rather than copies, so reading it always
/// goes through the current source data.
#[derive(Debug, Clone, Default)]
pub struct Memo<C> {
    key: Option<(u64, C)>,
    indices: Vec<usize>,
    recomputations: u64,
}

impl<C: Clone + PartialEq> Memo<C> {
    pub fn new() -> Self {
        Self {
            key: None,
            indices: Vec::new(),
            recomputations: 0,
        }
    }

    /// Recompute if the source revision or the criterion changed
    ///
    /// Returns true when a recomputation happened.
    pub fn sync<T>(&mut self, source: &[T], revision: u64, criterion: &C) -> bool
    where
        C: Criterion<T>,
    {
        let fresh = matches!(&self.key, Some((rev, crit)) if *rev == revision && crit == criterion);
        if fresh {
            return false;
        }
        self.indices = project_indices(source, criterion);
        self.key = Some((revision, criterion.clone()));
        self.recomputations += 1;
        true
    }

    pub fn view<'a, T>(&self, source: &'a [T]) -> Vec<&'a T> {
        self.indices.iter().filter_map(|&i| source.get(i)).collect()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}
