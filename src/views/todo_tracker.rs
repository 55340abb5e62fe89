//! Todo Tracker View
//!
//! A fixed slice of the todo list, edited locally: toggling and adding never
//! reach the server. New ids come from a counter that only moves forward;
//! once it passes `u32::MAX` no further local todos can be added.

use crate::api::{decode_for, Endpoint};
use crate::domain::Todo;
use crate::store::{FetchStatus, Memo, RemoteCollection, TodoFilter};
use super::{Completion, FetchCommand, View};

pub const DEFAULT_TODO_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoTrackerAction {
    SetFilter(TodoFilter),
    Toggle(u32),
    Add(String),
    Retry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoTrackerSlot {
    Todos,
}

type Command = FetchCommand<TodoTrackerSlot>;

#[derive(Debug)]
pub struct TodoTracker {
    todos: RemoteCollection<Todo>,
    filter: TodoFilter,
    visible: Memo<TodoFilter>,
    next_id: Option<u32>,
    limit: usize,
}

impl Default for TodoTracker {
    fn default() -> Self {
        Self::new(DEFAULT_TODO_LIMIT)
    }
}

impl TodoTracker {
    pub fn new(limit: usize) -> Self {
        Self {
            todos: RemoteCollection::new(),
            filter: TodoFilter::All,
            visible: Memo::new(),
            next_id: Some(1),
            limit,
        }
    }

    pub fn status(&self) -> &FetchStatus {
        self.todos.status()
    }

    pub fn todos(&self) -> &RemoteCollection<Todo> {
        &self.todos
    }

    pub fn filter(&self) -> TodoFilter {
        self.filter
    }

    /// Todos passing the active filter
    pub fn visible(&self) -> Vec<&Todo> {
        self.visible.view(self.todos.items())
    }

    pub fn completed_count(&self) -> usize {
        self.todos.items().iter().filter(|todo| todo.completed).count()
    }

    pub fn pending_count(&self) -> usize {
        self.todos.len() - self.completed_count()
    }

    pub fn set_filter(&mut self, filter: TodoFilter) {
        self.filter = filter;
        self.refresh();
    }

    /// Flip completion of `id`; false if no such todo
    pub fn toggle(&mut self, id: u32) -> bool {
        if !self.todos.contains(id) {
            return false;
        }
        self.todos.edit(|items| {
            if let Some(todo) = items.iter_mut().find(|todo| todo.id == id) {
                todo.toggle();
            }
        });
        self.refresh();
        true
    }

    /// Prepend a new pending todo; blank titles are ignored
    ///
    /// Returns the id given to the new todo, or `None` when the title is
    /// blank or local ids are exhausted.
    pub fn add(&mut self, title: &str) -> Option<u32> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let Some(id) = self.next_id else {
            log::warn!("[TODOS] no local ids left, ignoring new todo");
            return None;
        };
        self.next_id = id.checked_add(1);
        self.todos.edit(|items| items.insert(0, Todo::new(id, title)));
        self.refresh();
        log::debug!("[TODOS] added local todo {}", id);
        Some(id)
    }

    pub fn retry(&mut self) -> Vec<Command> {
        self.todos
            .retry()
            .map(|ticket| FetchCommand::new(TodoTrackerSlot::Todos, ticket))
            .into_iter()
            .collect()
    }

    fn refresh(&mut self) {
        self.visible
            .sync(self.todos.items(), self.todos.revision(), &self.filter);
    }

    fn advance_ids(&mut self) {
        if let Some(max) = self.todos.items().iter().map(|todo| todo.id).max() {
            self.next_id = match (self.next_id, max.checked_add(1)) {
                (Some(next), Some(after_max)) => Some(next.max(after_max)),
                _ => None,
            };
        }
    }
}

impl View for TodoTracker {
    type Action = TodoTrackerAction;
    type Slot = TodoTrackerSlot;

    fn mount(&mut self) -> Vec<Command> {
        let ticket = self.todos.begin(Endpoint::Todos);
        self.refresh();
        vec![FetchCommand::new(TodoTrackerSlot::Todos, ticket)]
    }

    fn update(&mut self, action: Self::Action) -> Vec<Command> {
        match action {
            TodoTrackerAction::SetFilter(filter) => self.set_filter(filter),
            TodoTrackerAction::Toggle(id) => {
                self.toggle(id);
            }
            TodoTrackerAction::Add(title) => {
                self.add(&title);
            }
            TodoTrackerAction::Retry => return self.retry(),
        }
        Vec::new()
    }

    fn settle(&mut self, completion: Completion<Self::Slot>) {
        let Completion { slot: TodoTrackerSlot::Todos, ticket, result } = completion;
        let limit = self.limit;
        let result = result
            .and_then(|value| decode_for::<Vec<Todo>>(&ticket.endpoint, value))
            .map(|mut todos| {
                todos.truncate(limit);
                todos
            });
        if self.todos.settle(&ticket, result) {
            self.advance_ids();
        }
        self.refresh();
    }
}
