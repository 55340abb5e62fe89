//! User Dashboard View
//!
//! The user directory with client-side search and a detail pane.

use crate::api::{decode_for, Endpoint};
use crate::domain::User;
use crate::store::{FetchStatus, Memo, RemoteCollection, SearchTerm};
use super::{Completion, FetchCommand, View};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserDashboardAction {
    Search(String),
    Select(u32),
    ClearSelection,
    Retry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserDashboardSlot {
    Users,
}

type Command = FetchCommand<UserDashboardSlot>;

#[derive(Debug, Default)]
pub struct UserDashboard {
    users: RemoteCollection<User>,
    search: SearchTerm,
    selected: Option<u32>,
    visible: Memo<SearchTerm>,
}

impl UserDashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &FetchStatus {
        self.users.status()
    }

    pub fn users(&self) -> &RemoteCollection<User> {
        &self.users
    }

    pub fn total(&self) -> usize {
        self.users.len()
    }

    pub fn search_term(&self) -> &str {
        self.search.as_str()
    }

    /// Users matching the search term
    pub fn visible(&self) -> Vec<&User> {
        self.visible.view(self.users.items())
    }

    pub fn selected_user(&self) -> Option<&User> {
        self.selected.and_then(|id| self.users.find(id))
    }

    pub fn search(&mut self, term: &str) {
        self.search = SearchTerm::new(term);
        self.refresh();
    }

    /// Unknown ids leave the selection as it was
    pub fn select(&mut self, id: u32) {
        if self.users.contains(id) {
            self.selected = Some(id);
        } else {
            log::debug!("[USERS] ignoring selection of unknown user {}", id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn retry(&mut self) -> Vec<Command> {
        self.users
            .retry()
            .map(|ticket| FetchCommand::new(UserDashboardSlot::Users, ticket))
            .into_iter()
            .collect()
    }

    fn refresh(&mut self) {
        self.visible
            .sync(self.users.items(), self.users.revision(), &self.search);
    }
}

impl View for UserDashboard {
    type Action = UserDashboardAction;
    type Slot = UserDashboardSlot;

    fn mount(&mut self) -> Vec<Command> {
        let ticket = self.users.begin(Endpoint::Users);
        self.refresh();
        vec![FetchCommand::new(UserDashboardSlot::Users, ticket)]
    }

    fn update(&mut self, action: Self::Action) -> Vec<Command> {
        match action {
            UserDashboardAction::Search(term) => {
                self.search(&term);
                Vec::new()
            }
            UserDashboardAction::Select(id) => {
                self.select(id);
                Vec::new()
            }
            UserDashboardAction::ClearSelection => {
                self.clear_selection();
                Vec::new()
            }
            UserDashboardAction::Retry => self.retry(),
        }
    }

    fn settle(&mut self, completion: Completion<Self::Slot>) {
        let Completion { slot: UserDashboardSlot::Users, ticket, result } = completion;
        let result = result.and_then(|value| decode_for(&ticket.endpoint, value));
        self.users.settle(&ticket, result);
        self.refresh();
    }
}
