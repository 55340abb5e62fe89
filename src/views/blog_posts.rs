//! Blog Posts View
//!
//! Post list with a selected post whose comments are a dependent
//! collection: they belong to exactly one selection and are dropped (and any
//! in-flight comment fetch invalidated) whenever the selection changes.

use crate::api::{decode_for, Endpoint};
use crate::domain::{Comment, Post};
use crate::store::{FetchStatus, RemoteCollection};
use super::{Completion, FetchCommand, View};

pub const DEFAULT_EXCERPT_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlogPostsAction {
    SelectPost(u32),
    ClearSelection,
    Retry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlogPostsSlot {
    Posts,
    Comments,
}

type Command = FetchCommand<BlogPostsSlot>;

#[derive(Debug)]
pub struct BlogPosts {
    posts: RemoteCollection<Post>,
    selected: Option<u32>,
    comments: RemoteCollection<Comment>,
    excerpt_len: usize,
}

impl Default for BlogPosts {
    fn default() -> Self {
        Self::new(DEFAULT_EXCERPT_LEN)
    }
}

impl BlogPosts {
    pub fn new(excerpt_len: usize) -> Self {
        Self {
            posts: RemoteCollection::new(),
            selected: None,
            comments: RemoteCollection::new(),
            excerpt_len,
        }
    }

    pub fn posts(&self) -> &RemoteCollection<Post> {
        &self.posts
    }

    pub fn status(&self) -> &FetchStatus {
        self.posts.status()
    }

    pub fn selected_id(&self) -> Option<u32> {
        self.selected
    }

    pub fn selected_post(&self) -> Option<&Post> {
        self.selected.and_then(|id| self.posts.find(id))
    }

    pub fn comments(&self) -> &[Comment] {
        self.comments.items()
    }

    pub fn comments_status(&self) -> &FetchStatus {
        self.comments.status()
    }

    /// Request behind the comments currently held or loading
    pub fn comments_request(&self) -> Option<&Endpoint> {
        self.comments.last_request()
    }

    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    pub fn excerpt(&self, post: &Post) -> String {
        post.excerpt(self.excerpt_len)
    }

    /// Select a post and fetch its comments; unknown ids are ignored
    pub fn select_post(&mut self, id: u32) -> Vec<Command> {
        if !self.posts.contains(id) {
            log::debug!("[BLOG] ignoring selection of unknown post {}", id);
            return Vec::new();
        }
        self.selected = Some(id);
        self.comments.reset();
        let ticket = self.comments.begin(Endpoint::PostComments(id));
        vec![FetchCommand::new(BlogPostsSlot::Comments, ticket)]
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.comments.reset();
    }

    pub fn retry(&mut self) -> Vec<Command> {
        let mut commands = Vec::new();
        if let Some(ticket) = self.posts.retry() {
            commands.push(FetchCommand::new(BlogPostsSlot::Posts, ticket));
        }
        if let Some(ticket) = self.comments.retry() {
            commands.push(FetchCommand::new(BlogPostsSlot::Comments, ticket));
        }
        commands
    }
}

impl View for BlogPosts {
    type Action = BlogPostsAction;
    type Slot = BlogPostsSlot;

    fn mount(&mut self) -> Vec<Command> {
        let ticket = self.posts.begin(Endpoint::Posts);
        vec![FetchCommand::new(BlogPostsSlot::Posts, ticket)]
    }

    fn update(&mut self, action: Self::Action) -> Vec<Command> {
        match action {
            BlogPostsAction::SelectPost(id) => self.select_post(id),
            BlogPostsAction::ClearSelection => {
                self.clear_selection();
                Vec::new()
            }
            BlogPostsAction::Retry => self.retry(),
        }
    }

    fn settle(&mut self, completion: Completion<Self::Slot>) {
        let Completion { slot, ticket, result } = completion;
        match slot {
            BlogPostsSlot::Posts => {
                let result = result.and_then(|value| decode_for(&ticket.endpoint, value));
                self.posts.settle(&ticket, result);
            }
            BlogPostsSlot::Comments => {
                let result = result.and_then(|value| decode_for(&ticket.endpoint, value));
                self.comments.settle(&ticket, result);
            }
        }
    }
}
