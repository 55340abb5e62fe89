//! View Driver
//!
//! The single event queue a view lives on. Actions are applied
//! synchronously; each fetch they request runs as its own tokio task and its
//! completion is queued back here, so the view is only ever mutated from
//! one place. Nothing is cancelled: superseded responses still arrive and
//! are discarded by the resource's ticket check.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::api::Fetcher;
use crate::views::{Completion, FetchCommand, View};

pub struct ViewDriver<V: View> {
    view: V,
    fetcher: Arc<Fetcher>,
    tx: mpsc::UnboundedSender<Completion<V::Slot>>,
    rx: mpsc::UnboundedReceiver<Completion<V::Slot>>,
    in_flight: usize,
}

impl<V: View> ViewDriver<V> {
    pub fn new(view: V, fetcher: Arc<Fetcher>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            view,
            fetcher,
            tx,
            rx,
            in_flight: 0,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Fetches issued but not yet applied
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn mount(&mut self) {
        let commands = self.view.mount();
        self.spawn_all(commands);
    }

    pub fn dispatch(&mut self, action: V::Action) {
        let commands = self.view.update(action);
        self.spawn_all(commands);
    }

    /// Wait for the next completion and apply it
    ///
    /// Returns false when nothing is in flight.
    pub async fn next(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        match self.rx.recv().await {
            Some(completion) => {
                self.in_flight -= 1;
                log::debug!(
                    "[DRIVER] {:?} settled ({} still in flight)",
                    completion.slot,
                    self.in_flight
                );
                self.view.settle(completion);
                true
            }
            None => false,
        }
    }

    /// Apply completions until nothing is in flight
    pub async fn settle(&mut self) {
        while self.next().await {}
    }

    fn spawn_all(&mut self, commands: Vec<FetchCommand<V::Slot>>) {
        for command in commands {
            self.spawn(command);
        }
    }

    fn spawn(&mut self, command: FetchCommand<V::Slot>) {
        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.tx.clone();
        self.in_flight += 1;

        tokio::spawn(async move {
            let FetchCommand { slot, ticket } = command;
            let result = fetcher.fetch_value(&ticket.endpoint).await;
            // receiver gone means the driver was dropped; nothing to deliver to
            let _ = tx.send(Completion { slot, ticket, result });
        });
    }
}
