//! Event-driven leaderboard session.
//!
//! A [`Session`] wires a [`RowSource`], a [`DebouncedInput`] and a
//! [`Leaderboard`] into one cooperative loop. Every state transition happens
//! inside the loop in response to a single event: a user event, a debounced
//! search commit, or a completed fetch. The renderer is called after each one.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::criteria::OrganizationFilter;
use crate::debounce::DebouncedInput;
use crate::error::DataUnavailable;
use crate::leaderboard::{Leaderboard, LeaderboardView};
use crate::model::BenchmarkRow;
use crate::traits::RowSource;

/// Input pushed into a session by the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum UserEvent {
    /// The search box now contains this text.
    Keystroke(String),
    SelectOrganization(OrganizationFilter),
    SetMinGlobalAverage(f64),
    /// Fetch a fresh snapshot.
    Reload,
}

/// Receives the derived state after every transition.
pub trait Renderer {
    fn render(&mut self, view: &LeaderboardView<'_>, search_echo: &str);
}

type FetchResult = (u64, Result<Vec<BenchmarkRow>, DataUnavailable>);

/// A running leaderboard: state, debounced search and data source.
pub struct Session {
    board: Leaderboard,
    input: DebouncedInput,
    source: Arc<dyn RowSource>,
    // Sequence number of the most recently issued fetch.
    latest_fetch: u64,
}

impl Session {
    pub fn new(source: Arc<dyn RowSource>, quiet_period: Duration) -> Self {
        Self {
            board: Leaderboard::new(),
            input: DebouncedInput::new(quiet_period),
            source,
            latest_fetch: 0,
        }
    }

    /// Drive the session until `events` is closed, then return the final
    /// state. Any pending search commit is cancelled on exit, and fetches
    /// still in flight are discarded.
    pub async fn run<R: Renderer>(
        mut self,
        mut events: mpsc::Receiver<UserEvent>,
        renderer: &mut R,
    ) -> Leaderboard {
        let (fetch_tx, mut fetch_rx) = mpsc::channel::<FetchResult>(4);
        let mut committed = self.input.subscribe();

        self.spawn_fetch(&fetch_tx);
        self.render(renderer);

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => self.handle(event, &fetch_tx),
                    None => break,
                },
                Ok(()) = committed.changed() => {
                    let term = committed.borrow_and_update().clone();
                    self.board.set_search_term(term);
                }
                Some((seq, result)) = fetch_rx.recv() => {
                    if seq == self.latest_fetch {
                        self.board.apply_fetch(self.source.name(), result);
                    } else {
                        tracing::debug!(seq, latest = self.latest_fetch, "discarding superseded fetch");
                    }
                }
            }
            self.render(renderer);
        }

        let Session { board, input, .. } = self;
        drop(input);
        board
    }

    fn handle(&mut self, event: UserEvent, fetch_tx: &mpsc::Sender<FetchResult>) {
        match event {
            UserEvent::Keystroke(text) => self.input.on_keystroke(text),
            UserEvent::SelectOrganization(filter) => self.board.set_organization_filter(filter),
            UserEvent::SetMinGlobalAverage(value) => self.board.set_min_global_average(value),
            UserEvent::Reload => self.spawn_fetch(fetch_tx),
        }
    }

    fn spawn_fetch(&mut self, fetch_tx: &mpsc::Sender<FetchResult>) {
        self.latest_fetch += 1;
        let seq = self.latest_fetch;
        let source = Arc::clone(&self.source);
        let tx = fetch_tx.clone();
        tokio::spawn(async move {
            let result = source.fetch_rows().await;
            if tx.send((seq, result)).await.is_err() {
                tracing::debug!(seq, "session closed before fetch completed");
            }
        });
    }

    fn render<R: Renderer>(&mut self, renderer: &mut R) {
        let view = self.board.view();
        renderer.render(&view, self.input.echo());
    }
}
