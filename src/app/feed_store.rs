//! Single-writer state container for the reading list.
//!
//! ```text
//! dispatch(action) → reduce → new FeedState → observers
//!                       └→ background operation → Data / Error → dispatch
//! ```
//!
//! The state lives in a `watch` channel and every transition runs inside
//! `send_if_modified`, so reductions are serialized and observers only wake
//! when the state changed by value. Side effects go out on a `broadcast`
//! channel; nobody listening is fine.

use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tracing::{debug, error};

use crate::app::{FeedAction, FeedSideEffect, Result, TributaryError};
use crate::domain::{Feed, FeedState};
use crate::repository::FeedRepository;

pub const SIDE_EFFECT_CAPACITY: usize = 64;

/// Repository work scheduled by a reduction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Operation {
    Load { force: bool },
    Add(String),
    Delete(String),
}

#[derive(Debug)]
pub(crate) struct Reduction {
    pub state: FeedState,
    pub effect: Option<FeedSideEffect>,
    pub operation: Option<Operation>,
}

impl Reduction {
    fn state(state: FeedState) -> Self {
        Self {
            state,
            effect: None,
            operation: None,
        }
    }

    fn start(state: FeedState, operation: Operation) -> Self {
        Self {
            state,
            effect: None,
            operation: Some(operation),
        }
    }

    fn reject(state: &FeedState, error: TributaryError) -> Self {
        Self {
            state: state.clone(),
            effect: Some(FeedSideEffect::Error(Arc::new(error))),
            operation: None,
        }
    }
}

/// Compute the next state for `action`.
///
/// Mutating intents are only accepted while idle; completion intents only
/// while busy. Everything rejected leaves the state as it was and carries an
/// error effect instead.
pub(crate) fn reduce(old: &FeedState, action: FeedAction) -> Reduction {
    match action {
        FeedAction::Refresh { .. } | FeedAction::Add { .. } | FeedAction::Delete { .. }
            if old.is_busy() =>
        {
            Reduction::reject(old, TributaryError::InProgress)
        }
        FeedAction::Refresh { force_load } => Reduction::start(
            FeedState {
                progress: true,
                ..old.clone()
            },
            Operation::Load { force: force_load },
        ),
        FeedAction::Add { url } => Reduction::start(
            FeedState::new(true, old.feeds.clone()),
            Operation::Add(url),
        ),
        FeedAction::Delete { url } => Reduction::start(
            FeedState::new(true, old.feeds.clone()),
            Operation::Delete(url),
        ),
        FeedAction::SelectFeed { url: None } => Reduction::state(FeedState {
            selected_feed: None,
            ..old.clone()
        }),
        FeedAction::SelectFeed { url: Some(url) } => {
            if old.contains(&url) {
                Reduction::state(FeedState {
                    selected_feed: Some(url),
                    ..old.clone()
                })
            } else {
                Reduction::reject(old, TributaryError::UnknownFeed(url))
            }
        }
        FeedAction::Data { feeds } if old.is_busy() => {
            let selected_feed = old
                .selected_feed
                .clone()
                .filter(|url| feeds.iter().any(|feed| &feed.url == url));
            Reduction::state(FeedState {
                progress: false,
                feeds,
                selected_feed,
            })
        }
        FeedAction::Error { error } if old.is_busy() => Reduction {
            state: FeedState::new(false, old.feeds.clone()),
            effect: Some(FeedSideEffect::Error(error)),
            operation: None,
        },
        action @ (FeedAction::Data { .. } | FeedAction::Error { .. }) => Reduction::reject(
            old,
            TributaryError::UnexpectedAction(action.name().to_string()),
        ),
    }
}

struct Inner {
    repository: Arc<FeedRepository>,
    state: watch::Sender<FeedState>,
    side_effects: broadcast::Sender<FeedSideEffect>,
}

/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct FeedStore {
    inner: Arc<Inner>,
}

impl FeedStore {
    pub fn new(repository: Arc<FeedRepository>) -> Self {
        let (state, _) = watch::channel(FeedState::default());
        let (side_effects, _) = broadcast::channel(SIDE_EFFECT_CAPACITY);

        Self {
            inner: Arc::new(Inner {
                repository,
                state,
                side_effects,
            }),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> FeedState {
        self.inner.state.borrow().clone()
    }

    /// The current state plus every later change.
    pub fn observe_state(&self) -> watch::Receiver<FeedState> {
        self.inner.state.subscribe()
    }

    pub fn observe_side_effect(&self) -> broadcast::Receiver<FeedSideEffect> {
        self.inner.side_effects.subscribe()
    }

    /// Apply `action`. Must be called from within a tokio runtime, since
    /// accepted mutating intents spawn their repository work.
    pub fn dispatch(&self, action: FeedAction) {
        debug!("Action: {}", action);

        let side_effects = &self.inner.side_effects;
        let mut operation = None;

        self.inner.state.send_if_modified(|state| {
            let reduction = reduce(state, action);
            operation = reduction.operation;

            // effects go out before observers see the state they came with
            if let Some(effect) = reduction.effect {
                debug!("Side effect: {}", effect);
                // no subscribers is not an error
                let _ = side_effects.send(effect);
            }

            if reduction.state == *state {
                return false;
            }
            debug!(
                progress = reduction.state.progress,
                feeds = reduction.state.feeds.len(),
                selected = ?reduction.state.selected_feed,
                "New state"
            );
            *state = reduction.state;
            true
        });

        if let Some(operation) = operation {
            self.spawn(operation);
        }
    }

    /// Wait until no operation is in flight and return that state.
    pub async fn settled(&self) -> FeedState {
        let mut rx = self.observe_state();
        if let Ok(state) = rx.wait_for(|state| !state.is_busy()).await {
            return state.clone();
        }
        self.state()
    }

    fn spawn(&self, operation: Operation) {
        let store = self.clone();
        let repository = self.inner.repository.clone();

        tokio::spawn(async move {
            // a panicking operation still has to bring the store back to idle
            let work = tokio::spawn(run(repository, operation));

            let action = match work.await {
                Ok(Ok(feeds)) => FeedAction::Data { feeds },
                Ok(Err(e)) => FeedAction::Error { error: Arc::new(e) },
                Err(e) => {
                    error!("Feed operation task failed: {}", e);
                    FeedAction::Error {
                        error: Arc::new(TributaryError::Task(e)),
                    }
                }
            };

            store.dispatch(action);
        });
    }
}

async fn run(repository: Arc<FeedRepository>, operation: Operation) -> Result<Vec<Feed>> {
    match operation {
        Operation::Load { force } => repository.get_all_feeds(force).await,
        Operation::Add(url) => {
            repository.add_feed(&url).await?;
            repository.get_all_feeds(false).await
        }
        Operation::Delete(url) => {
            repository.delete_feed(&url).await?;
            repository.get_all_feeds(false).await
        }
    }
}
