//! Cumulative score with a single change observer.

use super::types::Score;
use std::cell::Cell;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, instrument};

/// Callback receiving the new cumulative total.
pub type ScoreObserver = Box<dyn FnMut(Score) + Send>;

type SharedObserver = Arc<Mutex<ScoreObserver>>;

thread_local! {
    static NOTIFYING: Cell<bool> = const { Cell::new(false) };
}

/// True while a score observer is running on the current thread.
pub(crate) fn observer_running() -> bool {
    NOTIFYING.with(Cell::get)
}

/// Marks the current thread as notifying until dropped, even on unwind.
struct NotifyGuard;

impl NotifyGuard {
    fn enter() -> Self {
        NOTIFYING.with(|flag| flag.set(true));
        Self
    }
}

impl Drop for NotifyGuard {
    fn drop(&mut self) {
        NOTIFYING.with(|flag| flag.set(false));
    }
}

/// A score change recorded but not yet reported to the observer.
///
/// Sessions deliver it after releasing their lock, so the observer can read
/// session state.
#[must_use]
pub(crate) struct ScoreNotice {
    observer: SharedObserver,
    total: Score,
}

impl ScoreNotice {
    /// Runs the observer with the recorded total.
    pub(crate) fn deliver(self) {
        let _guard = NotifyGuard::enter();
        let mut observer = self.observer.lock().unwrap_or_else(PoisonError::into_inner);
        (&mut **observer)(self.total);
    }
}

/// Running score total.
#[derive(Default)]
pub struct ScoreTracker {
    total: Score,
    observer: Option<SharedObserver>,
}

impl ScoreTracker {
    /// Creates a tracker at zero with no observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `delta` and notifies the observer with the new total.
    pub fn add(&mut self, delta: Score) {
        if let Some(notice) = self.record(delta) {
            notice.deliver();
        }
    }

    /// Adds `delta`, returning the notification still owed to the observer.
    #[instrument(skip(self), fields(total = self.total))]
    pub(crate) fn record(&mut self, delta: Score) -> Option<ScoreNotice> {
        self.total = self.total.saturating_add(delta);
        debug!(new_total = self.total, "Score updated");

        self.observer.as_ref().map(|observer| ScoreNotice {
            observer: Arc::clone(observer),
            total: self.total,
        })
    }

    /// Current total.
    pub fn current(&self) -> Score {
        self.total
    }

    /// Clears the total to zero. The observer is kept and not notified.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        debug!(previous = self.total, "Score reset");
        self.total = 0;
    }

    /// Registers the observer, replacing any previous one.
    pub fn on_change(&mut self, observer: impl FnMut(Score) + Send + 'static) {
        let observer: ScoreObserver = Box::new(observer);
        self.observer = Some(Arc::new(Mutex::new(observer)));
    }

    /// Removes the observer.
    pub fn clear_observer(&mut self) {
        self.observer = None;
    }
}

impl std::fmt::Debug for ScoreTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreTracker")
            .field("total", &self.total)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}
