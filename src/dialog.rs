//! Dialog overlay stack
//!
//! Navigable history of overlay views for the profile editor UI: opening a
//! dialog pushes onto the stack, closing pops back to the previous one, and
//! `clear_history` drains the stack one entry at a time with a 100 ms pause
//! between pops (the animated-dismissal effect).
//!
//! The stack is an explicit value with a cloneable handle; callers scope
//! it to their component tree instead of sharing a module-level singleton.
//! An in-flight drain holds a generation token and stops as soon as a newer
//! `open` or `clear_history` call bumps the generation, so drains never
//! race each other or fight a freshly opened dialog.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde_json::Value;
use tokio::time::sleep;

/// Pause between pops while draining the history
pub const CLEAR_HISTORY_STEP: Duration = Duration::from_millis(100);

/// One overlay view plus the properties it was opened with
#[derive(Clone, Debug, PartialEq)]
pub struct DialogEntry<V> {
    pub view: V,
    pub props: Option<Value>,
}

struct Inner<V> {
    history: Vec<DialogEntry<V>>,
    generation: u64,
}

/// Cloneable handle to a shared dialog stack
pub struct DialogStack<V> {
    inner: Arc<Mutex<Inner<V>>>,
}

impl<V> Clone for DialogStack<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> Default for DialogStack<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> DialogStack<V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                history: Vec::new(),
                generation: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<V>> {
        self.inner.lock().expect("dialog stack lock poisoned")
    }

    /// Push a new entry; it becomes `current`. Invalidates any in-flight
    /// drain.
    pub fn open(&self, view: V, props: Option<Value>) {
        let mut inner = self.lock();
        inner.generation += 1;
        inner.history.push(DialogEntry { view, props });
    }

    /// Pop the top entry; `current` becomes the new top, or none when the
    /// stack is empty. Returns the popped entry.
    pub fn close(&self) -> Option<DialogEntry<V>> {
        self.lock().history.pop()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().history.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().history.is_empty()
    }

    /// Drain the stack one entry at a time, pausing 100 ms between pops.
    ///
    /// A stack of N entries sees exactly N pops separated by the step
    /// delay, ending with `current` = none, unless a newer `open` or
    /// `clear_history` call takes over the generation, in which case this
    /// drain stops where it is.
    pub async fn clear_history(&self) {
        let token = {
            let mut inner = self.lock();
            inner.generation += 1;
            inner.generation
        };

        loop {
            {
                let mut inner = self.lock();
                if inner.generation != token {
                    return;
                }
                inner.history.pop();
                if inner.history.is_empty() {
                    return;
                }
            }
            sleep(CLEAR_HISTORY_STEP).await;
        }
    }
}

impl<V: Clone> DialogStack<V> {
    /// The entry on top of the stack, if any
    #[must_use]
    pub fn current(&self) -> Option<DialogEntry<V>> {
        self.lock().history.last().cloned()
    }
}
