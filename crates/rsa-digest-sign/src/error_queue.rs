//! Thread-local error queue of the cryptography layer.
//!
//! Library primitives report failure with a status value and record the
//! details here. Entries accumulate until someone drains them, so any code
//! that lets a primitive fail without reading the details must clear the
//! queue itself or the stale entries leak into the next, unrelated caller
//! that inspects it.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;

thread_local! {
    static QUEUE: RefCell<VecDeque<LibraryError>> = const { RefCell::new(VecDeque::new()) };
}

/// One recorded library failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryError {
    pub library: &'static str,
    pub function: &'static str,
    pub reason: String,
}

impl LibraryError {
    pub fn new(library: &'static str, function: &'static str, reason: impl Into<String>) -> Self {
        Self {
            library,
            function,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for LibraryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error:{}:{}:{}", self.library, self.function, self.reason)
    }
}

/// Appends an entry to the current thread's queue.
pub fn push_error(error: LibraryError) {
    QUEUE.with(|queue| queue.borrow_mut().push_back(error));
}

/// Returns the oldest entry without removing it.
pub fn peek_error() -> Option<LibraryError> {
    QUEUE.with(|queue| queue.borrow().front().cloned())
}

/// Removes and returns the oldest entry.
pub fn get_error() -> Option<LibraryError> {
    QUEUE.with(|queue| queue.borrow_mut().pop_front())
}

/// Discards every entry, returning how many were dropped.
pub fn clear_error() -> usize {
    QUEUE.with(|queue| {
        let mut queue = queue.borrow_mut();
        let count = queue.len();
        queue.clear();
        count
    })
}

pub fn len() -> usize {
    QUEUE.with(|queue| queue.borrow().len())
}

pub fn is_empty() -> bool {
    len() == 0
}

/// Drains the queue into a single diagnostic string, oldest entry first.
///
/// Returns an empty string when nothing was recorded.
pub fn error_string() -> String {
    let mut parts = Vec::new();
    while let Some(error) = get_error() {
        parts.push(error.to_string());
    }
    parts.join("; ")
}

/// Clears the queue when dropped, unless disarmed first.
///
/// Arm it before calling a primitive whose failure is not reported to the
/// caller as an error, and disarm it on the success path.
#[must_use = "the queue is cleared when the guard is dropped"]
pub struct DrainOnDrop {
    armed: bool,
}

impl DrainOnDrop {
    pub fn arm() -> Self {
        Self { armed: true }
    }

    pub fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for DrainOnDrop {
    fn drop(&mut self) {
        if self.armed {
            let drained = clear_error();
            if drained > 0 {
                tracing::debug!(drained, "cleared library error queue");
            }
        }
    }
}
