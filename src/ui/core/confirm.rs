//! Pluggable confirmation capability.
//!
//! The list view gates its two mutating interactions behind a boolean
//! confirmation. The capability is injected so the terminal front end and
//! the tests can each supply their own answer source.

use std::cell::Cell;
use std::rc::Rc;

pub trait Confirmation {
    /// Ask the user to confirm `prompt`; returns true on confirmation.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Fixed-answer confirmation, for tests and scripted flows.
pub struct StaticConfirm(pub bool);

impl Confirmation for StaticConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

/// Confirmation whose answer is preset by the caller.
///
/// The TUI gathers the user's y/n through its own dialog, presets the answer
/// here, then drives the list-view interaction; the interaction reads the
/// answer back through this provider. Single event-loop thread, hence
/// `Rc<Cell<_>>`.
#[derive(Clone, Default)]
pub struct SharedConfirm {
    answer: Rc<Cell<bool>>,
}

impl SharedConfirm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preset(&self, answer: bool) {
        self.answer.set(answer);
    }
}

impl Confirmation for SharedConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        self.answer.get()
    }
}
