//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::BTreeMap;

use crate::core::todo::{AppState, Todo};

/// `{ home: [A (open)] }`
pub fn home_only() -> AppState {
    AppState {
        todos: BTreeMap::from([("home".to_string(), vec![Todo::new("A", false)])]),
    }
}

/// `{ home: [A (open)], work: [W1 (done), W2 (open)] }`
pub fn home_and_work() -> AppState {
    let mut state = home_only();
    state.todos.insert(
        "work".to_string(),
        vec![Todo::new("W1", true), Todo::new("W2", false)],
    );
    state
}
