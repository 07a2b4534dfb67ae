//! List rendering for the console.
//!
//! A [`ListView`] is a store subscriber that sees the state only through
//! its own lens.

use log::warn;

use crate::core::lens::Lens;
use crate::core::todo::{AppState, Todo};

/// Renders one todo list.
///
/// The view owns the lens from the whole state to its list and re-derives
/// its items from every delivered state. It only produces a new frame when
/// the derived list actually changed.
pub struct ListView {
    title: String,
    lens: Lens<AppState, Vec<Todo>>,
    todos: Vec<Todo>,
    derived: bool,
    dirty: bool,
}

impl ListView {
    pub fn new(title: impl Into<String>, lens: Lens<AppState, Vec<Todo>>) -> Self {
        Self {
            title: title.into(),
            lens,
            todos: Vec::new(),
            derived: false,
            dirty: false,
        }
    }

    /// Subscriber entry point.
    pub fn new_state(&mut self, state: &AppState) {
        match self.lens.get(state) {
            Ok(todos) => {
                if !self.derived || todos != self.todos {
                    self.todos = todos;
                    self.derived = true;
                    self.dirty = true;
                }
            }
            Err(e) => warn!("List view `{}` cannot read its list: {}", self.title, e),
        }
    }

    /// Returns a rendered frame if the list changed since the last call.
    pub fn take_frame(&mut self) -> Option<String> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(self.render())
    }

    pub fn render(&self) -> String {
        let mut out = format!("[{}]\n", self.title);
        if self.todos.is_empty() {
            out.push_str("  (empty)\n");
        }
        for (i, todo) in self.todos.iter().enumerate() {
            let mark = if todo.complete { 'x' } else { ' ' };
            out.push_str(&format!("  {i}. [{mark}] {}\n", todo.name));
        }
        out
    }
}
