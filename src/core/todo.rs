//! # Todo schema
//!
//! The sample application state: named todo lists.
//!
//! ```text
//! AppState
//! └── todos: BTreeMap<String, Vec<Todo>>   // list name → items
//!                                 └── Todo { name, complete }
//! ```
//!
//! Only lenses are defined here. Every update goes through the generic
//! reducer as a `LensSetAction`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::action::LensSetAction;
use crate::core::error::LensError;
use crate::core::lens::{Lens, index, key};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub name: String,
    pub complete: bool,
}

impl Todo {
    pub fn new(name: impl Into<String>, complete: bool) -> Self {
        Self {
            name: name.into(),
            complete,
        }
    }

    pub fn name_lens() -> Lens<Todo, String> {
        Lens::new(
            |todo: &Todo| todo.name.clone(),
            |todo: &Todo, name| Todo {
                name,
                complete: todo.complete,
            },
        )
    }

    pub fn complete_lens() -> Lens<Todo, bool> {
        Lens::new(
            |todo: &Todo| todo.complete,
            |todo: &Todo, complete| Todo {
                name: todo.name.clone(),
                complete,
            },
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AppState {
    pub todos: BTreeMap<String, Vec<Todo>>,
}

impl AppState {
    pub fn todos_lens() -> Lens<AppState, BTreeMap<String, Vec<Todo>>> {
        Lens::new(
            |state: &AppState| state.todos.clone(),
            |_: &AppState, todos| AppState { todos },
        )
    }

    /// `todos → key(list)`
    pub fn list_lens(list: &str) -> Lens<AppState, Vec<Todo>> {
        Self::todos_lens().then(key(list.to_string()))
    }

    /// `todos → key(list) → index(i)`
    pub fn item_lens(list: &str, i: usize) -> Lens<AppState, Todo> {
        Self::list_lens(list).then(index(i))
    }

    pub fn list_names(&self) -> Vec<String> {
        self.todos.keys().cloned().collect()
    }
}

/// The two lists the app ships with.
pub fn sample_state() -> AppState {
    let home = vec![
        Todo::new("Buy dog food", false),
        Todo::new("Do my laundry", true),
    ];
    let work = vec![
        Todo::new("Something something scrum", false),
        Todo::new("1 on 1 with so and so", false),
    ];
    AppState {
        todos: BTreeMap::from([("home".to_string(), home), ("work".to_string(), work)]),
    }
}

/// Flips the completion flag of item `i` in a list.
///
/// `todos` is the list as currently seen through `list_lens`; the new flag
/// is read from it with a list-local lens, and the action carries the full
/// `state → list → item → complete` path.
pub fn toggle_action(
    list_lens: &Lens<AppState, Vec<Todo>>,
    todos: &Vec<Todo>,
    i: usize,
) -> Result<LensSetAction<AppState, bool>, LensError> {
    let item_complete = index(i).then(Todo::complete_lens());
    let current = item_complete.get(todos)?;
    let lens = list_lens.clone().then(item_complete);
    Ok(LensSetAction::new(lens, !current))
}

/// Appends a todo to the end of a list.
pub fn append_action(
    list_lens: &Lens<AppState, Vec<Todo>>,
    todos: &[Todo],
    todo: Todo,
) -> LensSetAction<AppState, Vec<Todo>> {
    let mut next = todos.to_vec();
    next.push(todo);
    LensSetAction::new(list_lens.clone(), next)
}

/// Renames item `i` in a list.
pub fn rename_action(list: &str, i: usize, name: String) -> LensSetAction<AppState, String> {
    LensSetAction::new(AppState::item_lens(list, i).then(Todo::name_lens()), name)
}
