//! # Console Adapter
//!
//! A line-oriented front end over the core. Reads commands, turns each one
//! into a `LensSetAction`, dispatches it, and prints whatever list views
//! changed.
//!
//! This is the only module that does terminal I/O.
//!
//! ## Redraw Strategy
//!
//! Every watched list has a [`ListView`] subscribed to the store. Views
//! re-derive their list through their own lens on every notification and
//! mark themselves dirty only when it changed. After each command the loop
//! prints the dirty frames, so toggling a `home` item never redraws `work`.

mod command;
mod list_view;

pub use command::{Command, CommandError, HELP, parse};
pub use list_view::ListView;

use log::{debug, info, warn};
use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use crate::core::action::Action;
use crate::core::config::ResolvedConfig;
use crate::core::error::LensError;
use crate::core::store::{Store, SubscriptionId};
use crate::core::todo::{self, AppState, Todo};

/// A watched list: its view plus the subscription feeding it.
struct Watched {
    view: Rc<RefCell<ListView>>,
    subscription: SubscriptionId,
}

pub struct Console {
    store: Rc<Store<AppState>>,
    watched: Vec<Watched>,
}

impl Console {
    /// Installs one subscribed `ListView` per list name.
    pub fn new(store: Rc<Store<AppState>>, lists: &[String]) -> Self {
        let watched = lists
            .iter()
            .map(|list| {
                let view = Rc::new(RefCell::new(ListView::new(
                    list.clone(),
                    AppState::list_lens(list),
                )));
                let sink = Rc::clone(&view);
                let subscription = store.subscribe(move |state: &AppState| {
                    sink.borrow_mut().new_state(state)
                });
                Watched { view, subscription }
            })
            .collect();
        Self { store, watched }
    }

    pub fn store(&self) -> &Rc<Store<AppState>> {
        &self.store
    }

    /// Frames of every view that changed since the last call.
    pub fn take_frames(&self) -> Vec<String> {
        self.watched
            .iter()
            .filter_map(|w| w.view.borrow_mut().take_frame())
            .collect()
    }

    /// Renders every watched view regardless of changes.
    pub fn render_all(&self) -> Vec<String> {
        self.watched.iter().map(|w| w.view.borrow().render()).collect()
    }

    /// Items of a list, read from the committed state.
    fn current_todos(&self, list: &str) -> Result<Vec<Todo>, LensError> {
        AppState::list_lens(list).get(&self.store.state())
    }

    /// Turns a mutating command into an action and dispatches it.
    /// Returns the printable error on failure.
    pub fn execute(&self, command: &Command) -> Result<(), String> {
        let action: Box<dyn Action<AppState>> = match command {
            Command::Add { list, name } => {
                let todos = self.current_todos(list).map_err(|e| e.to_string())?;
                Box::new(todo::append_action(
                    &AppState::list_lens(list),
                    &todos,
                    Todo::new(name.clone(), false),
                ))
            }
            Command::Toggle { list, index } => {
                let todos = self.current_todos(list).map_err(|e| e.to_string())?;
                Box::new(
                    todo::toggle_action(&AppState::list_lens(list), &todos, *index)
                        .map_err(|e| e.to_string())?,
                )
            }
            Command::Rename { list, index, name } => {
                Box::new(todo::rename_action(list, *index, name.clone()))
            }
            Command::Show | Command::Help | Command::Quit => return Ok(()),
        };
        self.store
            .dispatch(action.as_ref())
            .map_err(|e| e.to_string())
    }
}

impl Drop for Console {
    fn drop(&mut self) {
        for watched in &self.watched {
            self.store.unsubscribe(watched.subscription);
        }
    }
}

/// Runs the command loop until `quit` or end of input.
pub fn run<R: BufRead, W: Write>(config: &ResolvedConfig, input: R, mut output: W) -> io::Result<()> {
    let store = Rc::new(Store::with_lens_reducer(config.initial_state.clone()));
    let console = Console::new(Rc::clone(&store), &config.lists);
    info!("Console started watching {:?}", config.lists);

    for frame in console.take_frames() {
        write!(output, "{frame}")?;
    }

    for line in input.lines() {
        let line = line?;
        let command = match parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(output, "error: {e}")?;
                continue;
            }
        };
        debug!("Command: {:?}", command);

        match command {
            Command::Quit => break,
            Command::Help => writeln!(output, "{HELP}")?,
            Command::Show => {
                for frame in console.render_all() {
                    write!(output, "{frame}")?;
                }
            }
            ref mutation => {
                if let Err(e) = console.execute(mutation) {
                    warn!("Command {:?} failed: {}", mutation, e);
                    writeln!(output, "error: {e}")?;
                }
                for frame in console.take_frames() {
                    write!(output, "{frame}")?;
                }
            }
        }
        output.flush()?;
    }

    info!("Console finished");
    Ok(())
}
