//! # Core
//!
//! Lenses, actions and the store. It knows nothing about any specific UI
//! technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Lens (get / set)     │
//!                    │  • LensSetAction        │
//!                    │  • reduce() + Store     │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ subscribe / dispatch
//!                     ┌──────────┴──────────┐
//!                     ▼                     ▼
//!              ┌────────────┐        ┌────────────┐
//!              │  Console   │        │   other    │
//!              │  Adapter   │        │  adapters  │
//!              └────────────┘        └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`lens`]: `Lens<P, C>`, composition and the key / index / property factories
//! - [`action`]: `Action`, `LensSetAction` and the generic `reduce()`
//! - [`store`]: `Store<S>`, dispatch and subscriptions
//! - [`todo`]: the sample todo-list schema and its lenses
//! - [`config`]: settings resolution
//! - [`error`]: lens and store errors

pub mod action;
pub mod config;
pub mod error;
pub mod lens;
pub mod store;
pub mod todo;

// Re-export commonly used types for convenience
pub use action::{Action, LensSetAction, StateUpdate, make_lens_set_action, reduce};
pub use error::{LensError, StoreError};
pub use lens::{Lens, compose};
pub use store::{Store, SubscriptionId};
