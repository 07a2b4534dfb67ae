//! Lensmith: composable lenses and a single generic reducer for immutable state.

pub mod console;
pub mod core;

#[cfg(test)]
pub mod test_support;
