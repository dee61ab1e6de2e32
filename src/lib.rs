//! Product finder (prodfind)
//!
//! Terminal product search: a text input whose edits are debounced into
//! catalog fetches, a ranked results dropdown with keyboard and mouse
//! selection, and a detail card for the chosen product.
//!
//! Pure Core / Impure Shell: `model`, `search` and `state` never touch the
//! terminal or the network; `catalog` and `view` do.

pub mod catalog;
pub mod config;
pub mod logging;
pub mod model;
pub mod search;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
