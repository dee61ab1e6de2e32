//! Search core (pure): debouncing, commit decisions, ranking.

pub mod controller;
pub mod debouncer;
pub mod ranker;

pub use controller::{FetchTicket, InputEffect, SearchController};
pub use debouncer::{Debouncer, DEFAULT_DEBOUNCE};
pub use ranker::{rank, rank_owned, score};
