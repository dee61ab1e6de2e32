//! Internal test modules - whitebox tests with crate access
//!
//! Harness-based acceptance tests drive `TuiApp` with a scripted catalog
//! and a virtual clock.
