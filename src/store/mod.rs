//! Card store
//!
//! The project model and its transition function. This module must stay pure:
//! - no I/O, no logging
//! - transitions never mutate their input
//! - ill-formed actions are no-ops, never errors

pub mod action;
pub mod card;
pub mod project;
pub mod reducer;

pub use action::Action;
pub use card::{Card, CardField};
pub use project::{CardList, DEFAULT_WORKSPACE, Project};
pub use reducer::reduce;
