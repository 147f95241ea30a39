//! Command handlers.
//!
//! Each handler is a thin wrapper: it feeds CLI input into the wizard or the
//! server bootstrap and formats the result for the terminal.

pub mod read;
pub mod serve;
pub mod story;
