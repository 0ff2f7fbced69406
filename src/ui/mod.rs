//! Terminal presentation for the CLI

pub mod confirm;
pub mod error;
pub mod output;
pub mod terminal;
